pub mod artist_genres;
pub mod artists;
pub mod genres;
pub mod shows;
pub mod venue_genres;
pub mod venues;
