pub mod artist;
pub mod genre;
pub mod show;
pub mod venue;
