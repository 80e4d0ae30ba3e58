use chrono::{Duration, NaiveDate, NaiveDateTime};
use database::entities::{artist_genres, artists, genres, shows, venue_genres, venues};
use database::services::{artist::ArtistService, show::ShowService, venue::VenueService};
use models::listing::{ArtistListing, ShowListing, VenueListing};
use models::phone::Phone;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema,
};
use std::str::FromStr;

async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(db.get_database_backend());
    let builder = db.get_database_backend();

    db.execute(builder.build(&schema.create_table_from_entity(genres::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(venues::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(artists::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(shows::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(venue_genres::Entity)))
        .await
        .unwrap();
    db.execute(builder.build(&schema.create_table_from_entity(artist_genres::Entity)))
        .await
        .unwrap();

    db
}

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn venue_listing(name: &str, city: &str, state: &str, genre_names: &[&str]) -> VenueListing {
    VenueListing {
        name: name.to_owned(),
        city: city.to_owned(),
        state: state.to_owned(),
        address: "100 Main St".to_owned(),
        phone: Phone::from_str("(512) 555-0100").unwrap(),
        genres: genre_names.iter().map(|name| (*name).to_owned()).collect(),
        ..Default::default()
    }
}

fn artist_listing(name: &str, genre_names: &[&str]) -> ArtistListing {
    ArtistListing {
        name: name.to_owned(),
        city: "San Francisco".to_owned(),
        state: "CA".to_owned(),
        phone: Phone::from_str("326-123-5000").unwrap(),
        genres: genre_names.iter().map(|name| (*name).to_owned()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_venue_stores_digits_and_reuses_genres() {
    let db = setup().await;

    let first = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &["Jazz"]))
        .await
        .unwrap();
    VenueService::create(
        &db,
        &venue_listing("The Musical Hop", "San Francisco", "CA", &["Jazz", "Reggae"]),
    )
    .await
    .unwrap();

    // "Jazz" is reused across venues, so two distinct names make two rows
    let genre_count = genres::Entity::find().count(&db).await.unwrap();
    assert_eq!(genre_count, 2);

    let (venue, genre_names) = VenueService::find_with_genres(&db, first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(venue.phone, "5125550100");
    assert_eq!(genre_names, vec!["Jazz".to_owned()]);
}

#[tokio::test]
async fn repeated_genre_names_in_one_submission_create_one_row() {
    let db = setup().await;

    VenueService::create(
        &db,
        &venue_listing("Test Hall", "Austin", "TX", &["Jazz", "Jazz"]),
    )
    .await
    .unwrap();

    assert_eq!(genres::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(venue_genres::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn venue_search_is_case_insensitive_substring() {
    let db = setup().await;

    VenueService::create(
        &db,
        &venue_listing("The Dueling Pianos Bar", "New York", "NY", &[]),
    )
    .await
    .unwrap();
    VenueService::create(
        &db,
        &venue_listing("Park Square Live Music", "San Francisco", "CA", &[]),
    )
    .await
    .unwrap();

    let matches = VenueService::search_by_name(&db, "PIANO", noon()).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].0.name, "The Dueling Pianos Bar");

    // Both names contain an "a" somewhere
    let matches = VenueService::search_by_name(&db, "a", noon()).await.unwrap();
    assert_eq!(matches.len(), 2);

    let matches = VenueService::search_by_name(&db, "zzz", noon()).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn upcoming_counts_only_count_future_shows() {
    let db = setup().await;
    let now = noon();

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &[]))
        .await
        .unwrap();
    let quiet = VenueService::create(&db, &venue_listing("Quiet Room", "Austin", "TX", &[]))
        .await
        .unwrap();
    let artist = ArtistService::create(&db, &artist_listing("Guns N Petals", &[]))
        .await
        .unwrap();

    for offset in [-1, 1, 2] {
        ShowService::create(
            &db,
            &ShowListing {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: now + Duration::days(offset),
            },
        )
        .await
        .unwrap();
    }

    let listed = VenueService::list_with_upcoming(&db, now).await.unwrap();
    assert_eq!(listed.len(), 2);

    let counts: Vec<(i32, u64)> = listed
        .iter()
        .map(|(venue, count)| (venue.id, *count))
        .collect();
    assert!(counts.contains(&(venue.id, 2)));
    assert!(counts.contains(&(quiet.id, 0)));

    let matches = VenueService::search_by_name(&db, "test hall", now).await.unwrap();
    assert_eq!(matches[0].1, 2);
}

#[tokio::test]
async fn venue_detail_partitions_shows_around_now() {
    let db = setup().await;
    let now = noon();

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &["Jazz"]))
        .await
        .unwrap();
    let artist = ArtistService::create(&db, &artist_listing("Guns N Petals", &[]))
        .await
        .unwrap();

    for offset in [-2, -1, 3] {
        ShowService::create(
            &db,
            &ShowListing {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: now + Duration::days(offset),
            },
        )
        .await
        .unwrap();
    }

    let detail = VenueService::find_detail(&db, venue.id, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.genres, vec!["Jazz".to_owned()]);
    assert_eq!(detail.past_shows.len(), 2);
    assert_eq!(detail.upcoming_shows.len(), 1);
    assert_eq!(detail.upcoming_shows[0].1.name, "Guns N Petals");

    assert!(VenueService::find_detail(&db, venue.id + 100, now)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn artist_detail_partitions_shows_around_now() {
    let db = setup().await;
    let now = noon();

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &[]))
        .await
        .unwrap();
    let artist = ArtistService::create(&db, &artist_listing("Matt Quevedo", &["Jazz"]))
        .await
        .unwrap();

    for offset in [-1, 1] {
        ShowService::create(
            &db,
            &ShowListing {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: now + Duration::days(offset),
            },
        )
        .await
        .unwrap();
    }

    let detail = ArtistService::find_detail(&db, artist.id, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.genres, vec!["Jazz".to_owned()]);
    assert_eq!(detail.past_shows.len(), 1);
    assert_eq!(detail.upcoming_shows.len(), 1);
    assert_eq!(detail.upcoming_shows[0].1.name, "Test Hall");
}

#[tokio::test]
async fn update_venue_replaces_genre_links() {
    let db = setup().await;

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &["Jazz"]))
        .await
        .unwrap();

    let mut changed = venue_listing("Test Hall", "Dallas", "TX", &["Folk"]);
    changed.phone = Phone::from_str("214-555-0199").unwrap();
    let updated = VenueService::update(&db, venue.id, &changed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.city, "Dallas");
    assert_eq!(updated.phone, "2145550199");

    let (_, genre_names) = VenueService::find_with_genres(&db, venue.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(genre_names, vec!["Folk".to_owned()]);

    // The old genre row stays in the dictionary, only the link moved
    assert_eq!(genres::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(venue_genres::Entity::find().count(&db).await.unwrap(), 1);

    let absent = VenueService::update(&db, venue.id + 100, &changed).await.unwrap();
    assert!(absent.is_none());
}

#[tokio::test]
async fn delete_venue_returns_name_and_clears_links() {
    let db = setup().await;

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &["Jazz"]))
        .await
        .unwrap();

    let deleted = VenueService::delete(&db, venue.id).await.unwrap();
    assert_eq!(deleted, Some("Test Hall".to_owned()));

    assert!(venues::Entity::find_by_id(venue.id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    assert_eq!(venue_genres::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_missing_entities_return_none() {
    let db = setup().await;

    assert!(VenueService::delete(&db, 42).await.unwrap().is_none());
    assert!(ArtistService::delete(&db, 42).await.unwrap().is_none());
}

#[tokio::test]
async fn artists_list_alphabetically() {
    let db = setup().await;

    for name in ["The Wild Sax Band", "Guns N Petals", "Matt Quevedo"] {
        ArtistService::create(&db, &artist_listing(name, &[])).await.unwrap();
    }

    let names: Vec<String> = ArtistService::list_alphabetical(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|artist| artist.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Guns N Petals".to_owned(),
            "Matt Quevedo".to_owned(),
            "The Wild Sax Band".to_owned(),
        ]
    );
}

#[tokio::test]
async fn artist_search_annotates_upcoming_counts() {
    let db = setup().await;
    let now = noon();

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &[]))
        .await
        .unwrap();
    let artist = ArtistService::create(&db, &artist_listing("The Wild Sax Band", &[]))
        .await
        .unwrap();
    ArtistService::create(&db, &artist_listing("Guns N Petals", &[]))
        .await
        .unwrap();

    ShowService::create(
        &db,
        &ShowListing {
            artist_id: artist.id,
            venue_id: venue.id,
            start_time: now + Duration::days(7),
        },
    )
    .await
    .unwrap();

    let matches = ArtistService::search_by_name(&db, "band", now).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].0.name, "The Wild Sax Band");
    assert_eq!(matches[0].1, 1);
}

#[tokio::test]
async fn show_list_joins_artist_and_venue_rows() {
    let db = setup().await;
    let now = noon();

    let venue = VenueService::create(&db, &venue_listing("Test Hall", "Austin", "TX", &[]))
        .await
        .unwrap();
    let artist = ArtistService::create(&db, &artist_listing("Guns N Petals", &[]))
        .await
        .unwrap();

    ShowService::create(
        &db,
        &ShowListing {
            artist_id: artist.id,
            venue_id: venue.id,
            start_time: now + Duration::days(2),
        },
    )
    .await
    .unwrap();
    ShowService::create(
        &db,
        &ShowListing {
            artist_id: artist.id,
            venue_id: venue.id,
            start_time: now + Duration::days(1),
        },
    )
    .await
    .unwrap();

    let rows = ShowService::list(&db).await.unwrap();
    assert_eq!(rows.len(), 2);

    // Ordered by start time
    assert!(rows[0].0.start_time < rows[1].0.start_time);
    assert_eq!(rows[0].1.name, "Guns N Petals");
    assert_eq!(rows[0].2.name, "Test Hall");
}
