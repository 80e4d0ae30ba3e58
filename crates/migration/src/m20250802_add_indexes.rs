use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes on venues for the grouped list and name search
        manager
            .create_index(
                Index::create()
                    .name("idx_venues_city_state")
                    .table(Venues::Table)
                    .col(Venues::City)
                    .col(Venues::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_venues_name")
                    .table(Venues::Table)
                    .col(Venues::Name)
                    .to_owned(),
            )
            .await?;

        // Index on artists.name for the alphabetical list and name search
        manager
            .create_index(
                Index::create()
                    .name("idx_artists_name")
                    .table(Artists::Table)
                    .col(Artists::Name)
                    .to_owned(),
            )
            .await?;

        // Indexes on shows for per-entity lookups and the past/upcoming split
        manager
            .create_index(
                Index::create()
                    .name("idx_shows_venue_id")
                    .table(Shows::Table)
                    .col(Shows::VenueId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shows_artist_id")
                    .table(Shows::Table)
                    .col(Shows::ArtistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shows_start_time")
                    .table(Shows::Table)
                    .col(Shows::StartTime)
                    .to_owned(),
            )
            .await?;

        // Indexes on the junction tables for faster many-to-many lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_genres_venue_id")
                    .table(VenueGenres::Table)
                    .col(VenueGenres::VenueId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artist_genres_artist_id")
                    .table(ArtistGenres::Table)
                    .col(ArtistGenres::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Index on genres.name for the resolve-or-create lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_genres_name")
                    .table(Genres::Table)
                    .col(Genres::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_genres_name").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_artist_genres_artist_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_venue_genres_venue_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_shows_start_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_shows_artist_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_shows_venue_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_artists_name").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_venues_name").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_venues_city_state").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Venues {
    Table,
    Name,
    City,
    State,
}

#[derive(Iden)]
enum Artists {
    Table,
    Name,
}

#[derive(Iden)]
enum Genres {
    Table,
    Name,
}

#[derive(Iden)]
enum Shows {
    Table,
    StartTime,
    ArtistId,
    VenueId,
}

#[derive(Iden)]
enum VenueGenres {
    Table,
    VenueId,
}

#[derive(Iden)]
enum ArtistGenres {
    Table,
    ArtistId,
}
