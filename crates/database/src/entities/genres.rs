use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shared tag dictionary referenced by venues and artists. Names are looked
/// up and reused by convention only; duplicates are tolerated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::venue_genres::Entity")]
    VenueGenres,
    #[sea_orm(has_many = "super::artist_genres::Entity")]
    ArtistGenres,
}

impl Related<super::venue_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VenueGenres.def()
    }
}

impl Related<super::artist_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistGenres.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
