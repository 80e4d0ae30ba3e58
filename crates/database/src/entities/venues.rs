use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shows::Entity")]
    Shows,
    #[sea_orm(has_many = "super::venue_genres::Entity")]
    VenueGenres,
}

impl Related<super::shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

// Many-to-many relationship with genres
impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::venue_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::venue_genres::Relation::Venue.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
