use crate::entities::genres;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use std::collections::HashMap;

pub struct GenreService;

impl GenreService {
    /// Resolve submitted genre names to row ids, creating rows for names not
    /// seen before. The lookup is batched over all names; repeated names in
    /// the input map to a single row. Best-effort only: a concurrent request
    /// creating the same new name can still leave duplicate rows behind.
    pub async fn resolve_names<C>(conn: &C, names: &[String]) -> Result<Vec<i32>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut wanted: Vec<String> = Vec::new();
        for name in names {
            if !wanted.contains(name) {
                wanted.push(name.clone());
            }
        }

        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let existing = genres::Entity::find()
            .filter(genres::Column::Name.is_in(wanted.clone()))
            .all(conn)
            .await?;

        // When duplicate rows exist for a name, the first one found wins
        let mut cache: HashMap<String, i32> = HashMap::new();
        for genre in existing {
            cache.entry(genre.name).or_insert(genre.id);
        }

        let mut ids = Vec::with_capacity(wanted.len());
        for name in wanted {
            if let Some(&id) = cache.get(&name) {
                ids.push(id);
                continue;
            }

            let inserted = genres::Entity::insert(genres::ActiveModel {
                name: Set(name.clone()),
                ..Default::default()
            })
            .exec(conn)
            .await?;

            cache.insert(name, inserted.last_insert_id);
            ids.push(inserted.last_insert_id);
        }

        Ok(ids)
    }
}
