//! Venue Repository (read-only)

use super::{BaseRepository, RepoResult, VenueLookup};
use async_trait::async_trait;
use shared::models::Venue;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct VenueRepository {
    base: BaseRepository,
}

impl VenueRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl VenueLookup for VenueRepository {
    async fn get(&self, venue_id: &str) -> RepoResult<Option<Venue>> {
        let venues: Vec<Venue> = self
            .base
            .db()
            .query("SELECT meta::id(id) AS id, name, address FROM type::thing('venue', $venue_id)")
            .bind(("venue_id", venue_id.to_string()))
            .await?
            .take(0)?;
        Ok(venues.into_iter().next())
    }
}
