//! Zone Placement Repository

use super::{Affected, BaseRepository, PlacementStore, RepoResult};
use async_trait::async_trait;
use serde::Serialize;
use shared::models::{GridRect, PlacementUpdate, ZonePlacement};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PLACEMENT_FIELDS: &str = "meta::id(id) AS id, event_id, venue_id, zone_id, grid, color, \
     z_index, visible, created_at, updated_at";

/// MERGE payload; absent fields are left untouched
#[derive(Debug, Serialize)]
struct PlacementChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct PlacementRepository {
    base: BaseRepository,
}

impl PlacementRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl PlacementStore for PlacementRepository {
    async fn create(&self, placement: ZonePlacement) -> RepoResult<()> {
        self.base
            .db()
            .query("INSERT INTO zone_placement $data RETURN NONE")
            .bind(("data", placement))
            .await?
            .check()?;
        Ok(())
    }

    async fn find_by_zone(
        &self,
        event_id: &str,
        zone_id: &str,
    ) -> RepoResult<Option<ZonePlacement>> {
        let placements: Vec<ZonePlacement> = self
            .base
            .db()
            .query(format!(
                "SELECT {PLACEMENT_FIELDS} FROM zone_placement \
                 WHERE event_id = $event_id AND zone_id = $zone_id LIMIT 1"
            ))
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(placements.into_iter().next())
    }

    async fn update(
        &self,
        event_id: &str,
        zone_id: &str,
        update: PlacementUpdate,
        updated_at: i64,
    ) -> RepoResult<bool> {
        let changes = PlacementChanges {
            grid: update.grid,
            color: update.color,
            z_index: update.z_index,
            visible: update.visible,
            updated_at,
        };
        let touched: Vec<Affected> = self
            .base
            .db()
            .query(
                "UPDATE zone_placement MERGE $changes \
                 WHERE event_id = $event_id AND zone_id = $zone_id RETURN event_id",
            )
            .bind(("changes", changes))
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(!touched.is_empty())
    }

    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        let removed: Vec<Affected> = self
            .base
            .db()
            .query(
                "DELETE zone_placement WHERE event_id = $event_id AND zone_id = $zone_id \
                 RETURN BEFORE",
            )
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(removed.len() as u64)
    }
}
