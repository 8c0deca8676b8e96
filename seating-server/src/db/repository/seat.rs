//! Seat Repository

use super::{Affected, BaseRepository, RepoResult, SeatStore};
use async_trait::async_trait;
use shared::models::{SEAT_STATUS_AVAILABLE, Seat, SeatPatch};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SEAT_FIELDS: &str = "meta::id(id) AS id, event_id, zone_id, row_index, column_index, \
     label, status, metadata, created_at, updated_at";

#[derive(Debug, serde::Deserialize)]
struct SeatCount {
    total: u64,
}

#[derive(Clone)]
pub struct SeatRepository {
    base: BaseRepository,
}

impl SeatRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl SeatStore for SeatRepository {
    async fn create(&self, seat: Seat) -> RepoResult<()> {
        self.base
            .db()
            .query("INSERT INTO seat $data RETURN NONE")
            .bind(("data", seat))
            .await?
            .check()?;
        Ok(())
    }

    async fn insert_many(&self, seats: Vec<Seat>) -> RepoResult<u64> {
        if seats.is_empty() {
            return Ok(0);
        }
        let count = seats.len() as u64;
        self.base
            .db()
            .query("INSERT INTO seat $data RETURN NONE")
            .bind(("data", seats))
            .await?
            .check()?;
        Ok(count)
    }

    async fn find(&self, seat_id: &str) -> RepoResult<Option<Seat>> {
        let seats: Vec<Seat> = self
            .base
            .db()
            .query(format!(
                "SELECT {SEAT_FIELDS} FROM type::thing('seat', $seat_id)"
            ))
            .bind(("seat_id", seat_id.to_string()))
            .await?
            .take(0)?;
        Ok(seats.into_iter().next())
    }

    async fn find_by_label(
        &self,
        event_id: &str,
        zone_id: &str,
        label: &str,
    ) -> RepoResult<Option<Seat>> {
        let seats: Vec<Seat> = self
            .base
            .db()
            .query(format!(
                "SELECT {SEAT_FIELDS} FROM seat \
                 WHERE event_id = $event_id AND zone_id = $zone_id AND label = $label LIMIT 1"
            ))
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .bind(("label", label.to_string()))
            .await?
            .take(0)?;
        Ok(seats.into_iter().next())
    }

    async fn update(&self, seat_id: &str, patch: SeatPatch) -> RepoResult<bool> {
        let touched: Vec<Affected> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('seat', $seat_id) MERGE $patch \
                 WHERE label != NONE RETURN event_id",
            )
            .bind(("seat_id", seat_id.to_string()))
            .bind(("patch", patch))
            .await?
            .take(0)?;
        Ok(!touched.is_empty())
    }

    async fn delete(&self, seat_id: &str) -> RepoResult<bool> {
        let removed: Vec<Affected> = self
            .base
            .db()
            .query("DELETE type::thing('seat', $seat_id) RETURN BEFORE")
            .bind(("seat_id", seat_id.to_string()))
            .await?
            .take(0)?;
        Ok(!removed.is_empty())
    }

    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        let removed: Vec<Affected> = self
            .base
            .db()
            .query("DELETE seat WHERE event_id = $event_id AND zone_id = $zone_id RETURN BEFORE")
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(removed.len() as u64)
    }

    async fn delete_available_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        let removed: Vec<Affected> = self
            .base
            .db()
            .query(
                "DELETE seat WHERE event_id = $event_id AND zone_id = $zone_id \
                 AND status = $status RETURN BEFORE",
            )
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .bind(("status", SEAT_STATUS_AVAILABLE))
            .await?
            .take(0)?;
        Ok(removed.len() as u64)
    }

    async fn list_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<Vec<Seat>> {
        let seats: Vec<Seat> = self
            .base
            .db()
            .query(format!(
                "SELECT {SEAT_FIELDS} FROM seat WHERE event_id = $event_id AND zone_id = $zone_id \
                 ORDER BY row_index, column_index, label"
            ))
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(seats)
    }

    async fn count_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        let counts: Vec<SeatCount> = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM seat \
                 WHERE event_id = $event_id AND zone_id = $zone_id GROUP ALL",
            )
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(counts.first().map(|c| c.total).unwrap_or(0))
    }

    async fn exists_for_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        let found: Vec<Affected> = self
            .base
            .db()
            .query(
                "SELECT event_id FROM seat WHERE event_id = $event_id AND zone_id = $zone_id LIMIT 1",
            )
            .bind(("event_id", event_id.to_string()))
            .bind(("zone_id", zone_id.to_string()))
            .await?
            .take(0)?;
        Ok(!found.is_empty())
    }
}
