//! Repository Module
//!
//! Store contracts for the three inventory collections plus the read-only
//! venue lookup, and their SurrealDB implementations. In-memory
//! implementations of the same contracts live in [`crate::db::memory`].

pub mod placement;
pub mod seat;
pub mod venue;
pub mod zone;

// Re-exports
pub use placement::PlacementRepository;
pub use seat::SeatRepository;
pub use venue::VenueRepository;
pub use zone::ZoneRepository;

use async_trait::async_trait;
use shared::models::{PlacementUpdate, Seat, SeatPatch, Venue, Zone, ZonePlacement};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique index rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "Database index `x` already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Zone collection contract
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Insert a new zone; `Duplicate` if (event_id, name_key) is taken
    async fn create(&self, zone: Zone) -> RepoResult<()>;
    async fn find(&self, event_id: &str, zone_id: &str) -> RepoResult<Option<Zone>>;
    async fn list_by_event(&self, event_id: &str) -> RepoResult<Vec<Zone>>;
    /// Replace the stored document; returns whether a row was modified
    async fn update(&self, zone: &Zone) -> RepoResult<bool>;
    /// Returns whether a row was removed
    async fn delete(&self, event_id: &str, zone_id: &str) -> RepoResult<bool>;
    async fn exists_by_name(&self, event_id: &str, name: &str) -> RepoResult<bool>;
}

/// Zone placement collection contract
#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn create(&self, placement: ZonePlacement) -> RepoResult<()>;
    async fn find_by_zone(&self, event_id: &str, zone_id: &str)
    -> RepoResult<Option<ZonePlacement>>;
    /// Apply the present fields; returns whether a row was modified
    async fn update(
        &self,
        event_id: &str,
        zone_id: &str,
        update: PlacementUpdate,
        updated_at: i64,
    ) -> RepoResult<bool>;
    /// Returns the number of removed blocks
    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64>;
}

/// Seat collection contract
#[async_trait]
pub trait SeatStore: Send + Sync {
    /// Insert one seat; `Duplicate` if (event_id, zone_id, label) is taken
    async fn create(&self, seat: Seat) -> RepoResult<()>;
    /// Single batched write; returns the number of inserted seats
    async fn insert_many(&self, seats: Vec<Seat>) -> RepoResult<u64>;
    async fn find(&self, seat_id: &str) -> RepoResult<Option<Seat>>;
    async fn find_by_label(
        &self,
        event_id: &str,
        zone_id: &str,
        label: &str,
    ) -> RepoResult<Option<Seat>>;
    /// Returns whether the write modified a row
    async fn update(&self, seat_id: &str, patch: SeatPatch) -> RepoResult<bool>;
    async fn delete(&self, seat_id: &str) -> RepoResult<bool>;
    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64>;
    /// Remove only the seats still `disponible`
    async fn delete_available_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64>;
    /// Ordered by row then column then label
    async fn list_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<Vec<Seat>>;
    async fn count_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64>;
    async fn exists_for_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<bool>;
}

/// Read-only venue lookup (owned by the venue catalogue)
#[async_trait]
pub trait VenueLookup: Send + Sync {
    async fn exists(&self, venue_id: &str) -> RepoResult<bool> {
        Ok(self.get(venue_id).await?.is_some())
    }
    async fn get(&self, venue_id: &str) -> RepoResult<Option<Venue>>;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Projection used to count rows touched by a write
#[derive(Debug, serde::Deserialize)]
pub(crate) struct Affected {
    #[allow(dead_code)]
    event_id: String,
}

/// Sort seats the way every listing returns them
pub(crate) fn sort_seats(seats: &mut [Seat]) {
    seats.sort_by(|a, b| {
        (a.row_index, a.column_index, &a.label).cmp(&(b.row_index, b.column_index, &b.label))
    });
}
