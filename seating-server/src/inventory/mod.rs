//! Zone & seat inventory
//!
//! ```text
//! ZoneLifecycleManager ──┬─ VenueLookup
//! SeatLifecycleManager ──┼─ ZoneStore
//! ZoneQueryService ──────┼─ PlacementStore
//!                        └─ SeatStore
//! ```
//!
//! The services only depend on the store contracts in
//! [`crate::db::repository`], so the same code runs over SurrealDB or the
//! in-memory adapters.

pub mod error;
pub mod row_label;
pub mod seat_grid;
pub mod seat_lifecycle;
pub mod zone_lifecycle;
pub mod zone_query;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{InventoryError, InventoryResult, Operation};
pub use seat_grid::{SeatGrid, generate};
pub use seat_lifecycle::SeatLifecycleManager;
pub use zone_lifecycle::ZoneLifecycleManager;
pub use zone_query::ZoneQueryService;

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::memory::{MemoryPlacementStore, MemorySeatStore, MemoryVenueLookup, MemoryZoneStore};
use crate::db::repository::{
    PlacementRepository, PlacementStore, SeatRepository, SeatStore, VenueLookup, VenueRepository,
    ZoneRepository, ZoneStore,
};

/// Store handles shared by the three services
#[derive(Clone)]
pub struct InventoryStores {
    pub venues: Arc<dyn VenueLookup>,
    pub zones: Arc<dyn ZoneStore>,
    pub placements: Arc<dyn PlacementStore>,
    pub seats: Arc<dyn SeatStore>,
}

impl InventoryStores {
    /// SurrealDB-backed stores over one connection
    pub fn surreal(db: Surreal<Db>) -> Self {
        Self {
            venues: Arc::new(VenueRepository::new(db.clone())),
            zones: Arc::new(ZoneRepository::new(db.clone())),
            placements: Arc::new(PlacementRepository::new(db.clone())),
            seats: Arc::new(SeatRepository::new(db)),
        }
    }

    /// In-memory stores; venues come from the given lookup
    pub fn memory(venues: Arc<MemoryVenueLookup>) -> Self {
        Self {
            venues,
            zones: Arc::new(MemoryZoneStore::new()),
            placements: Arc::new(MemoryPlacementStore::new()),
            seats: Arc::new(MemorySeatStore::new()),
        }
    }
}
