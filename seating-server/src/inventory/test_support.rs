//! Fixtures for service tests: in-memory stores that can be switched into a
//! failing state, and an audit sink that remembers what it was told.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::models::{GridRect, Seat, SeatPatch, Venue, Zone, ZoneCreate, ZoneKind, ZoneNumbering};

use super::InventoryStores;
use crate::audit::{AuditAction, AuditLevel, AuditSink};
use crate::db::memory::{MemoryPlacementStore, MemorySeatStore, MemoryVenueLookup, MemoryZoneStore};
use crate::db::repository::{RepoError, RepoResult, SeatStore, ZoneStore};

pub const EVENT: &str = "e1";
pub const VENUE: &str = "v1";

fn injected() -> RepoError {
    RepoError::Database("injected failure".into())
}

#[derive(Default)]
pub struct FlakyZoneStore {
    pub inner: MemoryZoneStore,
    broken: AtomicBool,
}

impl FlakyZoneStore {
    pub fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(injected());
        }
        Ok(())
    }
}

#[async_trait]
impl ZoneStore for FlakyZoneStore {
    async fn create(&self, zone: Zone) -> RepoResult<()> {
        self.check()?;
        self.inner.create(zone).await
    }
    async fn find(&self, event_id: &str, zone_id: &str) -> RepoResult<Option<Zone>> {
        self.check()?;
        self.inner.find(event_id, zone_id).await
    }
    async fn list_by_event(&self, event_id: &str) -> RepoResult<Vec<Zone>> {
        self.check()?;
        self.inner.list_by_event(event_id).await
    }
    async fn update(&self, zone: &Zone) -> RepoResult<bool> {
        self.check()?;
        self.inner.update(zone).await
    }
    async fn delete(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        self.check()?;
        self.inner.delete(event_id, zone_id).await
    }
    async fn exists_by_name(&self, event_id: &str, name: &str) -> RepoResult<bool> {
        self.check()?;
        self.inner.exists_by_name(event_id, name).await
    }
}

#[derive(Default)]
pub struct FlakySeatStore {
    pub inner: MemorySeatStore,
    broken: AtomicBool,
}

impl FlakySeatStore {
    pub fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(injected());
        }
        Ok(())
    }
}

#[async_trait]
impl SeatStore for FlakySeatStore {
    async fn create(&self, seat: Seat) -> RepoResult<()> {
        self.check()?;
        self.inner.create(seat).await
    }
    async fn insert_many(&self, seats: Vec<Seat>) -> RepoResult<u64> {
        self.check()?;
        self.inner.insert_many(seats).await
    }
    async fn find(&self, seat_id: &str) -> RepoResult<Option<Seat>> {
        self.check()?;
        self.inner.find(seat_id).await
    }
    async fn find_by_label(
        &self,
        event_id: &str,
        zone_id: &str,
        label: &str,
    ) -> RepoResult<Option<Seat>> {
        self.check()?;
        self.inner.find_by_label(event_id, zone_id, label).await
    }
    async fn update(&self, seat_id: &str, patch: SeatPatch) -> RepoResult<bool> {
        self.check()?;
        self.inner.update(seat_id, patch).await
    }
    async fn delete(&self, seat_id: &str) -> RepoResult<bool> {
        self.check()?;
        self.inner.delete(seat_id).await
    }
    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        self.check()?;
        self.inner.delete_by_zone(event_id, zone_id).await
    }
    async fn delete_available_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        self.check()?;
        self.inner.delete_available_by_zone(event_id, zone_id).await
    }
    async fn list_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<Vec<Seat>> {
        self.check()?;
        self.inner.list_by_zone(event_id, zone_id).await
    }
    async fn count_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        self.check()?;
        self.inner.count_by_zone(event_id, zone_id).await
    }
    async fn exists_for_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        self.check()?;
        self.inner.exists_for_zone(event_id, zone_id).await
    }
}

#[derive(Default)]
pub struct RecordingAudit {
    records: Mutex<Vec<(String, AuditAction)>>,
}

impl RecordingAudit {
    pub fn actions(&self) -> Vec<AuditAction> {
        self.records.lock().unwrap().iter().map(|(_, a)| *a).collect()
    }
}

impl AuditSink for RecordingAudit {
    fn record(&self, entity_id: &str, _level: AuditLevel, action: AuditAction, _message: String) {
        self.records.lock().unwrap().push((entity_id.to_string(), action));
    }
}

pub struct Fixture {
    pub stores: InventoryStores,
    pub zones: Arc<FlakyZoneStore>,
    pub placements: Arc<MemoryPlacementStore>,
    pub seats: Arc<FlakySeatStore>,
    pub audit: Arc<RecordingAudit>,
}

impl Fixture {
    pub fn new() -> Self {
        let venues = Arc::new(MemoryVenueLookup::new());
        venues.insert(Venue {
            id: VENUE.into(),
            name: "Teatro Principal".into(),
            address: None,
        });
        let zones = Arc::new(FlakyZoneStore::default());
        let placements = Arc::new(MemoryPlacementStore::new());
        let seats = Arc::new(FlakySeatStore::default());
        let stores = InventoryStores {
            venues,
            zones: zones.clone(),
            placements: placements.clone(),
            seats: seats.clone(),
        };
        Self {
            stores,
            zones,
            placements,
            seats,
            audit: Arc::new(RecordingAudit::default()),
        }
    }
}

/// Seated zone command with alphabetic rows and auto-generation on
pub fn seated_zone(name: &str, rows: i32, columns: i32, capacity: u32) -> ZoneCreate {
    ZoneCreate {
        event_id: EVENT.into(),
        venue_id: VENUE.into(),
        template_zone_id: None,
        name: name.into(),
        kind: ZoneKind::Seated,
        capacity,
        numbering: ZoneNumbering {
            mode: "filas".into(),
            rows,
            columns,
            row_prefix: Some("A".into()),
            seat_prefix: None,
        },
        price: Some(45.0),
        status: None,
        grid: GridRect {
            start_row: 0,
            start_col: 0,
            row_span: 2,
            col_span: 3,
        },
        color: None,
        z_index: None,
        visible: None,
        auto_generate_seats: true,
    }
}

pub fn general_zone(name: &str, capacity: u32) -> ZoneCreate {
    ZoneCreate {
        kind: ZoneKind::General,
        numbering: ZoneNumbering::default(),
        ..seated_zone(name, 0, 0, capacity)
    }
}
