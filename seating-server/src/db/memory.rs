//! In-memory store adapters
//!
//! Same contracts and uniqueness keys as the SurrealDB repositories, backed
//! by `DashMap`. Used by unit tests and by embedders that do not need
//! durability.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::models::{PlacementUpdate, Seat, SeatPatch, Venue, Zone, ZonePlacement};
use shared::util::name_key;

use super::repository::{
    PlacementStore, RepoError, RepoResult, SeatStore, VenueLookup, ZoneStore, sort_seats,
};

type NameKey = (String, String);
type LabelKey = (String, String, String);

// =============================================================================
// Zones
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryZoneStore {
    zones: DashMap<String, Zone>,
    /// (event_id, name_key) -> zone_id
    names: DashMap<NameKey, String>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn create(&self, zone: Zone) -> RepoResult<()> {
        if self.zones.contains_key(&zone.id) {
            return Err(RepoError::Duplicate(format!("Zone {} already exists", zone.id)));
        }
        match self.names.entry((zone.event_id.clone(), zone.name_key.clone())) {
            Entry::Occupied(_) => {
                return Err(RepoError::Duplicate(format!(
                    "Zone '{}' already exists for event {}",
                    zone.name, zone.event_id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(zone.id.clone());
            }
        }
        self.zones.insert(zone.id.clone(), zone);
        Ok(())
    }

    async fn find(&self, event_id: &str, zone_id: &str) -> RepoResult<Option<Zone>> {
        Ok(self
            .zones
            .get(zone_id)
            .filter(|z| z.event_id == event_id)
            .map(|z| z.clone()))
    }

    async fn list_by_event(&self, event_id: &str) -> RepoResult<Vec<Zone>> {
        let mut zones: Vec<Zone> = self
            .zones
            .iter()
            .filter(|z| z.event_id == event_id)
            .map(|z| z.clone())
            .collect();
        zones.sort_by(|a, b| (a.created_at, &a.name).cmp(&(b.created_at, &b.name)));
        Ok(zones)
    }

    async fn update(&self, zone: &Zone) -> RepoResult<bool> {
        let Some(previous_key) = self
            .zones
            .get(&zone.id)
            .filter(|z| z.event_id == zone.event_id)
            .map(|z| z.name_key.clone())
        else {
            return Ok(false);
        };

        if previous_key != zone.name_key {
            match self.names.entry((zone.event_id.clone(), zone.name_key.clone())) {
                Entry::Occupied(owner) if owner.get() != &zone.id => {
                    return Err(RepoError::Duplicate(format!(
                        "Zone '{}' already exists for event {}",
                        zone.name, zone.event_id
                    )));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(zone.id.clone());
                }
            }
            self.names.remove(&(zone.event_id.clone(), previous_key));
        }

        self.zones.insert(zone.id.clone(), zone.clone());
        Ok(true)
    }

    async fn delete(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        match self.zones.remove_if(zone_id, |_, z| z.event_id == event_id) {
            Some((_, zone)) => {
                self.names.remove(&(zone.event_id, zone.name_key));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn exists_by_name(&self, event_id: &str, name: &str) -> RepoResult<bool> {
        Ok(self
            .names
            .contains_key(&(event_id.to_string(), name_key(name))))
    }
}

// =============================================================================
// Placements
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryPlacementStore {
    /// (event_id, zone_id) -> placement
    placements: DashMap<NameKey, ZonePlacement>,
}

impl MemoryPlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[async_trait]
impl PlacementStore for MemoryPlacementStore {
    async fn create(&self, placement: ZonePlacement) -> RepoResult<()> {
        match self
            .placements
            .entry((placement.event_id.clone(), placement.zone_id.clone()))
        {
            Entry::Occupied(_) => Err(RepoError::Duplicate(format!(
                "Placement for zone {} already exists",
                placement.zone_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(placement);
                Ok(())
            }
        }
    }

    async fn find_by_zone(
        &self,
        event_id: &str,
        zone_id: &str,
    ) -> RepoResult<Option<ZonePlacement>> {
        Ok(self
            .placements
            .get(&(event_id.to_string(), zone_id.to_string()))
            .map(|p| p.clone()))
    }

    async fn update(
        &self,
        event_id: &str,
        zone_id: &str,
        update: PlacementUpdate,
        updated_at: i64,
    ) -> RepoResult<bool> {
        let Some(mut placement) = self
            .placements
            .get_mut(&(event_id.to_string(), zone_id.to_string()))
        else {
            return Ok(false);
        };
        if let Some(grid) = update.grid {
            placement.grid = grid;
        }
        if let Some(color) = update.color {
            placement.color = Some(color);
        }
        if let Some(z_index) = update.z_index {
            placement.z_index = Some(z_index);
        }
        if let Some(visible) = update.visible {
            placement.visible = visible;
        }
        placement.updated_at = updated_at;
        Ok(true)
    }

    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        Ok(self
            .placements
            .remove(&(event_id.to_string(), zone_id.to_string()))
            .map_or(0, |_| 1))
    }
}

// =============================================================================
// Seats
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySeatStore {
    seats: DashMap<String, Seat>,
    /// (event_id, zone_id, label) -> seat_id
    labels: DashMap<LabelKey, String>,
}

impl MemorySeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    fn label_key(seat: &Seat) -> LabelKey {
        (seat.event_id.clone(), seat.zone_id.clone(), seat.label.clone())
    }

    fn reserve_label(&self, seat: &Seat) -> RepoResult<()> {
        match self.labels.entry(Self::label_key(seat)) {
            Entry::Occupied(_) => Err(RepoError::Duplicate(format!(
                "Seat '{}' already exists in zone {}",
                seat.label, seat.zone_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(seat.id.clone());
                Ok(())
            }
        }
    }

    fn remove_where(&self, keep: impl Fn(&Seat) -> bool) -> u64 {
        let doomed: Vec<String> = self
            .seats
            .iter()
            .filter(|s| !keep(s.value()))
            .map(|s| s.id.clone())
            .collect();
        let mut removed = 0;
        for id in doomed {
            if let Some((_, seat)) = self.seats.remove(&id) {
                self.labels.remove(&Self::label_key(&seat));
                removed += 1;
            }
        }
        removed
    }
}

#[async_trait]
impl SeatStore for MemorySeatStore {
    async fn create(&self, seat: Seat) -> RepoResult<()> {
        if self.seats.contains_key(&seat.id) {
            return Err(RepoError::Duplicate(format!("Seat {} already exists", seat.id)));
        }
        self.reserve_label(&seat)?;
        self.seats.insert(seat.id.clone(), seat);
        Ok(())
    }

    async fn insert_many(&self, seats: Vec<Seat>) -> RepoResult<u64> {
        // All-or-nothing: release every reserved label if one collides
        for (i, seat) in seats.iter().enumerate() {
            if let Err(e) = self.reserve_label(seat) {
                for reserved in &seats[..i] {
                    self.labels.remove(&Self::label_key(reserved));
                }
                return Err(e);
            }
        }
        let count = seats.len() as u64;
        for seat in seats {
            self.seats.insert(seat.id.clone(), seat);
        }
        Ok(count)
    }

    async fn find(&self, seat_id: &str) -> RepoResult<Option<Seat>> {
        Ok(self.seats.get(seat_id).map(|s| s.clone()))
    }

    async fn find_by_label(
        &self,
        event_id: &str,
        zone_id: &str,
        label: &str,
    ) -> RepoResult<Option<Seat>> {
        let key = (event_id.to_string(), zone_id.to_string(), label.to_string());
        let Some(seat_id) = self.labels.get(&key).map(|id| id.clone()) else {
            return Ok(None);
        };
        Ok(self.seats.get(&seat_id).map(|s| s.clone()))
    }

    async fn update(&self, seat_id: &str, patch: SeatPatch) -> RepoResult<bool> {
        let Some(current) = self.seats.get(seat_id).map(|s| s.clone()) else {
            return Ok(false);
        };
        let mut next = current.clone();
        patch.apply_to(&mut next);

        if next.label != current.label {
            self.reserve_label(&next)?;
            self.labels.remove(&Self::label_key(&current));
        }
        self.seats.insert(next.id.clone(), next);
        Ok(true)
    }

    async fn delete(&self, seat_id: &str) -> RepoResult<bool> {
        match self.seats.remove(seat_id) {
            Some((_, seat)) => {
                self.labels.remove(&Self::label_key(&seat));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        Ok(self.remove_where(|s| !s.belongs_to(event_id, zone_id)))
    }

    async fn delete_available_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        Ok(self.remove_where(|s| !(s.belongs_to(event_id, zone_id) && s.is_available())))
    }

    async fn list_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<Vec<Seat>> {
        let mut seats: Vec<Seat> = self
            .seats
            .iter()
            .filter(|s| s.belongs_to(event_id, zone_id))
            .map(|s| s.clone())
            .collect();
        sort_seats(&mut seats);
        Ok(seats)
    }

    async fn count_by_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<u64> {
        Ok(self
            .seats
            .iter()
            .filter(|s| s.belongs_to(event_id, zone_id))
            .count() as u64)
    }

    async fn exists_for_zone(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        Ok(self.seats.iter().any(|s| s.belongs_to(event_id, zone_id)))
    }
}

// =============================================================================
// Venues
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryVenueLookup {
    venues: DashMap<String, Venue>,
}

impl MemoryVenueLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, venue: Venue) {
        self.venues.insert(venue.id.clone(), venue);
    }
}

#[async_trait]
impl VenueLookup for MemoryVenueLookup {
    async fn get(&self, venue_id: &str) -> RepoResult<Option<Venue>> {
        Ok(self.venues.get(venue_id).map(|v| v.clone()))
    }
}
