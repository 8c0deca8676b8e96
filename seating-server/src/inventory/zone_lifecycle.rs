//! Zone lifecycle
//!
//! Create / update / delete of zones together with their placement block and
//! generated seats. None of the multi-store writes are transactional:
//!
//! - `create_zone` persists zone, then placement, then seats. A failure in a
//!   later step leaves the earlier writes in place.
//! - `delete_zone` removes seats, then the placement, then the zone. Every
//!   step is idempotent, so retrying a half-finished delete is safe.

use std::collections::HashSet;
use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::{
    PlacementUpdate, RegenerationSummary, Seat, ZONE_STATUS_ACTIVE, Zone, ZoneCreate, ZoneKind,
    ZoneNumbering, ZonePlacement, ZoneUpdate,
};
use shared::util::{name_key, new_id, now_millis};

use super::InventoryStores;
use super::error::{InventoryError, InventoryResult, Operation, RepoResultExt};
use super::seat_grid;
use crate::audit::{AuditAction, AuditLevel, AuditSink, NoopAuditSink};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};

/// Placement color when the caller does not pick one
pub const DEFAULT_ZONE_COLOR: &str = "#CCCCCC";

pub struct ZoneLifecycleManager {
    stores: InventoryStores,
    audit: Arc<dyn AuditSink>,
    default_color: String,
}

impl ZoneLifecycleManager {
    pub fn new(stores: InventoryStores) -> Self {
        Self {
            stores,
            audit: Arc::new(NoopAuditSink),
            default_color: DEFAULT_ZONE_COLOR.to_string(),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Create a zone, its placement block and (optionally) its seat grid.
    ///
    /// Returns the new zone id.
    pub async fn create_zone(&self, cmd: ZoneCreate) -> InventoryResult<String> {
        let event_id = cmd.event_id.clone();
        let name = cmd.name.clone();
        self.try_create_zone(cmd)
            .await
            .inspect_err(|e| e.log_failure(&event_id, &name))
    }

    async fn try_create_zone(&self, cmd: ZoneCreate) -> InventoryResult<String> {
        const OP: Operation = Operation::ZoneCreate;

        validate_required_text(&cmd.event_id, "event_id", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&cmd.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(cmd.status.as_deref(), "status", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(cmd.color.as_deref(), "color", MAX_SHORT_TEXT_LEN)?;

        // 1. venue
        if !self.stores.venues.exists(&cmd.venue_id).await.during(OP)? {
            return Err(InventoryError::validation(
                ErrorCode::VenueNotFound,
                format!("Venue {} not found", cmd.venue_id),
            ));
        }

        // 2. name (the unique index stays authoritative)
        let name = cmd.name.trim().to_string();
        if self
            .stores
            .zones
            .exists_by_name(&cmd.event_id, &name)
            .await
            .during(OP)?
        {
            return Err(InventoryError::validation(
                ErrorCode::ZoneNameExists,
                format!("Zone '{}' already exists for event {}", name, cmd.event_id),
            ));
        }

        // 3. kind-specific rules
        if cmd.kind == ZoneKind::Seated {
            check_seated_grid(cmd.capacity, &cmd.numbering)?;
        }

        // 4. zone
        let now = now_millis();
        let zone = Zone {
            id: new_id(),
            event_id: cmd.event_id,
            venue_id: cmd.venue_id,
            template_zone_id: cmd.template_zone_id,
            name_key: name_key(&name),
            name,
            kind: cmd.kind,
            capacity: cmd.capacity,
            numbering: cmd.numbering,
            price: cmd.price,
            status: non_blank(cmd.status).unwrap_or_else(|| ZONE_STATUS_ACTIVE.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.stores.zones.create(zone.clone()).await.during(OP)?;

        // 5. placement block
        let placement = ZonePlacement {
            id: new_id(),
            event_id: zone.event_id.clone(),
            venue_id: zone.venue_id.clone(),
            zone_id: zone.id.clone(),
            grid: cmd.grid,
            color: Some(non_blank(cmd.color).unwrap_or_else(|| self.default_color.clone())),
            z_index: cmd.z_index,
            visible: cmd.visible.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.stores.placements.create(placement).await.during(OP)?;

        // 6. seats
        let mut generated = 0;
        if cmd.auto_generate_seats && zone.kind.is_seated() {
            let seats: Vec<Seat> = seat_grid::generate(&zone, &zone.event_id).collect();
            generated = self
                .stores
                .seats
                .insert_many(seats)
                .await
                .during(OP)
                .inspect_err(|_| {
                    tracing::warn!(
                        event_id = %zone.event_id,
                        zone_id = %zone.id,
                        "Zone and placement persisted without seats"
                    );
                })?;
            self.audit.record(
                &zone.id,
                AuditLevel::Info,
                AuditAction::SeatsGenerated,
                format!("{generated} seats generated for zone '{}'", zone.name),
            );
        }

        self.audit.record(
            &zone.id,
            AuditLevel::Info,
            AuditAction::ZoneCreated,
            format!("Zone '{}' ({}) created", zone.name, zone.kind),
        );
        tracing::info!(
            event_id = %zone.event_id,
            zone_id = %zone.id,
            kind = %zone.kind,
            seats = generated,
            "Zone created"
        );
        Ok(zone.id)
    }

    /// Apply the present fields of `cmd` to the zone.
    ///
    /// `NotFound` when the zone does not exist for the event. A missing
    /// placement block only skips the layout change.
    pub async fn update_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        cmd: ZoneUpdate,
    ) -> InventoryResult<bool> {
        self.try_update_zone(event_id, zone_id, cmd)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_update_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        cmd: ZoneUpdate,
    ) -> InventoryResult<bool> {
        const OP: Operation = Operation::ZoneUpdate;

        if let Some(name) = &cmd.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(status) = &cmd.status {
            validate_required_text(status, "status", MAX_SHORT_TEXT_LEN)?;
        }
        validate_optional_text(cmd.color.as_deref(), "color", MAX_SHORT_TEXT_LEN)?;

        let mut zone = self.require_zone(event_id, zone_id, OP).await?;

        if let Some(name) = cmd.name {
            let key = name_key(&name);
            if key != zone.name_key
                && self
                    .stores
                    .zones
                    .exists_by_name(event_id, &name)
                    .await
                    .during(OP)?
            {
                return Err(InventoryError::validation(
                    ErrorCode::ZoneNameExists,
                    format!("Zone '{}' already exists for event {}", name.trim(), event_id),
                ));
            }
            zone.name = name.trim().to_string();
            zone.name_key = key;
        }
        if let Some(price) = cmd.price {
            zone.price = Some(price);
        }
        if let Some(status) = cmd.status {
            zone.status = status.trim().to_string();
        }
        zone.updated_at = now_millis();

        let modified = self.stores.zones.update(&zone).await.during(OP)?;

        let layout = PlacementUpdate {
            grid: cmd.grid,
            color: cmd.color,
            z_index: cmd.z_index,
            visible: cmd.visible,
        };
        if !layout.is_empty() {
            match self
                .stores
                .placements
                .find_by_zone(event_id, zone_id)
                .await
                .during(OP)?
            {
                Some(_) => {
                    self.stores
                        .placements
                        .update(event_id, zone_id, layout, zone.updated_at)
                        .await
                        .during(OP)?;
                }
                None => {
                    tracing::warn!(
                        event_id = %event_id,
                        zone_id = %zone_id,
                        "Zone has no placement block, layout change skipped"
                    );
                }
            }
        }

        if modified {
            self.audit.record(
                zone_id,
                AuditLevel::Info,
                AuditAction::ZoneUpdated,
                format!("Zone '{}' updated", zone.name),
            );
            tracing::info!(event_id = %event_id, zone_id = %zone_id, "Zone updated");
        }
        Ok(modified)
    }

    /// Cascading delete: seats, then placement, then the zone row.
    ///
    /// Returns `true` only if the zone row itself was removed.
    pub async fn delete_zone(&self, event_id: &str, zone_id: &str) -> InventoryResult<bool> {
        self.try_delete_zone(event_id, zone_id)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_delete_zone(&self, event_id: &str, zone_id: &str) -> InventoryResult<bool> {
        const OP: Operation = Operation::ZoneDelete;

        let seats = self
            .stores
            .seats
            .delete_by_zone(event_id, zone_id)
            .await
            .during(OP)?;
        let blocks = self
            .stores
            .placements
            .delete_by_zone(event_id, zone_id)
            .await
            .during(OP)?;
        let removed = self.stores.zones.delete(event_id, zone_id).await.during(OP)?;

        if removed {
            self.audit.record(
                zone_id,
                AuditLevel::Info,
                AuditAction::ZoneDeleted,
                format!("Zone deleted with {seats} seats"),
            );
            tracing::info!(
                event_id = %event_id,
                zone_id = %zone_id,
                seats,
                blocks,
                "Zone deleted"
            );
        } else {
            tracing::debug!(
                event_id = %event_id,
                zone_id = %zone_id,
                seats,
                blocks,
                "Zone already gone"
            );
        }
        Ok(removed)
    }

    /// Change the placement block on its own. `false` when there is no block.
    pub async fn update_placement(
        &self,
        event_id: &str,
        zone_id: &str,
        update: PlacementUpdate,
    ) -> InventoryResult<bool> {
        self.try_update_placement(event_id, zone_id, update)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_update_placement(
        &self,
        event_id: &str,
        zone_id: &str,
        update: PlacementUpdate,
    ) -> InventoryResult<bool> {
        const OP: Operation = Operation::PlacementUpdate;

        validate_optional_text(update.color.as_deref(), "color", MAX_SHORT_TEXT_LEN)?;

        let Some(block) = self
            .stores
            .placements
            .find_by_zone(event_id, zone_id)
            .await
            .during(OP)?
        else {
            return Ok(false);
        };

        let modified = self
            .stores
            .placements
            .update(event_id, zone_id, update, now_millis())
            .await
            .during(OP)?;
        if modified {
            self.audit.record(
                zone_id,
                AuditLevel::Info,
                AuditAction::PlacementUpdated,
                format!("Placement {} updated", block.id),
            );
        }
        Ok(modified)
    }

    /// Rebuild the seat grid of a seated zone.
    ///
    /// Seats that are still available are dropped and regenerated; labels
    /// held by reserved, sold or blocked seats are left alone.
    pub async fn regenerate_seats(
        &self,
        event_id: &str,
        zone_id: &str,
    ) -> InventoryResult<RegenerationSummary> {
        self.try_regenerate_seats(event_id, zone_id)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_regenerate_seats(
        &self,
        event_id: &str,
        zone_id: &str,
    ) -> InventoryResult<RegenerationSummary> {
        const OP: Operation = Operation::SeatRegenerate;

        let zone = self.require_zone(event_id, zone_id, OP).await?;
        if !zone.kind.is_seated() {
            return Err(InventoryError::validation(
                ErrorCode::ZoneNotSeated,
                format!("Zone '{}' is {}, not seated", zone.name, zone.kind),
            ));
        }
        check_seated_grid(zone.capacity, &zone.numbering)?;

        let removed = self
            .stores
            .seats
            .delete_available_by_zone(event_id, zone_id)
            .await
            .during(OP)?;
        let occupied: HashSet<String> = self
            .stores
            .seats
            .list_by_zone(event_id, zone_id)
            .await
            .during(OP)?
            .into_iter()
            .map(|s| s.label)
            .collect();

        let fresh: Vec<Seat> = seat_grid::generate(&zone, event_id)
            .filter(|s| !occupied.contains(&s.label))
            .collect();
        let inserted = if fresh.is_empty() {
            0
        } else {
            self.stores.seats.insert_many(fresh).await.during(OP)?
        };

        let summary = RegenerationSummary { removed, inserted };
        self.audit.record(
            zone_id,
            AuditLevel::Info,
            AuditAction::SeatsRegenerated,
            format!("{removed} seats removed, {inserted} inserted"),
        );
        tracing::info!(
            event_id = %event_id,
            zone_id = %zone_id,
            removed,
            inserted,
            kept = occupied.len(),
            "Seats regenerated"
        );
        Ok(summary)
    }

    async fn require_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        op: Operation,
    ) -> InventoryResult<Zone> {
        self.stores
            .zones
            .find(event_id, zone_id)
            .await
            .during(op)?
            .filter(|z| z.event_id == event_id)
            .ok_or_else(|| {
                InventoryError::not_found(
                    ErrorCode::ZoneNotFound,
                    format!("Zone {zone_id} not found for event {event_id}"),
                )
            })
    }
}

/// Seated zones need a positive grid whose size equals the capacity
fn check_seated_grid(capacity: u32, numbering: &ZoneNumbering) -> InventoryResult<()> {
    let (rows, columns) = (numbering.rows, numbering.columns);
    if rows <= 0 || columns <= 0 {
        return Err(InventoryError::validation(
            ErrorCode::ZoneGridInvalid,
            format!("Seated zone needs positive rows and columns, got {rows} x {columns}"),
        ));
    }
    if i64::from(rows) * i64::from(columns) != i64::from(capacity) {
        return Err(InventoryError::validation(
            ErrorCode::ZoneCapacityMismatch,
            format!("Capacity {capacity} does not match {rows} x {columns}"),
        ));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{PlacementStore, SeatStore, ZoneStore};
    use crate::inventory::test_support::{EVENT, Fixture, general_zone, seated_zone};
    use shared::models::{GridRect, SEAT_STATUS_SOLD, SeatPatch};

    fn manager(fx: &Fixture) -> ZoneLifecycleManager {
        ZoneLifecycleManager::new(fx.stores.clone()).with_audit(fx.audit.clone())
    }

    #[tokio::test]
    async fn test_create_seated_zone_generates_grid() {
        let fx = Fixture::new();
        let zone_id = manager(&fx)
            .create_zone(seated_zone("Platea", 2, 3, 6))
            .await
            .unwrap();

        let seats = fx.seats.list_by_zone(EVENT, &zone_id).await.unwrap();
        let labels: Vec<_> = seats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["A-1", "A-2", "A-3", "B-1", "B-2", "B-3"]);

        let block = fx.placements.find_by_zone(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(block.color.as_deref(), Some(DEFAULT_ZONE_COLOR));
        assert!(block.visible);

        let zone = fx.zones.find(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(zone.status, ZONE_STATUS_ACTIVE);
        assert_eq!(
            fx.audit.actions(),
            [AuditAction::SeatsGenerated, AuditAction::ZoneCreated]
        );
    }

    #[tokio::test]
    async fn test_capacity_mismatch_writes_nothing() {
        let fx = Fixture::new();
        let err = manager(&fx)
            .create_zone(seated_zone("Platea", 2, 3, 5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::DomainValidation {
                code: ErrorCode::ZoneCapacityMismatch,
                ..
            }
        ));
        assert!(fx.zones.inner.is_empty());
        assert!(fx.placements.is_empty());
        assert!(fx.seats.inner.is_empty());
    }

    #[tokio::test]
    async fn test_seated_zone_needs_positive_grid() {
        let fx = Fixture::new();
        let err = manager(&fx)
            .create_zone(seated_zone("Platea", 0, 3, 0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ZoneGridInvalid);
    }

    #[tokio::test]
    async fn test_unknown_venue_is_rejected() {
        let fx = Fixture::new();
        let mut cmd = seated_zone("Platea", 2, 3, 6);
        cmd.venue_id = "nowhere".into();
        let err = manager(&fx).create_zone(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::VenueNotFound);
        assert!(fx.zones.inner.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let fx = Fixture::new();
        let m = manager(&fx);
        m.create_zone(general_zone("Pista", 500)).await.unwrap();

        let err = m.create_zone(general_zone("  PISTA ", 300)).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::DomainValidation {
                code: ErrorCode::ZoneNameExists,
                ..
            }
        ));
        assert_eq!(fx.zones.inner.len(), 1);
    }

    #[tokio::test]
    async fn test_general_zone_never_gets_seats() {
        let fx = Fixture::new();
        let zone_id = manager(&fx)
            .create_zone(general_zone("Pista", 500))
            .await
            .unwrap();
        assert!(!fx.seats.exists_for_zone(EVENT, &zone_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_seat_failure_keeps_zone_and_placement() {
        let fx = Fixture::new();
        fx.seats.break_store();

        let err = manager(&fx)
            .create_zone(seated_zone("Platea", 2, 3, 6))
            .await
            .unwrap_err();

        assert!(err.is_infrastructure());
        assert_eq!(err.code(), ErrorCode::ZoneCreateFailed);
        assert_eq!(fx.zones.inner.len(), 1);
        assert_eq!(fx.placements.len(), 1);
        assert!(fx.seats.inner.is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_present_fields_only() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(seated_zone("Platea", 2, 3, 6)).await.unwrap();

        let grid = GridRect {
            start_row: 4,
            start_col: 1,
            row_span: 3,
            col_span: 6,
        };
        let modified = m
            .update_zone(
                EVENT,
                &zone_id,
                ZoneUpdate {
                    name: Some("  Platea Baja ".into()),
                    grid: Some(grid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(modified);

        let zone = fx.zones.find(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(zone.name, "Platea Baja");
        assert_eq!(zone.name_key, "platea baja");
        assert_eq!(zone.price, Some(45.0));
        assert_eq!(zone.status, ZONE_STATUS_ACTIVE);

        let block = fx.placements.find_by_zone(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(block.grid, grid);
        assert_eq!(block.color.as_deref(), Some(DEFAULT_ZONE_COLOR));
    }

    #[tokio::test]
    async fn test_update_without_placement_still_succeeds() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(general_zone("Pista", 100)).await.unwrap();
        fx.placements.delete_by_zone(EVENT, &zone_id).await.unwrap();

        let modified = m
            .update_zone(
                EVENT,
                &zone_id,
                ZoneUpdate {
                    status: Some(" bloqueada ".into()),
                    grid: Some(GridRect::default()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(modified);
        let zone = fx.zones.find(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(zone.status, "bloqueada");
    }

    #[tokio::test]
    async fn test_update_missing_zone_is_not_found() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(general_zone("Pista", 100)).await.unwrap();

        let err = m
            .update_zone("other-event", &zone_id, ZoneUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::NotFound {
                code: ErrorCode::ZoneNotFound,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_is_rejected() {
        let fx = Fixture::new();
        let m = manager(&fx);
        m.create_zone(general_zone("Pista", 100)).await.unwrap();
        let zone_id = m.create_zone(general_zone("Grada", 100)).await.unwrap();

        let err = m
            .update_zone(
                EVENT,
                &zone_id,
                ZoneUpdate {
                    name: Some("pista".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ZoneNameExists);
    }

    #[tokio::test]
    async fn test_rejected_update_writes_nothing() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(general_zone("Pista", 100)).await.unwrap();
        let before = fx.zones.find(EVENT, &zone_id).await.unwrap().unwrap();
        let block_before = fx.placements.find_by_zone(EVENT, &zone_id).await.unwrap();

        let err = m
            .update_zone(
                EVENT,
                &zone_id,
                ZoneUpdate {
                    name: Some("Renamed".into()),
                    price: Some(99.0),
                    color: Some("x".repeat(500)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::ArgumentInvalid { .. }));

        let err = m
            .update_zone(
                EVENT,
                &zone_id,
                ZoneUpdate {
                    name: Some("Renamed".into()),
                    status: Some("   ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::ArgumentInvalid { .. }));

        assert_eq!(fx.zones.find(EVENT, &zone_id).await.unwrap().unwrap(), before);
        assert_eq!(fx.placements.find_by_zone(EVENT, &zone_id).await.unwrap(), block_before);
        assert_eq!(fx.audit.actions(), [AuditAction::ZoneCreated]);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(seated_zone("Platea", 2, 3, 6)).await.unwrap();

        assert!(m.delete_zone(EVENT, &zone_id).await.unwrap());
        assert_eq!(fx.seats.count_by_zone(EVENT, &zone_id).await.unwrap(), 0);
        assert!(fx.placements.is_empty());
        assert!(fx.zones.inner.is_empty());

        assert!(!m.delete_zone(EVENT, &zone_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_failure_on_zone_row_leaves_orphan() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(seated_zone("Platea", 2, 3, 6)).await.unwrap();
        fx.zones.break_store();

        let err = m.delete_zone(EVENT, &zone_id).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Infrastructure {
                operation: Operation::ZoneDelete,
                ..
            }
        ));
        assert!(fx.seats.inner.is_empty());
        assert!(fx.placements.is_empty());
        assert_eq!(fx.zones.inner.len(), 1);
    }

    #[tokio::test]
    async fn test_update_placement_soft_miss() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(general_zone("Pista", 100)).await.unwrap();

        let update = PlacementUpdate {
            color: Some("#FF0000".into()),
            z_index: Some(3),
            ..Default::default()
        };
        assert!(m.update_placement(EVENT, &zone_id, update.clone()).await.unwrap());
        let block = fx.placements.find_by_zone(EVENT, &zone_id).await.unwrap().unwrap();
        assert_eq!(block.color.as_deref(), Some("#FF0000"));
        assert_eq!(block.z_index, Some(3));

        assert!(!m.update_placement(EVENT, "missing", update).await.unwrap());
    }

    #[tokio::test]
    async fn test_regenerate_keeps_sold_seats() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(seated_zone("Platea", 2, 3, 6)).await.unwrap();

        let sold = fx
            .seats
            .find_by_label(EVENT, &zone_id, "B-2")
            .await
            .unwrap()
            .unwrap();
        fx.seats
            .update(
                &sold.id,
                SeatPatch {
                    label: None,
                    status: Some(SEAT_STATUS_SOLD.into()),
                    metadata: None,
                    updated_at: now_millis(),
                },
            )
            .await
            .unwrap();

        let summary = m.regenerate_seats(EVENT, &zone_id).await.unwrap();
        assert_eq!(summary, RegenerationSummary { removed: 5, inserted: 5 });

        let seats = fx.seats.list_by_zone(EVENT, &zone_id).await.unwrap();
        assert_eq!(seats.len(), 6);
        let kept = seats.iter().find(|s| s.label == "B-2").unwrap();
        assert_eq!(kept.id, sold.id);
        assert_eq!(kept.status, SEAT_STATUS_SOLD);
    }

    #[tokio::test]
    async fn test_regenerate_rejects_general_zone() {
        let fx = Fixture::new();
        let m = manager(&fx);
        let zone_id = m.create_zone(general_zone("Pista", 100)).await.unwrap();

        let err = m.regenerate_seats(EVENT, &zone_id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ZoneNotSeated);

        let err = m.regenerate_seats(EVENT, "missing").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ZoneNotFound);
    }
}
