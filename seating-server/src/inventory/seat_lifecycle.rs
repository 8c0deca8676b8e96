//! Seat lifecycle
//!
//! `create_seat` raises on every rejection. `update_seat` and `delete_seat`
//! answer `false` when the seat is not a member of the given event/zone, but
//! a label collision on update is still a hard error.

use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::{SEAT_STATUS_AVAILABLE, Seat, SeatCreate, SeatPatch, SeatUpdate, Zone};
use shared::util::{new_id, now_millis};

use super::InventoryStores;
use super::error::{InventoryError, InventoryResult, Operation, RepoResultExt};
use crate::audit::{AuditAction, AuditLevel, AuditSink, NoopAuditSink};
use crate::utils::validation::{MAX_LABEL_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};

pub struct SeatLifecycleManager {
    stores: InventoryStores,
    audit: Arc<dyn AuditSink>,
}

impl SeatLifecycleManager {
    pub fn new(stores: InventoryStores) -> Self {
        Self {
            stores,
            audit: Arc::new(NoopAuditSink),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Create one seat by hand. Returns the new seat id.
    pub async fn create_seat(&self, cmd: SeatCreate) -> InventoryResult<String> {
        let event_id = cmd.event_id.clone();
        let zone_id = cmd.zone_id.clone();
        self.try_create_seat(cmd)
            .await
            .inspect_err(|e| e.log_failure(&event_id, &zone_id))
    }

    async fn try_create_seat(&self, cmd: SeatCreate) -> InventoryResult<String> {
        const OP: Operation = Operation::SeatCreate;

        if self.member_zone(&cmd.event_id, &cmd.zone_id, OP).await?.is_none() {
            return Err(InventoryError::validation(
                ErrorCode::SeatZoneMismatch,
                format!(
                    "Zone {} not found or not part of event {}",
                    cmd.zone_id, cmd.event_id
                ),
            ));
        }

        let label = match cmd.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => {
                return Err(InventoryError::argument(
                    ErrorCode::SeatLabelRequired,
                    "Seat label is required",
                ));
            }
        };
        validate_optional_text(Some(&label), "label", MAX_LABEL_LEN)?;
        validate_optional_text(cmd.status.as_deref(), "status", MAX_SHORT_TEXT_LEN)?;

        self.ensure_label_free(&cmd.event_id, &cmd.zone_id, &label, OP)
            .await?;

        let now = now_millis();
        let status = cmd
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| SEAT_STATUS_AVAILABLE.to_string());
        let seat = Seat {
            id: new_id(),
            event_id: cmd.event_id,
            zone_id: cmd.zone_id,
            row_index: cmd.row_index,
            column_index: cmd.column_index,
            label,
            status,
            metadata: cmd.metadata,
            created_at: now,
            updated_at: now,
        };
        self.stores.seats.create(seat.clone()).await.during(OP)?;

        self.audit.record(
            &seat.id,
            AuditLevel::Info,
            AuditAction::SeatCreated,
            format!("Seat {} created in zone {}", seat.label, seat.zone_id),
        );
        tracing::info!(
            event_id = %seat.event_id,
            zone_id = %seat.zone_id,
            seat_id = %seat.id,
            label = %seat.label,
            "Seat created"
        );
        Ok(seat.id)
    }

    /// Partial update of label / status / metadata.
    ///
    /// Returns whether the store reported a modification.
    pub async fn update_seat(
        &self,
        event_id: &str,
        zone_id: &str,
        seat_id: &str,
        cmd: SeatUpdate,
    ) -> InventoryResult<bool> {
        self.try_update_seat(event_id, zone_id, seat_id, cmd)
            .await
            .inspect_err(|e| e.log_failure(event_id, seat_id))
    }

    async fn try_update_seat(
        &self,
        event_id: &str,
        zone_id: &str,
        seat_id: &str,
        cmd: SeatUpdate,
    ) -> InventoryResult<bool> {
        const OP: Operation = Operation::SeatUpdate;

        let Some(seat) = self.member_seat(event_id, zone_id, seat_id, OP).await? else {
            return Ok(false);
        };

        let mut patch = SeatPatch {
            label: None,
            status: None,
            metadata: cmd.metadata,
            updated_at: now_millis(),
        };

        if let Some(label) = cmd.label {
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(InventoryError::argument(
                    ErrorCode::SeatLabelRequired,
                    "Seat label must not be blank",
                ));
            }
            validate_optional_text(Some(&label), "label", MAX_LABEL_LEN)?;
            if label != seat.label {
                self.ensure_label_free(event_id, zone_id, &label, OP).await?;
            }
            patch.label = Some(label);
        }
        if let Some(status) = cmd.status {
            validate_optional_text(Some(&status), "status", MAX_SHORT_TEXT_LEN)?;
            patch.status = Some(status.trim().to_string());
        }

        let modified = self.stores.seats.update(seat_id, patch).await.during(OP)?;
        if modified {
            self.audit.record(
                seat_id,
                AuditLevel::Info,
                AuditAction::SeatUpdated,
                format!("Seat {} updated", seat.label),
            );
            tracing::info!(
                event_id = %event_id,
                zone_id = %zone_id,
                seat_id = %seat_id,
                "Seat updated"
            );
        }
        Ok(modified)
    }

    /// Returns whether a row was actually removed
    pub async fn delete_seat(
        &self,
        event_id: &str,
        zone_id: &str,
        seat_id: &str,
    ) -> InventoryResult<bool> {
        self.try_delete_seat(event_id, zone_id, seat_id)
            .await
            .inspect_err(|e| e.log_failure(event_id, seat_id))
    }

    async fn try_delete_seat(
        &self,
        event_id: &str,
        zone_id: &str,
        seat_id: &str,
    ) -> InventoryResult<bool> {
        const OP: Operation = Operation::SeatDelete;

        let Some(seat) = self.member_seat(event_id, zone_id, seat_id, OP).await? else {
            return Ok(false);
        };

        let removed = self.stores.seats.delete(seat_id).await.during(OP)?;
        if removed {
            self.audit.record(
                seat_id,
                AuditLevel::Info,
                AuditAction::SeatDeleted,
                format!("Seat {} deleted from zone {zone_id}", seat.label),
            );
            tracing::info!(
                event_id = %event_id,
                zone_id = %zone_id,
                seat_id = %seat_id,
                "Seat deleted"
            );
        }
        Ok(removed)
    }

    /// Zone of the event, checked on both keys
    async fn member_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        op: Operation,
    ) -> InventoryResult<Option<Zone>> {
        Ok(self
            .stores
            .zones
            .find(event_id, zone_id)
            .await
            .during(op)?
            .filter(|z| z.event_id == event_id))
    }

    /// Seat that belongs to the given event and zone, `None` otherwise
    async fn member_seat(
        &self,
        event_id: &str,
        zone_id: &str,
        seat_id: &str,
        op: Operation,
    ) -> InventoryResult<Option<Seat>> {
        if self.member_zone(event_id, zone_id, op).await?.is_none() {
            tracing::debug!(event_id = %event_id, zone_id = %zone_id, "Zone not in event");
            return Ok(None);
        }
        let seat = self
            .stores
            .seats
            .find(seat_id)
            .await
            .during(op)?
            .filter(|s| s.belongs_to(event_id, zone_id));
        if seat.is_none() {
            tracing::debug!(
                event_id = %event_id,
                zone_id = %zone_id,
                seat_id = %seat_id,
                "Seat not in zone"
            );
        }
        Ok(seat)
    }

    async fn ensure_label_free(
        &self,
        event_id: &str,
        zone_id: &str,
        label: &str,
        op: Operation,
    ) -> InventoryResult<()> {
        let taken = self
            .stores
            .seats
            .find_by_label(event_id, zone_id, label)
            .await
            .during(op)?
            .is_some();
        if taken {
            return Err(InventoryError::validation(
                ErrorCode::SeatLabelExists,
                format!("Seat label '{label}' already exists in zone {zone_id}"),
            ));
        }
        Ok(())
    }
}
