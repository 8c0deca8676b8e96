//! 审计日志类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

/// Inventory mutations that leave an audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ZoneCreated,
    ZoneUpdated,
    ZoneDeleted,
    PlacementUpdated,
    SeatsGenerated,
    SeatsRegenerated,
    SeatCreated,
    SeatUpdated,
    SeatDeleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZoneCreated => "zone_created",
            Self::ZoneUpdated => "zone_updated",
            Self::ZoneDeleted => "zone_deleted",
            Self::PlacementUpdated => "placement_updated",
            Self::SeatsGenerated => "seats_generated",
            Self::SeatsRegenerated => "seats_regenerated",
            Self::SeatCreated => "seat_created",
            Self::SeatUpdated => "seat_updated",
            Self::SeatDeleted => "seat_deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request pushed onto the audit channel
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub entity_id: String,
    pub level: AuditLevel,
    pub action: AuditAction,
    pub message: String,
}

/// Stored audit entry (哈希链中的一环)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub sequence: u64,
    pub timestamp: i64,
    pub entity_id: String,
    pub level: AuditLevel,
    pub action: AuditAction,
    pub message: String,
    pub prev_hash: String,
    pub curr_hash: String,
}
