//! Seat Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default status for a new seat
pub const SEAT_STATUS_AVAILABLE: &str = "disponible";
pub const SEAT_STATUS_RESERVED: &str = "reservado";
pub const SEAT_STATUS_SOLD: &str = "vendido";
pub const SEAT_STATUS_BLOCKED: &str = "bloqueado";

/// Seat entity (座位)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub event_id: String,
    pub zone_id: String,
    #[serde(default)]
    pub row_index: Option<i32>,
    #[serde(default)]
    pub column_index: Option<i32>,
    /// Unique within (event_id, zone_id)
    pub label: String,
    pub status: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Seat {
    pub fn is_available(&self) -> bool {
        self.status == SEAT_STATUS_AVAILABLE
    }

    /// Both foreign keys must agree; storage does not enforce them
    pub fn belongs_to(&self, event_id: &str, zone_id: &str) -> bool {
        self.event_id == event_id && self.zone_id == zone_id
    }
}

/// Create seat payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatCreate {
    pub event_id: String,
    pub zone_id: String,
    #[serde(default)]
    pub row_index: Option<i32>,
    #[serde(default)]
    pub column_index: Option<i32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

/// Update seat payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

/// Store-level patch: only the present fields are written, plus `updated_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    pub updated_at: i64,
}

impl SeatPatch {
    /// Apply this patch to an in-memory seat
    pub fn apply_to(&self, seat: &mut Seat) {
        if let Some(label) = &self.label {
            seat.label = label.clone();
        }
        if let Some(status) = &self.status {
            seat.status = status.clone();
        }
        if let Some(metadata) = &self.metadata {
            seat.metadata = Some(metadata.clone());
        }
        seat.updated_at = self.updated_at;
    }
}
