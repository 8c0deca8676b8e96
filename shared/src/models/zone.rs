//! Zone Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::placement::GridRect;

/// Default status for a newly created zone
pub const ZONE_STATUS_ACTIVE: &str = "activa";
/// Zone hidden from sale but kept in the layout
pub const ZONE_STATUS_BLOCKED: &str = "bloqueada";
/// Zone hidden from the layout
pub const ZONE_STATUS_HIDDEN: &str = "oculta";

/// Zone kind (生成/校验规则按 kind 分派)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Standing / general admission, no individual seats
    #[serde(rename = "general")]
    General,
    /// Seated grid, seats may be generated from rows × columns
    #[serde(rename = "sentado")]
    Seated,
    /// Seats are placed by hand
    #[serde(rename = "manual")]
    Manual,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Seated => "sentado",
            Self::Manual => "manual",
        }
    }

    pub fn is_seated(&self) -> bool {
        matches!(self, Self::Seated)
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "sentado" => Ok(Self::Seated),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown zone kind: {other}")),
        }
    }
}

/// Seat numbering descriptor of a zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneNumbering {
    /// Free-form numbering mode (e.g. "filas")
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub rows: i32,
    #[serde(default)]
    pub columns: i32,
    /// Row label seed; a leading letter selects alphabetic row labels
    #[serde(default)]
    pub row_prefix: Option<String>,
    /// Prepended to the seat number inside a row
    #[serde(default)]
    pub seat_prefix: Option<String>,
}

/// Zone entity (场馆分区)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub event_id: String,
    pub venue_id: String,
    /// Zone of a venue template this zone was copied from
    #[serde(default)]
    pub template_zone_id: Option<String>,
    pub name: String,
    /// Trimmed, lower-cased name; unique per event
    pub name_key: String,
    pub kind: ZoneKind,
    pub capacity: u32,
    #[serde(default)]
    pub numbering: ZoneNumbering,
    #[serde(default)]
    pub price: Option<f64>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Zone {
    /// Seated zones must hold exactly rows × columns seats
    pub fn grid_matches_capacity(&self) -> bool {
        let rows = i64::from(self.numbering.rows);
        let columns = i64::from(self.numbering.columns);
        rows > 0 && columns > 0 && rows * columns == i64::from(self.capacity)
    }
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub event_id: String,
    pub venue_id: String,
    #[serde(default)]
    pub template_zone_id: Option<String>,
    pub name: String,
    pub kind: ZoneKind,
    pub capacity: u32,
    #[serde(default)]
    pub numbering: ZoneNumbering,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub grid: GridRect,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub auto_generate_seats: bool,
}

/// Update zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New layout rectangle; only touches the placement block when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// In-memory filters for zone listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneFilter {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub include_seats: bool,
}
