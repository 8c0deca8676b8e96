//! Zone Placement Model (zone 在场馆布局网格上的可视块)

use serde::{Deserialize, Serialize};

/// Rectangle on the venue layout grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub start_row: i32,
    pub start_col: i32,
    pub row_span: i32,
    pub col_span: i32,
}

/// Visual placement block, 1:1 with its zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePlacement {
    pub id: String,
    pub event_id: String,
    pub venue_id: String,
    pub zone_id: String,
    pub grid: GridRect,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub z_index: Option<i32>,
    pub visible: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial update of a placement block; absent fields stay untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl PlacementUpdate {
    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.color.is_none() && self.z_index.is_none() && self.visible.is_none()
    }
}
