//! Read-side views assembled by the zone query service

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::placement::{GridRect, ZonePlacement};
use super::seat::Seat;
use super::zone::Zone;

/// Placement part of a zone view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementView {
    pub grid: GridRect,
    pub color: Option<String>,
    pub z_index: Option<i32>,
    pub visible: bool,
}

impl Default for PlacementView {
    /// Zeroed grid, visible; used when a zone has no placement block
    fn default() -> Self {
        Self {
            grid: GridRect::default(),
            color: None,
            z_index: None,
            visible: true,
        }
    }
}

impl From<ZonePlacement> for PlacementView {
    fn from(p: ZonePlacement) -> Self {
        Self {
            grid: p.grid,
            color: p.color,
            z_index: p.z_index,
            visible: p.visible,
        }
    }
}

/// Seat as exposed to readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: String,
    pub label: String,
    pub row_index: Option<i32>,
    pub column_index: Option<i32>,
    pub status: String,
    pub metadata: Option<HashMap<String, String>>,
}

impl From<Seat> for SeatView {
    fn from(s: Seat) -> Self {
        Self {
            id: s.id,
            label: s.label,
            row_index: s.row_index,
            column_index: s.column_index,
            status: s.status,
            metadata: s.metadata,
        }
    }
}

/// Zone + placement + optional seat list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneView {
    #[serde(flatten)]
    pub zone: Zone,
    pub placement: PlacementView,
    pub has_seats: bool,
    /// Only filled for seated zones when seats were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<Vec<SeatView>>,
}

/// Outcome of regenerating the seat grid of a seated zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerationSummary {
    /// Available seats removed before regeneration
    pub removed: u64,
    /// Seats inserted from the grid
    pub inserted: u64,
}
