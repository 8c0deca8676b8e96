//! Seat grid generation for seated zones
//!
//! [`generate`] returns a lazy iterator over the seats of a zone's
//! rows x columns grid, rows outer and columns inner. Zones that are not
//! seated, or whose grid disagrees with their capacity, yield nothing.

use std::iter::FusedIterator;

use shared::models::{SEAT_STATUS_AVAILABLE, Seat, Zone};
use shared::util::{new_id, now_millis};

use super::row_label;

/// Lazy row-major seat sequence of one zone
#[derive(Debug, Clone)]
pub struct SeatGrid<'a> {
    zone: &'a Zone,
    event_id: &'a str,
    rows: i32,
    columns: i32,
    row: i32,
    column: i32,
    row_label: String,
    now: i64,
}

/// Build the seat sequence for `zone` inside `event_id`
pub fn generate<'a>(zone: &'a Zone, event_id: &'a str) -> SeatGrid<'a> {
    let (rows, columns) = if zone.kind.is_seated() && zone.grid_matches_capacity() {
        (zone.numbering.rows, zone.numbering.columns)
    } else {
        (0, 0)
    };

    SeatGrid {
        zone,
        event_id,
        rows,
        columns,
        row: 0,
        column: 1,
        row_label: String::new(),
        now: now_millis(),
    }
}

impl SeatGrid<'_> {
    fn remaining(&self) -> usize {
        if self.row >= self.rows {
            return 0;
        }
        let full_rows = (self.rows - self.row - 1) as usize;
        let in_row = (self.columns - self.column + 1) as usize;
        full_rows * self.columns as usize + in_row
    }

    fn number_label(&self, column: i32) -> String {
        match self.zone.numbering.seat_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}{column}"),
            _ => column.to_string(),
        }
    }
}

impl Iterator for SeatGrid<'_> {
    type Item = Seat;

    fn next(&mut self) -> Option<Seat> {
        if self.row >= self.rows {
            return None;
        }
        if self.column == 1 {
            let seed = self.zone.numbering.row_prefix.as_deref().unwrap_or_default();
            self.row_label = row_label::encode(seed, self.row as u32);
        }

        let seat = Seat {
            id: new_id(),
            event_id: self.event_id.to_string(),
            zone_id: self.zone.id.clone(),
            row_index: Some(self.row),
            column_index: Some(self.column),
            label: format!("{}-{}", self.row_label, self.number_label(self.column)),
            status: SEAT_STATUS_AVAILABLE.to_string(),
            metadata: None,
            created_at: self.now,
            updated_at: self.now,
        };

        if self.column == self.columns {
            self.column = 1;
            self.row += 1;
        } else {
            self.column += 1;
        }
        Some(seat)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for SeatGrid<'_> {}

impl FusedIterator for SeatGrid<'_> {}
