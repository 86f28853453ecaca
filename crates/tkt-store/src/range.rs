use chrono::NaiveDateTime;

use crate::{CameraWindow, Direction, TicketStatus, TicketStore, DEFAULT_NEIGHBOUR_SCAN};

/// One folio of a reconstructed shift range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    pub folio: u32,
    pub slot: RangeSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSlot {
    Present {
        status: TicketStatus,
        timestamp: NaiveDateTime,
        amount_cents: i64,
    },
    /// Synthesized: no ticket was stored for this folio.
    Missing { camera_window: CameraWindow },
}

impl RangeEntry {
    pub fn is_missing(&self) -> bool {
        matches!(self.slot, RangeSlot::Missing { .. })
    }
}

impl TicketStore {
    /// Every folio from min to max inclusive, present or synthesized.
    pub fn reconstruct_range(&self) -> Vec<RangeEntry> {
        self.reconstruct_range_within(DEFAULT_NEIGHBOUR_SCAN)
    }

    /// As [`TicketStore::reconstruct_range`], looking at most `scan_limit` folios
    /// away for the camera-window neighbours.
    pub fn reconstruct_range_within(&self, scan_limit: u32) -> Vec<RangeEntry> {
        let (Some(min), Some(max)) = (self.min_folio(), self.max_folio()) else {
            return Vec::new();
        };

        (min..=max)
            .map(|folio| {
                let slot = match self.get(folio) {
                    Some(t) => RangeSlot::Present {
                        status: t.status(),
                        timestamp: t.timestamp(),
                        amount_cents: t.amount_cents(),
                    },
                    None => {
                        let prev = self.nearest_within(folio, Direction::Below, scan_limit);
                        let next = self.nearest_within(folio, Direction::Above, scan_limit);
                        RangeSlot::Missing {
                            camera_window: CameraWindow::detailed(
                                prev.map(|t| t.timestamp()),
                                next.map(|t| t.timestamp()),
                            ),
                        }
                    }
                };
                RangeEntry { folio, slot }
            })
            .collect()
    }
}
