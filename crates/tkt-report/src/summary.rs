use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDateTime};
use tkt_store::{format_cents, Direction, RangeSlot, TicketStatus, TicketStore};

// ---------------------------------------------------------------------------
// Detailed range table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Ok,
    Cancelled,
    Missing,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Ok => "OK",
            RowStatus::Cancelled => "CANCELLED",
            RowStatus::Missing => "MISSING",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<TicketStatus> for RowStatus {
    fn from(s: TicketStatus) -> Self {
        match s {
            TicketStatus::Ok => RowStatus::Ok,
            TicketStatus::Cancelled => RowStatus::Cancelled,
        }
    }
}

/// Display-ready row of the detailed summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedRow {
    /// Zero padded to the shift's display width.
    pub folio: String,
    pub status: RowStatus,
    /// `HH:MM:SS`, or `---` for missing folios.
    pub time: String,
    /// `$1234.56`, or `---` for missing folios.
    pub amount: String,
    /// Only set for missing folios.
    pub camera_window: Option<String>,
}

const PLACEHOLDER: &str = "---";

/// One row per folio between the shift's lowest and highest folio.
pub fn detailed_summary(store: &TicketStore, scan_limit: u32) -> Vec<DetailedRow> {
    store
        .reconstruct_range_within(scan_limit)
        .into_iter()
        .map(|entry| {
            let folio = store.display_folio(entry.folio);
            match entry.slot {
                RangeSlot::Present {
                    status,
                    timestamp,
                    amount_cents,
                } => DetailedRow {
                    folio,
                    status: status.into(),
                    time: timestamp.format("%H:%M:%S").to_string(),
                    amount: format_cents(amount_cents),
                    camera_window: None,
                },
                RangeSlot::Missing { camera_window } => DetailedRow {
                    folio,
                    status: RowStatus::Missing,
                    time: PLACEHOLDER.to_string(),
                    amount: PLACEHOLDER.to_string(),
                    camera_window: Some(camera_window.label()),
                },
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Quick summary
// ---------------------------------------------------------------------------

/// Pad applied on both sides when both neighbours are known.
const QUICK_PAD_MINUTES: i64 = 5;
const QUICK_SPAN_MINUTES: i64 = 10;

/// Camera hint used by the quick text summary.
///
/// Differs from the detailed window: with both neighbours known the raw timestamps
/// are padded by five minutes each way instead of being floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickHint {
    Between {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Ten minutes starting at the earlier neighbour.
    From(NaiveDateTime),
    /// Ten minutes ending at the later neighbour.
    Until(NaiveDateTime),
    NoReference,
}

impl QuickHint {
    pub fn for_folio(store: &TicketStore, folio: u32, scan_limit: u32) -> Self {
        let prev = store.nearest_within(folio, Direction::Below, scan_limit);
        let next = store.nearest_within(folio, Direction::Above, scan_limit);
        let pad = Duration::minutes(QUICK_PAD_MINUTES);

        match (prev, next) {
            (Some(prev), Some(next)) => QuickHint::Between {
                start: prev.timestamp() - pad,
                end: next.timestamp() + pad,
            },
            (Some(prev), None) => QuickHint::From(prev.timestamp()),
            (None, Some(next)) => QuickHint::Until(next.timestamp()),
            (None, None) => QuickHint::NoReference,
        }
    }
}

impl fmt::Display for QuickHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuickHint::Between { start, end } => write!(
                f,
                "check cameras between {} and {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
            QuickHint::From(start) => write!(
                f,
                "check cameras from {} (+{QUICK_SPAN_MINUTES} min)",
                start.format("%H:%M")
            ),
            QuickHint::Until(end) => write!(
                f,
                "check cameras until {} (-{QUICK_SPAN_MINUTES} min)",
                end.format("%H:%M")
            ),
            QuickHint::NoReference => f.write_str("no time reference"),
        }
    }
}

pub const ALL_ACCOUNTED_FOR: &str = "OK - no missing tickets";

/// Short text listing every folio the tracker believes missing, with a camera hint.
pub fn quick_summary(store: &TicketStore, missing: &BTreeSet<u32>, scan_limit: u32) -> String {
    if missing.is_empty() {
        return ALL_ACCOUNTED_FOR.to_string();
    }

    let mut out = format!("MISSING TICKETS: {}\n\n", missing.len());
    for &folio in missing {
        let hint = QuickHint::for_folio(store, folio, scan_limit);
        out.push_str(&format!("Folio {}: {hint}\n", store.display_folio(folio)));
    }
    out
}
