use std::collections::BTreeSet;

/// Arrivals that keep showing the alert after a gap is discovered.
pub const DEFAULT_ALERT_WINDOW: u32 = 3;

/// Policy config for gap alerts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Countdown value set when a forward gap is found.
    pub alert_window: u32,
}

impl SequenceConfig {
    pub fn defaults() -> Self {
        Self {
            alert_window: DEFAULT_ALERT_WINDOW,
        }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Tracker state (persisted with the shift).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceState {
    /// Highest folio of the contiguous run the cursor has advanced through.
    /// `None` until the first ticket of the shift.
    pub expected_next_folio: Option<u32>,

    /// Folios inferred to exist but never delivered.
    pub missing_folios: BTreeSet<u32>,

    /// Remaining arrivals for which the alert stays up.
    pub alert_countdown: u32,
}

impl SequenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the empty state of a new shift.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_missing(&self, folio: u32) -> bool {
        self.missing_folios.contains(&folio)
    }
}

/// Decision returned for each arrival.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceDecision {
    pub transition: Transition,
    /// Whether the operator should see the gap warning for this arrival.
    pub alert: bool,
}

/// Which transition the arrival took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// First ticket of the shift; sets the cursor.
    First,
    /// Exactly one above the cursor.
    Contiguous,
    /// Above the cursor by more than one. `first..=last` were marked missing.
    ForwardGap {
        first_missing: u32,
        last_missing: u32,
    },
    /// At or below the cursor. `filled_gap` is true when it was a known missing folio.
    Backfill { filled_gap: bool },
}
