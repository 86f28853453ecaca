use tkt_sequence::SequenceState;
use tkt_store::{Shift, TicketStore};

/// Everything a station owns between two operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationState {
    pub shift: Shift,
    pub store: TicketStore,
    pub sequence: SequenceState,
}

impl ReconciliationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear tickets and tracker, flip the shift. Returns the new shift.
    pub fn reset_for_next_shift(&mut self) -> Shift {
        self.store.clear();
        self.sequence.reset();
        self.shift = self.shift.next();
        self.shift
    }
}
