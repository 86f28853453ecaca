//! tkt-station
//!
//! The controller a scanning station talks to.
//!
//! [`Station`] owns the single [`ReconciliationState`](tkt_persist::ReconciliationState)
//! of the process and exposes the operator operations: submit a code, submit a
//! cancellation, read statistics and summaries, close the shift. Parse and validation
//! failures come back as a failed [`SubmitOutcome`]; persistence failures are logged
//! and never change an outcome.
//!
//! Callers pass `now` explicitly so every operation is reproducible.

mod outcome;
mod station;

pub use outcome::{ScanError, SubmitOutcome};
pub use station::{ShiftClosure, Station};
