//! tkt-report
//!
//! Operator-facing views derived from a shift's tickets:
//! - per-status totals ([`ShiftStatistics`])
//! - the detailed range table with camera windows ([`detailed_summary`])
//! - the quick missing-ticket text ([`quick_summary`])
//! - the closing report and the 32-column print slip
//!
//! Everything here is a pure function of the store (plus the tracker's missing set and
//! a caller-supplied `now`), except [`write_report`] which publishes the closing report
//! file.

mod closing;
mod stats;
mod summary;

pub use closing::{closing_report, print_slip, report_file_name, write_report, SLIP_WIDTH};
pub use stats::ShiftStatistics;
pub use summary::{
    detailed_summary, quick_summary, DetailedRow, QuickHint, RowStatus, ALL_ACCOUNTED_FOR,
};
