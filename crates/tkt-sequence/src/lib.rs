//! tkt-sequence
//!
//! Missing-folio detection over tickets in arrival order.
//!
//! Architectural decisions:
//! - Arrival order is processing order, not folio order
//! - A forward gap always alerts and opens a short alert window
//! - Late arrivals fill gaps without moving the cursor
//! - Duplicate and range checks belong to the store, not here
//!
//! Pure deterministic logic. No IO, no wall-clock.

mod engine;
mod types;

pub use engine::observe_folio;
pub use types::*;
