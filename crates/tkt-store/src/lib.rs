//! tkt-store
//!
//! Shift-scoped ticket storage.
//!
//! This crate owns the `Ticket` record, the shift identity, the folio-keyed
//! `TicketStore` with its uniqueness and range guards, and the dense range
//! reconstruction that synthesizes entries (with camera windows) for missing folios.
//!
//! It does **not** parse codes, track alert state, or touch the filesystem.

mod camera;
mod range;
mod store;
mod ticket;

pub use camera::{floor_to_minute, CameraWindow, CAMERA_SPAN_MINUTES};
pub use range::{RangeEntry, RangeSlot};
pub use store::{
    Direction, StoreError, TicketStore, DEFAULT_NEIGHBOUR_SCAN, DEFAULT_RANGE_TOLERANCE,
    FOLIO_MAX, FOLIO_MIN, MIN_DISPLAY_WIDTH,
};
pub use ticket::{format_cents, Shift, Ticket, TicketStatus};
