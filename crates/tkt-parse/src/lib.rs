//! tkt-parse
//!
//! Tolerant parsing of scanned ticket codes.
//!
//! A scanned string is tried against an ordered list of grammars, first match wins:
//! - compact `HHMMSS FFF MMMM.CC` (with the decimal point)
//! - compact `HHMMSS FFF MMMMCC` (digits only)
//! - long-form `YYYYMMDDHHMMSS-FFF-MMMM.CC` found anywhere in the text
//! - heuristic field extraction, which defaults whatever it cannot find
//!
//! Pure deterministic logic. No IO, no wall-clock: the caller supplies `now`.

mod code;
pub mod generator;
mod grammar;
mod scan;

pub use code::{Grammar, ParseError, ParsedCode};
pub use grammar::{parse_code, MIN_NORMALIZED_LEN};
