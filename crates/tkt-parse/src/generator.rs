//! Standard code generation and strict validation.
//!
//! The standard format is `YYYYMMDDHHMMSS-FFF-MMMM.CC`. The parser accepts far more
//! than this; the validator here checks that a code is exactly standard, which is
//! what label printers should emit.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::scan::{datetime_from_compact14, matches_shape, number};

pub const STANDARD_FORMAT: &str = "YYYYMMDDHHMMSS-FFF-MMMM.CC";

const STANDARD_SHAPE: &str = "##############-###-####.##";

pub const MAX_STANDARD_FOLIO: u32 = 999;
pub const MAX_STANDARD_AMOUNT_CENTS: i64 = 999_999;

/// Fields decoded from a valid standard code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCode {
    pub timestamp: NaiveDateTime,
    pub folio: u32,
    pub amount_cents: i64,
}

/// One entry of a generated test sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub folio: u32,
    pub timestamp: NaiveDateTime,
    pub amount_cents: i64,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Not exactly `YYYYMMDDHHMMSS-FFF-MMMM.CC`.
    Shape,
    InvalidDateTime,
    FolioOutOfRange(u32),
    AmountOutOfRange(i64),
    /// A generated timestamp does not fit the calendar.
    TimestampOverflow { folio: u32 },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Shape => write!(f, "wrong format, expected {STANDARD_FORMAT}"),
            FormatError::InvalidDateTime => write!(f, "invalid date/time in code"),
            FormatError::FolioOutOfRange(folio) => {
                write!(f, "folio {folio} outside 001-{MAX_STANDARD_FOLIO:03}")
            }
            FormatError::AmountOutOfRange(cents) => write!(
                f,
                "amount {}.{:02} outside 0000.01-9999.99",
                cents / 100,
                cents % 100
            ),
            FormatError::TimestampOverflow { folio } => {
                write!(f, "timestamp for folio {folio} is out of range")
            }
        }
    }
}

impl std::error::Error for FormatError {}

fn amount_field(amount_cents: i64) -> String {
    format!("{:04}.{:02}", amount_cents / 100, amount_cents % 100)
}

/// `YYYYMMDDHHMMSS-FFF-MMMM.CC`.
pub fn standard_code(folio: u32, amount_cents: i64, at: NaiveDateTime) -> String {
    format!(
        "{}-{:03}-{}",
        at.format("%Y%m%d%H%M%S"),
        folio,
        amount_field(amount_cents)
    )
}

/// `HHMMSS-FFF-MMMM.CC`, the densest form the parser prefers.
pub fn compact_code(folio: u32, amount_cents: i64, at: NaiveDateTime) -> String {
    format!(
        "{}-{:03}-{}",
        at.format("%H%M%S"),
        folio,
        amount_field(amount_cents)
    )
}

pub fn validate_standard(code: &str) -> Result<StandardCode, FormatError> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != STANDARD_SHAPE.len() || !matches_shape(&chars, 0, STANDARD_SHAPE) {
        return Err(FormatError::Shape);
    }

    let timestamp = datetime_from_compact14(&code[0..14]).ok_or(FormatError::InvalidDateTime)?;

    let folio = number(&code[15..18]);
    if !(1..=MAX_STANDARD_FOLIO).contains(&folio) {
        return Err(FormatError::FolioOutOfRange(folio));
    }

    let amount_cents = i64::from(number(&code[19..23])) * 100 + i64::from(number(&code[24..26]));
    if !(1..=MAX_STANDARD_AMOUNT_CENTS).contains(&amount_cents) {
        return Err(FormatError::AmountOutOfRange(amount_cents));
    }

    Ok(StandardCode {
        timestamp,
        folio,
        amount_cents,
    })
}

/// Deterministic amounts between 45.25 and 350.74 keyed by folio.
fn sample_amount_cents(folio: u32) -> i64 {
    4_525 + (i64::from(folio) * 7_919) % 30_550
}

/// Standard codes for folios `1..=count`, `step_minutes` apart, leaving out `skip`.
pub fn test_sequence(
    count: u32,
    skip: Option<u32>,
    base: NaiveDateTime,
    step_minutes: i64,
) -> Result<Vec<GeneratedCode>, FormatError> {
    (1..=count)
        .filter(|folio| Some(*folio) != skip)
        .map(|folio| {
            let timestamp = step_minutes
                .checked_mul(i64::from(folio))
                .and_then(Duration::try_minutes)
                .and_then(|offset| base.checked_add_signed(offset))
                .ok_or(FormatError::TimestampOverflow { folio })?;
            let amount_cents = sample_amount_cents(folio);
            Ok(GeneratedCode {
                folio,
                timestamp,
                amount_cents,
                code: standard_code(folio, amount_cents, timestamp),
            })
        })
        .collect()
}
