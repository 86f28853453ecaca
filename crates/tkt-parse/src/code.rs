use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Output type
// ---------------------------------------------------------------------------

/// Which grammar recognised a code. Reported for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `HHMMSS` + 3-4 digit folio + `MMMM.CC`, separators ignored.
    CompactDecimal,
    /// Same field widths as [`Grammar::CompactDecimal`] without the decimal point.
    CompactDigits,
    /// `YYYYMMDDHHMMSS` + 3 digit folio + decimal amount, delimited.
    LongForm,
    /// Independent field search with defaults.
    Heuristic,
}

impl Grammar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grammar::CompactDecimal => "compact_decimal",
            Grammar::CompactDigits => "compact_digits",
            Grammar::LongForm => "long_form",
            Grammar::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket candidate extracted from a scanned code.
///
/// Status is not part of the code; the caller decides it when inserting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCode {
    /// Folio with leading zeros removed. Always >= 1.
    pub folio: u32,
    /// Whole-second timestamp, either decoded or defaulted to `now`.
    pub timestamp: NaiveDateTime,
    /// Amount in cents (1/100 of the currency unit). Never negative.
    pub amount_cents: i64,
    /// The scanned text with surrounding whitespace removed.
    pub raw_source: String,
    pub grammar: Grammar,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Reasons a scanned code cannot become a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than [`crate::MIN_NORMALIZED_LEN`] digits and decimal points.
    TooShort { normalized_len: usize },
    /// A strict grammar matched but its date/time fields are not a real calendar value.
    InvalidDateTime { raw: String },
    /// The decoded folio is zero.
    ZeroFolio,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooShort { normalized_len } => write!(
                f,
                "code too short: {normalized_len} digit(s), need at least {}",
                crate::MIN_NORMALIZED_LEN
            ),
            ParseError::InvalidDateTime { raw } => write!(f, "invalid date/time field: '{raw}'"),
            ParseError::ZeroFolio => write!(f, "folio must be >= 1"),
        }
    }
}

impl std::error::Error for ParseError {}
