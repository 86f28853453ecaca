use std::fmt;

use tkt_parse::ParseError;
use tkt_store::StoreError;

/// Why a scan was rejected. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    InvalidCode(ParseError),
    DuplicateFolio { folio: String },
    OutOfRange(StoreError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidCode(e) => write!(f, "invalid code: {e}"),
            ScanError::DuplicateFolio { folio } => write!(f, "ticket {folio} already exists"),
            ScanError::OutOfRange(e) => write!(f, "out of range: {e}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::InvalidCode(e) => Some(e),
            ScanError::OutOfRange(e) => Some(e),
            ScanError::DuplicateFolio { .. } => None,
        }
    }
}

impl ScanError {
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InvalidCode(_) => "INVALID_CODE",
            ScanError::DuplicateFolio { .. } => "DUPLICATE_FOLIO",
            ScanError::OutOfRange(_) => "OUT_OF_RANGE",
        }
    }
}

/// What the operator sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub ok: bool,
    pub message: String,
    /// Keep the gap warning visible.
    pub alert: bool,
}

impl SubmitOutcome {
    pub fn accepted(message: impl Into<String>, alert: bool) -> Self {
        Self {
            ok: true,
            message: message.into(),
            alert,
        }
    }

    pub fn rejected(err: &ScanError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            alert: false,
        }
    }
}
