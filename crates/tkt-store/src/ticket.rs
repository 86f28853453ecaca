use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Operating period. Toggles at every shift close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
        }
    }

    /// The shift that follows this one.
    pub fn next(&self) -> Self {
        match self {
            Shift::Morning => Shift::Afternoon,
            Shift::Afternoon => Shift::Morning,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Ok,
    /// Kept for audit; excluded from monetary totals.
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Ok => "OK",
            TicketStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scanned ticket.
///
/// Fields are private: once built, a ticket never changes. Status is chosen at
/// construction, which happens right before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    folio: u32,
    timestamp: NaiveDateTime,
    amount_cents: i64,
    raw_source: String,
    status: TicketStatus,
}

impl Ticket {
    pub fn new(
        folio: u32,
        timestamp: NaiveDateTime,
        amount_cents: i64,
        raw_source: impl Into<String>,
        status: TicketStatus,
    ) -> Self {
        Self {
            folio,
            timestamp,
            amount_cents,
            raw_source: raw_source.into(),
            status,
        }
    }

    pub fn folio(&self) -> u32 {
        self.folio
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// The scanned text the ticket was built from.
    pub fn raw_source(&self) -> &str {
        &self.raw_source
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TicketStatus::Cancelled
    }
}

/// `$1234.56`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
