use std::collections::BTreeMap;
use std::fmt;

use crate::Ticket;

/// A new folio may sit at most this far outside the stored range.
pub const DEFAULT_RANGE_TOLERANCE: u32 = 10;
/// Steps [`TicketStore::nearest`] walks before giving up.
pub const DEFAULT_NEIGHBOUR_SCAN: u32 = 100;
pub const FOLIO_MIN: u32 = 1;
pub const FOLIO_MAX: u32 = 9999;
pub const MIN_DISPLAY_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateFolio { folio: u32 },
    /// Folio lies more than `tolerance` outside `min..=max`.
    OutOfRange {
        folio: u32,
        min: u32,
        max: u32,
        tolerance: u32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateFolio { folio } => {
                write!(f, "folio {folio} already present in this shift")
            }
            StoreError::OutOfRange {
                folio,
                min,
                max,
                tolerance,
            } => write!(
                f,
                "folio {folio} is more than {tolerance} outside the shift range {min}..={max}"
            ),
        }
    }
}

impl std::error::Error for StoreError {}

/// Search direction for [`TicketStore::nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Below,
    Above,
}

/// Tickets of the current shift keyed by folio.
///
/// Grows monotonically during a shift and is cleared at close. Iteration is in
/// ascending folio order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketStore {
    tickets: BTreeMap<u32, Ticket>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted tickets. Only uniqueness is enforced; the
    /// range guard applied at scan time is not replayed.
    pub fn restore(tickets: impl IntoIterator<Item = Ticket>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for ticket in tickets {
            let folio = ticket.folio();
            if store.tickets.insert(folio, ticket).is_some() {
                return Err(StoreError::DuplicateFolio { folio });
            }
        }
        Ok(store)
    }

    /// Insert with the default range tolerance.
    pub fn insert(&mut self, ticket: Ticket) -> Result<&Ticket, StoreError> {
        self.insert_with_tolerance(ticket, DEFAULT_RANGE_TOLERANCE)
    }

    /// Insert a new ticket. Nothing is modified on error.
    pub fn insert_with_tolerance(
        &mut self,
        ticket: Ticket,
        tolerance: u32,
    ) -> Result<&Ticket, StoreError> {
        let folio = ticket.folio();

        if self.tickets.contains_key(&folio) {
            return Err(StoreError::DuplicateFolio { folio });
        }

        if let (Some(min), Some(max)) = (self.min_folio(), self.max_folio()) {
            if folio.saturating_add(tolerance) < min || folio > max.saturating_add(tolerance) {
                return Err(StoreError::OutOfRange {
                    folio,
                    min,
                    max,
                    tolerance,
                });
            }
        }

        Ok(self.tickets.entry(folio).or_insert(ticket))
    }

    pub fn get(&self, folio: u32) -> Option<&Ticket> {
        self.tickets.get(&folio)
    }

    pub fn contains(&self, folio: u32) -> bool {
        self.tickets.contains_key(&folio)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn min_folio(&self) -> Option<u32> {
        self.tickets.keys().next().copied()
    }

    pub fn max_folio(&self) -> Option<u32> {
        self.tickets.keys().next_back().copied()
    }

    /// Tickets in ascending folio order.
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
    }

    /// Zero-pad width: digits of the largest folio, at least 3.
    pub fn display_width(&self) -> usize {
        self.max_folio()
            .map(|max| max.to_string().len())
            .unwrap_or(0)
            .max(MIN_DISPLAY_WIDTH)
    }

    pub fn display_folio(&self, folio: u32) -> String {
        format!("{:0width$}", folio, width = self.display_width())
    }

    /// First stored ticket walking away from `folio`, within the default scan limit.
    pub fn nearest(&self, folio: u32, direction: Direction) -> Option<&Ticket> {
        self.nearest_within(folio, direction, DEFAULT_NEIGHBOUR_SCAN)
    }

    /// First stored ticket at most `limit` steps away from `folio` in `direction`,
    /// never leaving `FOLIO_MIN..=FOLIO_MAX`.
    pub fn nearest_within(&self, folio: u32, direction: Direction, limit: u32) -> Option<&Ticket> {
        (1..=limit)
            .map_while(|step| {
                let candidate = match direction {
                    Direction::Below => folio.checked_sub(step)?,
                    Direction::Above => folio.checked_add(step)?,
                };
                (FOLIO_MIN..=FOLIO_MAX)
                    .contains(&candidate)
                    .then_some(candidate)
            })
            .find_map(|candidate| self.tickets.get(&candidate))
    }
}
