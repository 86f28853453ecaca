use std::fmt;

use tkt_store::{format_cents, TicketStatus, TicketStore};

/// Per-status counts and sums for the current shift.
///
/// Cancelled amounts are tracked separately and never folded into `ok_amount_cents`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftStatistics {
    pub ok_count: usize,
    pub cancelled_count: usize,
    pub total_scanned: usize,
    pub ok_amount_cents: i64,
    pub cancelled_amount_cents: i64,
}

impl ShiftStatistics {
    pub fn from_store(store: &TicketStore) -> Self {
        store.iter().fold(Self::default(), |mut acc, t| {
            match t.status() {
                TicketStatus::Ok => {
                    acc.ok_count += 1;
                    acc.ok_amount_cents += t.amount_cents();
                }
                TicketStatus::Cancelled => {
                    acc.cancelled_count += 1;
                    acc.cancelled_amount_cents += t.amount_cents();
                }
            }
            acc.total_scanned += 1;
            acc
        })
    }
}

impl fmt::Display for ShiftStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ok={} ({}) cancelled={} ({}) total_scanned={}",
            self.ok_count,
            format_cents(self.ok_amount_cents),
            self.cancelled_count,
            format_cents(self.cancelled_amount_cents),
            self.total_scanned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tkt_store::Ticket;

    #[test]
    fn cancelled_counts_but_is_not_summed_into_ok() {
        let ts = NaiveDate::from_ymd_opt(2025, 10, 13)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut store = TicketStore::new();
        store
            .insert(Ticket::new(1, ts, 10_000, "a", TicketStatus::Ok))
            .unwrap();
        store
            .insert(Ticket::new(2, ts, 2_550, "b", TicketStatus::Ok))
            .unwrap();
        store
            .insert(Ticket::new(3, ts, 99_999, "c", TicketStatus::Cancelled))
            .unwrap();

        let s = ShiftStatistics::from_store(&store);
        assert_eq!(
            s,
            ShiftStatistics {
                ok_count: 2,
                cancelled_count: 1,
                total_scanned: 3,
                ok_amount_cents: 12_550,
                cancelled_amount_cents: 99_999
            }
        );
        assert_eq!(
            s.to_string(),
            "ok=2 ($125.50) cancelled=1 ($999.99) total_scanned=3"
        );
    }

    #[test]
    fn empty_store_is_all_zero() {
        assert_eq!(
            ShiftStatistics::from_store(&TicketStore::new()),
            ShiftStatistics::default()
        );
    }
}
