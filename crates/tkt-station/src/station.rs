use std::path::PathBuf;

use chrono::NaiveDateTime;
use tkt_config::StationConfig;
use tkt_parse::parse_code;
use tkt_persist::{ReconciliationState, SnapshotStore};
use tkt_report::{DetailedRow, ShiftStatistics};
use tkt_sequence::{observe_folio, SequenceConfig, Transition};
use tkt_store::{format_cents, Shift, StoreError, Ticket, TicketStatus};

use crate::{ScanError, SubmitOutcome};

/// Result of closing a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftClosure {
    pub report_text: String,
    /// `None` when the report file could not be written (the failure is logged).
    pub report_path: Option<PathBuf>,
    pub closed_shift: Shift,
    pub next_shift: Shift,
}

struct Accepted {
    folio: String,
    amount_cents: i64,
    alert: bool,
    missing_now: usize,
}

/// Single owner of the reconciliation state of one scanning station.
pub struct Station {
    cfg: StationConfig,
    seq_cfg: SequenceConfig,
    snapshot: SnapshotStore,
    state: ReconciliationState,
}

impl Station {
    /// Open the station, restoring the last snapshot from `cfg.data_file` if usable.
    pub fn open(cfg: StationConfig) -> Self {
        let snapshot = SnapshotStore::new(&cfg.data_file);
        let state = snapshot.load();
        tracing::info!(
            shift = %state.shift,
            tickets = state.store.len(),
            missing = state.sequence.missing_folios.len(),
            "station opened"
        );
        Self::with_state(cfg, state)
    }

    /// Start from an explicit state; saves still go to `cfg.data_file`.
    pub fn with_state(cfg: StationConfig, state: ReconciliationState) -> Self {
        let seq_cfg = SequenceConfig {
            alert_window: cfg.alert_window,
        };
        Self {
            snapshot: SnapshotStore::new(&cfg.data_file),
            seq_cfg,
            cfg,
            state,
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.cfg
    }

    pub fn state(&self) -> &ReconciliationState {
        &self.state
    }

    pub fn shift(&self) -> Shift {
        self.state.shift
    }

    // ---------------------------------------------------------------------
    // Scanning
    // ---------------------------------------------------------------------

    pub fn submit_ticket(&mut self, raw_code: &str, now: NaiveDateTime) -> SubmitOutcome {
        match self.scan(raw_code, now, TicketStatus::Ok) {
            Ok(a) => {
                let mut message = format!(
                    "Ticket {} recorded ({})",
                    a.folio,
                    format_cents(a.amount_cents)
                );
                if a.alert {
                    message.push_str(&format!(" - {} missing ticket(s)", a.missing_now));
                }
                SubmitOutcome::accepted(message, a.alert)
            }
            Err(err) => SubmitOutcome::rejected(&err),
        }
    }

    /// Record a voided ticket. It closes a gap like any other folio but never raises
    /// the alert.
    pub fn submit_cancelled(&mut self, raw_code: &str, now: NaiveDateTime) -> SubmitOutcome {
        match self.scan(raw_code, now, TicketStatus::Cancelled) {
            Ok(a) => SubmitOutcome::accepted(
                format!(
                    "Ticket {} recorded as CANCELLED ({} not added)",
                    a.folio,
                    format_cents(a.amount_cents)
                ),
                false,
            ),
            Err(err) => SubmitOutcome::rejected(&err),
        }
    }

    fn scan(
        &mut self,
        raw_code: &str,
        now: NaiveDateTime,
        status: TicketStatus,
    ) -> Result<Accepted, ScanError> {
        let parsed = parse_code(raw_code, now).map_err(|e| {
            tracing::warn!(code = raw_code, error = %e, "scan rejected: invalid code");
            ScanError::InvalidCode(e)
        })?;
        tracing::debug!(
            folio = parsed.folio,
            grammar = %parsed.grammar,
            "code parsed"
        );

        let ticket = Ticket::new(
            parsed.folio,
            parsed.timestamp,
            parsed.amount_cents,
            parsed.raw_source,
            status,
        );

        let inserted = self
            .state
            .store
            .insert_with_tolerance(ticket, self.cfg.range_tolerance)
            .map(|t| (t.folio(), t.amount_cents()));
        let (folio, amount_cents) = match inserted {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(code = raw_code, error = %e, "scan rejected");
                return Err(match e {
                    StoreError::DuplicateFolio { folio } => ScanError::DuplicateFolio {
                        folio: self.state.store.display_folio(folio),
                    },
                    other => ScanError::OutOfRange(other),
                });
            }
        };

        let decision = observe_folio(&self.seq_cfg, &mut self.state.sequence, folio);
        if let Transition::ForwardGap {
            first_missing,
            last_missing,
        } = decision.transition
        {
            tracing::warn!(folio, first_missing, last_missing, "sequence gap detected");
        }

        let alert = decision.alert && status == TicketStatus::Ok;
        tracing::info!(
            folio,
            status = %status,
            amount_cents,
            alert,
            "ticket accepted"
        );

        self.persist();

        Ok(Accepted {
            folio: self.state.store.display_folio(folio),
            amount_cents,
            alert,
            missing_now: self.state.sequence.missing_folios.len(),
        })
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn shift_statistics(&self) -> ShiftStatistics {
        ShiftStatistics::from_store(&self.state.store)
    }

    pub fn detailed_summary(&self) -> Vec<DetailedRow> {
        tkt_report::detailed_summary(&self.state.store, self.cfg.neighbour_scan_limit)
    }

    pub fn quick_summary(&self) -> String {
        tkt_report::quick_summary(
            &self.state.store,
            &self.state.sequence.missing_folios,
            self.cfg.neighbour_scan_limit,
        )
    }

    pub fn print_slip(&self, now: NaiveDateTime) -> String {
        tkt_report::print_slip(
            &self.state.store,
            self.state.shift,
            now,
            self.cfg.neighbour_scan_limit,
        )
    }

    // ---------------------------------------------------------------------
    // Shift close
    // ---------------------------------------------------------------------

    /// Write the closing report, then start the next shift with an empty store and
    /// tracker and persist that.
    pub fn close_shift(&mut self, now: NaiveDateTime) -> ShiftClosure {
        let closed_shift = self.state.shift;
        let report_text = tkt_report::closing_report(
            &self.state.store,
            &self.state.sequence.missing_folios,
            closed_shift,
            now,
            self.cfg.neighbour_scan_limit,
        );

        let reports_dir = &self.cfg.reports_dir;
        let written = tkt_report::write_report(reports_dir, closed_shift, now, &report_text);
        let report_path = match written {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "closing report not written");
                None
            }
        };

        let stats = self.shift_statistics();
        let next_shift = self.state.reset_for_next_shift();
        self.persist();

        tracing::info!(
            closed = %closed_shift,
            next = %next_shift,
            ok = stats.ok_count,
            cancelled = stats.cancelled_count,
            report = ?report_path,
            "shift closed"
        );

        ShiftClosure {
            report_text,
            report_path,
            closed_shift,
            next_shift,
        }
    }

    fn persist(&self) {
        if let Err(err) = self.snapshot.save(&self.state) {
            tracing::error!(
                path = %self.snapshot.path().display(),
                error = %format!("{err:#}"),
                "snapshot save failed; continuing in memory"
            );
        }
    }
}
