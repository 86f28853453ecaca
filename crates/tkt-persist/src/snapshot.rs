use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tkt_sequence::SequenceState;
use tkt_store::{Shift, Ticket, TicketStatus, TicketStore};

use crate::ReconciliationState;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// On-disk record
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    schema_version: u32,
    shift: Shift,
    expected_next_folio: Option<u32>,
    missing_folios: Vec<u32>,
    alert_countdown: u32,
    tickets: Vec<TicketRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TicketRecord {
    folio: u32,
    timestamp: NaiveDateTime,
    amount_cents: i64,
    raw_source: String,
    status: TicketStatus,
}

impl TicketRecord {
    fn into_ticket(self) -> Ticket {
        Ticket::new(
            self.folio,
            self.timestamp,
            self.amount_cents,
            self.raw_source,
            self.status,
        )
    }
}

impl From<&ReconciliationState> for SnapshotRecord {
    fn from(st: &ReconciliationState) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            shift: st.shift,
            expected_next_folio: st.sequence.expected_next_folio,
            missing_folios: st.sequence.missing_folios.iter().copied().collect(),
            alert_countdown: st.sequence.alert_countdown,
            tickets: st
                .store
                .iter()
                .map(|t| TicketRecord {
                    folio: t.folio(),
                    timestamp: t.timestamp(),
                    amount_cents: t.amount_cents(),
                    raw_source: t.raw_source().to_string(),
                    status: t.status(),
                })
                .collect(),
        }
    }
}

impl SnapshotRecord {
    fn into_state(self) -> Result<ReconciliationState> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            bail!(
                "unsupported snapshot schema_version {} (expected {})",
                self.schema_version,
                SNAPSHOT_SCHEMA_VERSION
            );
        }

        let tickets = self.tickets.into_iter().map(TicketRecord::into_ticket);
        let store = TicketStore::restore(tickets).context("snapshot tickets")?;

        Ok(ReconciliationState {
            shift: self.shift,
            store,
            sequence: SequenceState {
                expected_next_folio: self.expected_next_folio,
                missing_folios: self.missing_folios.into_iter().collect(),
                alert_countdown: self.alert_countdown,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Durable home of one station's [`ReconciliationState`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Replace the stored record with `state`.
    ///
    /// The previous record stays readable until the rename; a crash mid-write leaves
    /// at most a stale `.tmp` sibling, which the next save overwrites.
    pub fn save(&self, state: &ReconciliationState) -> Result<()> {
        let json = serde_json::to_vec_pretty(&SnapshotRecord::from(state))
            .context("serialize snapshot failed")?;

        if let Some(dir) = self.parent_dir() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create snapshot dir failed: {}", dir.display()))?;
        }

        let tmp = self.temp_path();
        {
            let mut f = File::create(&tmp)
                .with_context(|| format!("create temp snapshot failed: {}", tmp.display()))?;
            f.write_all(&json)
                .with_context(|| format!("write temp snapshot failed: {}", tmp.display()))?;
            f.sync_all()
                .with_context(|| format!("fsync temp snapshot failed: {}", tmp.display()))?;
        }

        fs::rename(&tmp, &self.path).with_context(|| {
            format!(
                "replace snapshot failed: {} -> {}",
                tmp.display(),
                self.path.display()
            )
        })?;

        self.sync_parent_dir();
        Ok(())
    }

    /// `Ok(None)` when no record exists yet; `Err` when one exists but cannot be used.
    pub fn try_load(&self) -> Result<Option<ReconciliationState>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read snapshot failed: {}", self.path.display()))
            }
        };

        let record: SnapshotRecord = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse snapshot failed: {}", self.path.display()))?;

        record.into_state().map(Some)
    }

    /// Load the stored state, falling back to an empty morning shift when the record
    /// is missing or unreadable.
    pub fn load(&self) -> ReconciliationState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no snapshot; starting empty shift");
                ReconciliationState::new()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %format!("{err:#}"),
                    "unreadable snapshot; starting empty shift"
                );
                ReconciliationState::new()
            }
        }
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    #[cfg(unix)]
    fn sync_parent_dir(&self) {
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        if let Err(err) = File::open(dir).and_then(|d| d.sync_all()) {
            tracing::debug!(dir = %dir.display(), error = %err, "snapshot dir fsync skipped");
        }
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) {}
}
