use chrono::{Duration, NaiveDateTime, Timelike};

/// Footage span added on the open side of a window.
pub const CAMERA_SPAN_MINUTES: i64 = 10;

pub fn floor_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Time range of surveillance footage to review for one missing folio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraWindow {
    Between {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    NoReference,
}

impl CameraWindow {
    /// Window used by the detailed range view, from the timestamps of the nearest
    /// stored tickets below and above the missing folio.
    pub fn detailed(prev: Option<NaiveDateTime>, next: Option<NaiveDateTime>) -> Self {
        let span = Duration::minutes(CAMERA_SPAN_MINUTES);
        match (prev, next) {
            (Some(prev), Some(next)) => CameraWindow::Between {
                start: floor_to_minute(prev),
                end: floor_to_minute(next) + span,
            },
            (Some(prev), None) => CameraWindow::Between {
                start: prev,
                end: prev + span,
            },
            (None, Some(next)) => CameraWindow::Between {
                start: next - span,
                end: next,
            },
            (None, None) => CameraWindow::NoReference,
        }
    }

    /// `HH:MM - HH:MM`, or `no reference available`.
    pub fn label(&self) -> String {
        match self {
            CameraWindow::Between { start, end } => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            CameraWindow::NoReference => "no reference available".to_string(),
        }
    }
}
