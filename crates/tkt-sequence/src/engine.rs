use crate::{SequenceConfig, SequenceDecision, SequenceState, Transition};

/// Advance the tracker with a newly accepted folio.
///
/// The caller must only pass folios the store accepted; duplicates are not
/// detected here.
pub fn observe_folio(cfg: &SequenceConfig, st: &mut SequenceState, folio: u32) -> SequenceDecision {
    let Some(cursor) = st.expected_next_folio else {
        st.expected_next_folio = Some(folio);
        return SequenceDecision {
            transition: Transition::First,
            alert: false,
        };
    };

    // Contiguous arrival resets any pending alert.
    if folio == cursor.saturating_add(1) {
        st.expected_next_folio = Some(folio);
        st.alert_countdown = 0;
        return SequenceDecision {
            transition: Transition::Contiguous,
            alert: false,
        };
    }

    // Forward gap: everything strictly between cursor and folio is missing.
    if folio > cursor {
        let first_missing = cursor + 1;
        let last_missing = folio - 1;
        st.missing_folios.extend(first_missing..=last_missing);
        st.expected_next_folio = Some(folio);
        st.alert_countdown = cfg.alert_window;
        return SequenceDecision {
            transition: Transition::ForwardGap {
                first_missing,
                last_missing,
            },
            alert: true,
        };
    }

    // Late arrival at or below the cursor.
    let filled_gap = st.missing_folios.remove(&folio);
    let alert = if st.alert_countdown > 0 {
        st.alert_countdown -= 1;
        st.alert_countdown > 0
    } else {
        false
    };

    SequenceDecision {
        transition: Transition::Backfill { filled_gap },
        alert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_ALERT_WINDOW;

    fn feed(st: &mut SequenceState, folios: &[u32]) -> Vec<bool> {
        let cfg = SequenceConfig::defaults();
        folios
            .iter()
            .map(|f| observe_folio(&cfg, st, *f).alert)
            .collect()
    }

    #[test]
    fn first_ticket_sets_cursor_without_alert() {
        let mut st = SequenceState::new();
        let d = observe_folio(&SequenceConfig::defaults(), &mut st, 40);
        assert_eq!(d.transition, Transition::First);
        assert!(!d.alert);
        assert_eq!(st.expected_next_folio, Some(40));
    }

    #[test]
    fn forward_gap_marks_every_skipped_folio() {
        let mut st = SequenceState::new();
        feed(&mut st, &[1]);
        let d = observe_folio(&SequenceConfig::defaults(), &mut st, 5);
        assert_eq!(
            d.transition,
            Transition::ForwardGap {
                first_missing: 2,
                last_missing: 4
            }
        );
        assert!(d.alert);
        assert_eq!(
            st.missing_folios.iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(st.alert_countdown, DEFAULT_ALERT_WINDOW);
        assert_eq!(st.expected_next_folio, Some(5));
    }

    #[test]
    fn contiguous_arrival_clears_countdown() {
        let mut st = SequenceState::new();
        let alerts = feed(&mut st, &[1, 2, 3, 5, 6]);
        assert_eq!(alerts, vec![false, false, false, true, false]);
        assert_eq!(st.alert_countdown, 0);
    }

    #[test]
    fn backfills_count_down_the_alert() {
        let mut st = SequenceState::new();
        // gap 2..=9, then three late arrivals
        let alerts = feed(&mut st, &[1, 10, 2, 3, 4, 5]);
        assert_eq!(alerts, vec![false, true, true, true, false, false]);
        assert_eq!(st.alert_countdown, 0);
        assert_eq!(
            st.missing_folios.iter().copied().collect::<Vec<_>>(),
            vec![6, 7, 8, 9]
        );
    }

    #[test]
    fn backfill_of_unknown_folio_keeps_cursor() {
        let mut st = SequenceState::new();
        feed(&mut st, &[20, 21]);
        let d = observe_folio(&SequenceConfig::defaults(), &mut st, 15);
        assert_eq!(d.transition, Transition::Backfill { filled_gap: false });
        assert!(!d.alert);
        assert_eq!(st.expected_next_folio, Some(21));
    }

    #[test]
    fn zero_alert_window_still_alerts_on_the_gap() {
        let cfg = SequenceConfig { alert_window: 0 };
        let mut st = SequenceState::new();
        observe_folio(&cfg, &mut st, 1);
        assert!(observe_folio(&cfg, &mut st, 3).alert);
        assert!(!observe_folio(&cfg, &mut st, 2).alert);
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut st = SequenceState::new();
        feed(&mut st, &[1, 4]);
        st.reset();
        assert_eq!(st, SequenceState::new());
    }
}
