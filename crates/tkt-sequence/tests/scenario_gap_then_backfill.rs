use tkt_sequence::*;

#[test]
fn scenario_gap_detected_then_filled_by_late_ticket() {
    let cfg = SequenceConfig::defaults();
    let mut st = SequenceState::new();

    for f in [1, 2, 3] {
        let d = observe_folio(&cfg, &mut st, f);
        assert!(!d.alert, "folio {f} is contiguous");
    }

    // 4 is skipped: the alert fires on 5.
    let d5 = observe_folio(&cfg, &mut st, 5);
    assert!(d5.alert);
    assert!(st.is_missing(4));

    let d6 = observe_folio(&cfg, &mut st, 6);
    assert_eq!(d6.transition, Transition::Contiguous);
    assert_eq!(st.missing_folios.len(), 1);

    // 4 arrives late and closes the gap.
    let d4 = observe_folio(&cfg, &mut st, 4);
    assert_eq!(d4.transition, Transition::Backfill { filled_gap: true });
    assert!(st.missing_folios.is_empty());
    assert_eq!(st.expected_next_folio, Some(6));
}

#[test]
fn scenario_alert_window_spans_three_arrivals() {
    let cfg = SequenceConfig::defaults();
    let mut st = SequenceState::new();

    observe_folio(&cfg, &mut st, 100);
    assert!(observe_folio(&cfg, &mut st, 104).alert);

    // Late arrivals keep the warning up while the countdown lasts.
    assert!(observe_folio(&cfg, &mut st, 99).alert);
    assert!(observe_folio(&cfg, &mut st, 101).alert);
    assert!(!observe_folio(&cfg, &mut st, 102).alert);
    assert!(!observe_folio(&cfg, &mut st, 103).alert);

    assert!(st.missing_folios.is_empty());
    assert_eq!(st.alert_countdown, 0);
}
