use chrono::{Duration, NaiveDate, NaiveDateTime};
use tempfile::tempdir;
use tkt_config::StationConfig;
use tkt_parse::generator::standard_code;
use tkt_station::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 13)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn code(folio: u32) -> String {
    let at = NaiveDate::from_ymd_opt(2025, 10, 13)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        + Duration::minutes(i64::from(folio) * 2);
    standard_code(folio, 1_000 + i64::from(folio), at)
}

fn station(dir: &std::path::Path) -> Station {
    Station::open(StationConfig {
        data_file: dir.join("tickets_data.json"),
        reports_dir: dir.to_path_buf(),
        ..StationConfig::default()
    })
}

#[test]
fn scenario_gap_raises_alert_and_backfill_clears_it() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());

    let alerts: Vec<bool> = [1, 2, 3, 5, 6]
        .into_iter()
        .map(|f| {
            let out = st.submit_ticket(&code(f), now());
            assert!(out.ok, "{}", out.message);
            out.alert
        })
        .collect();
    assert_eq!(alerts, vec![false, false, false, true, false]);
    let missing = &st.state().sequence.missing_folios;
    assert_eq!(missing.iter().copied().collect::<Vec<_>>(), vec![4]);

    let out = st.submit_ticket(&code(4), now());
    assert!(out.ok);
    assert!(!out.alert);
    assert!(st.state().sequence.missing_folios.is_empty());
    Ok(())
}

#[test]
fn scenario_alert_stays_up_for_the_window_after_a_gap() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());

    let alerts: Vec<bool> = [1, 5, 3, 2, 4]
        .into_iter()
        .map(|f| st.submit_ticket(&code(f), now()).alert)
        .collect();
    assert_eq!(alerts, vec![false, true, true, true, false]);
    Ok(())
}

#[test]
fn scenario_duplicate_folio_is_rejected_and_store_unchanged() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());

    assert!(st.submit_ticket(&code(7), now()).ok);
    let before = st.state().clone();

    let out = st.submit_ticket(&code(7), now());
    assert!(!out.ok);
    assert!(!out.alert);
    assert_eq!(out.message, "ticket 007 already exists");
    assert_eq!(st.state(), &before);
    Ok(())
}

#[test]
fn scenario_rejections_mutate_nothing() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());
    assert!(st.submit_ticket(&code(50), now()).ok);
    let before = st.state().clone();

    let out = st.submit_ticket("invalid-format-here", now());
    assert!(!out.ok);
    assert!(out.message.starts_with("invalid code"));

    let out = st.submit_ticket(&code(61), now());
    assert!(!out.ok);
    assert!(out.message.starts_with("out of range"));

    let out = st.submit_ticket("20251340143025-051-0125.50", now());
    assert!(!out.ok, "impossible month must not be admitted");

    assert_eq!(st.state(), &before);
    Ok(())
}

#[test]
fn scenario_cancelled_ticket_closes_gap_without_alert() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());

    assert!(st.submit_ticket(&code(1), now()).ok);
    assert!(st.submit_ticket(&code(3), now()).alert);

    let out = st.submit_cancelled(&code(2), now());
    assert!(out.ok);
    assert!(!out.alert);
    assert!(out.message.contains("CANCELLED"));
    assert!(st.state().sequence.missing_folios.is_empty());

    let stats = st.shift_statistics();
    assert_eq!(stats.total_scanned, 3);
    assert_eq!(stats.ok_count, 2);
    assert_eq!(stats.cancelled_count, 1);
    assert_eq!(stats.ok_amount_cents, 1_001 + 1_003);
    assert_eq!(stats.cancelled_amount_cents, 1_002);
    Ok(())
}

#[test]
fn scenario_out_of_order_first_scans_leave_the_tracker_clear() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = station(dir.path());

    // 5 opens the sequence, 3 is a late arrival, so 4 is never tracked as missing
    assert!(st.submit_ticket(&code(5), now()).ok);
    let out = st.submit_ticket(&code(3), now());
    assert!(out.ok);
    assert!(!out.alert);
    assert!(st.state().sequence.missing_folios.is_empty());
    assert_eq!(st.quick_summary(), tkt_report::ALL_ACCOUNTED_FOR);

    // the range views rebuild from the store and still see the hole
    let missing: Vec<String> = st
        .detailed_summary()
        .into_iter()
        .filter(|row| row.status == tkt_report::RowStatus::Missing)
        .map(|row| row.folio)
        .collect();
    assert_eq!(missing, vec!["004".to_string()]);
    assert!(st.print_slip(now()).contains("MISSING TICKETS: 1"));

    let closure = st.close_shift(now());
    assert!(closure.report_text.contains(tkt_report::ALL_ACCOUNTED_FOR));
    Ok(())
}
