use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;
use tkt_config::StationConfig;
use tkt_parse::generator::standard_code;
use tkt_report::RowStatus;
use tkt_station::*;
use tkt_store::Shift;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 13)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn scan(st: &mut Station, folio: u32, cents: i64, h: u32, m: u32) -> SubmitOutcome {
    st.submit_ticket(&standard_code(folio, cents, at(h, m)), at(h, m))
}

fn config(dir: &std::path::Path) -> StationConfig {
    StationConfig {
        data_file: dir.join("tickets_data.json"),
        reports_dir: dir.join("reports"),
        ..StationConfig::default()
    }
}

#[test]
fn scenario_close_writes_report_resets_and_toggles_shift() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = Station::open(config(dir.path()));
    assert_eq!(st.shift(), Shift::Morning);

    assert!(scan(&mut st, 1, 12_550, 9, 0).ok);
    assert!(scan(&mut st, 3, 4_000, 9, 20).ok);

    let rows = st.detailed_summary();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].status, RowStatus::Missing);
    assert_eq!(rows[1].camera_window.as_deref(), Some("09:00 - 09:30"));
    let hint = "Folio 002: check cameras between 08:55 and 09:25";
    assert!(st.quick_summary().contains(hint));

    let closure = st.close_shift(at(14, 0));
    assert_eq!(closure.closed_shift, Shift::Morning);
    assert_eq!(closure.next_shift, Shift::Afternoon);
    assert!(closure.report_text.contains("MORNING SHIFT"));
    assert!(closure.report_text.contains("Total amount: $165.50"));

    let path = closure.report_path.expect("report written");
    let reports = dir.path().join("reports");
    assert_eq!(path, reports.join("close_morning_20251013.txt"));
    assert_eq!(fs::read_to_string(&path)?, closure.report_text);

    assert_eq!(st.shift(), Shift::Afternoon);
    assert!(st.state().store.is_empty());
    assert!(st.state().sequence.missing_folios.is_empty());
    assert_eq!(st.state().sequence.expected_next_folio, None);

    // the persisted record reflects the empty new shift
    let record: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("tickets_data.json"))?)?;
    assert_eq!(record["shift"], "afternoon");
    assert_eq!(record["tickets"], serde_json::json!([]));
    assert_eq!(record["missing_folios"], serde_json::json!([]));

    let closure = st.close_shift(at(22, 0));
    assert_eq!(closure.next_shift, Shift::Morning);
    assert!(closure.report_text.contains("OK - no missing tickets"));
    Ok(())
}

#[test]
fn scenario_reopen_restores_exact_state() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = Station::open(config(dir.path()));
    for (folio, minute) in [(10, 0), (11, 4), (14, 9)] {
        assert!(scan(&mut st, folio, 990, 10, minute).ok);
    }
    let void = standard_code(12, 500, at(10, 5));
    assert!(st.submit_cancelled(&void, at(12, 0)).ok);

    let reopened = Station::open(config(dir.path()));
    assert_eq!(reopened.state(), st.state());
    assert_eq!(reopened.quick_summary(), st.quick_summary());
    Ok(())
}

#[test]
fn scenario_persistence_failure_does_not_change_outcome() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory")?;

    let mut st = Station::open(StationConfig {
        data_file: blocker.join("tickets_data.json"),
        reports_dir: blocker.join("reports"),
        ..StationConfig::default()
    });

    let out = scan(&mut st, 1, 100, 9, 0);
    assert!(out.ok);
    assert_eq!(st.state().store.len(), 1);

    let closure = st.close_shift(at(14, 0));
    assert!(closure.report_path.is_none());
    assert_eq!(st.shift(), Shift::Afternoon);
    Ok(())
}

#[test]
fn scenario_print_slip_uses_detailed_windows() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let mut st = Station::open(config(dir.path()));
    assert!(scan(&mut st, 1, 100, 9, 0).ok);
    assert!(scan(&mut st, 3, 100, 9, 20).ok);

    let slip = st.print_slip(at(14, 0));
    assert!(slip.contains("Folio 002\nCheck cameras:\n09:00 - 09:30"));
    let width = tkt_report::SLIP_WIDTH;
    assert!(slip.lines().all(|l| l.chars().count() <= width));
    Ok(())
}
