use anyhow::Result;
use chrono::NaiveDateTime;
use tkt_station::Station;
use tkt_store::format_cents;

use super::load_station_config;

fn open(config_paths: &[String]) -> Result<Station> {
    Ok(Station::open(load_station_config(config_paths)?))
}

/// Exits non-zero when the scan is rejected.
pub fn scan(
    config_paths: &[String],
    code: &str,
    now: NaiveDateTime,
    cancelled: bool,
) -> Result<()> {
    let mut station = open(config_paths)?;
    let out = if cancelled {
        station.submit_cancelled(code, now)
    } else {
        station.submit_ticket(code, now)
    };

    println!("ok={}", out.ok);
    println!("alert={}", out.alert);
    println!("message={}", out.message);
    if !out.ok {
        anyhow::bail!("SCAN_REJECTED: {}", out.message);
    }
    Ok(())
}

pub fn stats(config_paths: &[String]) -> Result<()> {
    let station = open(config_paths)?;
    let s = station.shift_statistics();
    println!("shift={}", station.shift());
    println!("ok_count={}", s.ok_count);
    println!("cancelled_count={}", s.cancelled_count);
    println!("total_scanned={}", s.total_scanned);
    println!("ok_amount={}", format_cents(s.ok_amount_cents));
    println!(
        "cancelled_amount={}",
        format_cents(s.cancelled_amount_cents)
    );
    Ok(())
}

pub fn summary(config_paths: &[String]) -> Result<()> {
    let station = open(config_paths)?;
    let rows = station.detailed_summary();
    if rows.is_empty() {
        println!("no tickets in shift {}", station.shift());
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<9} {:>12}  CAMERAS",
        "FOLIO", "STATUS", "TIME", "AMOUNT"
    );
    for row in rows {
        println!(
            "{:<6} {:<10} {:<9} {:>12}  {}",
            row.folio,
            row.status.as_str(),
            row.time,
            row.amount,
            row.camera_window.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub fn missing(config_paths: &[String]) -> Result<()> {
    let station = open(config_paths)?;
    println!("{}", station.quick_summary().trim_end());
    Ok(())
}

pub fn slip(config_paths: &[String], now: NaiveDateTime) -> Result<()> {
    let station = open(config_paths)?;
    print!("{}", station.print_slip(now));
    Ok(())
}

pub fn close(config_paths: &[String], now: NaiveDateTime) -> Result<()> {
    let mut station = open(config_paths)?;
    let closure = station.close_shift(now);

    print!("{}", closure.report_text);
    println!("closed_shift={}", closure.closed_shift);
    println!("next_shift={}", closure.next_shift);
    match closure.report_path {
        Some(p) => println!("report_path={}", p.display()),
        None => println!("report_path="),
    }
    Ok(())
}
