use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use tkt_store::{format_cents, Shift, TicketStore};

use crate::{detailed_summary, quick_summary, RowStatus, ShiftStatistics};

/// Thermal printer paper width (57mm roll).
pub const SLIP_WIDTH: usize = 32;

const REPORT_RULE_WIDTH: usize = 40;

/// Plain-text closing report for `shift`.
///
/// Layout: header with shift and date, totals, the quick missing-ticket summary (or the
/// all-clear line), next-shift footer.
pub fn closing_report(
    store: &TicketStore,
    missing: &BTreeSet<u32>,
    shift: Shift,
    now: NaiveDateTime,
    scan_limit: u32,
) -> String {
    let stats = ShiftStatistics::from_store(store);
    let mut lines = vec![
        format!(
            "=== SHIFT CLOSE - {} SHIFT ===",
            shift.as_str().to_uppercase()
        ),
        format!("Date: {}", now.format("%d/%m/%Y %H:%M")),
        String::new(),
        format!("Tickets processed: {}", stats.ok_count),
        format!("Total amount: {}", format_cents(stats.ok_amount_cents)),
    ];
    if stats.cancelled_count > 0 {
        lines.push(format!("Cancelled tickets: {}", stats.cancelled_count));
        lines.push(format!(
            "Cancelled amount (not in total): {}",
            format_cents(stats.cancelled_amount_cents)
        ));
    }
    let summary = quick_summary(store, missing, scan_limit);
    lines.push(String::new());
    lines.push(summary.trim_end().to_string());
    lines.push(String::new());
    lines.push(format!("Next shift: {}", shift.next()));
    lines.push("=".repeat(REPORT_RULE_WIDTH));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// 32-column summary for the receipt printer. Missing folios use the detailed
/// camera windows.
pub fn print_slip(
    store: &TicketStore,
    shift: Shift,
    now: NaiveDateTime,
    scan_limit: u32,
) -> String {
    let stats = ShiftStatistics::from_store(store);
    let rule = "=".repeat(SLIP_WIDTH);

    let mut lines = vec![
        rule.clone(),
        "SHIFT CLOSE".to_string(),
        shift.as_str().to_uppercase(),
        rule.clone(),
        format!("Date: {}", now.format("%d/%m/%Y %H:%M")),
        String::new(),
        "Tickets processed:".to_string(),
        stats.ok_count.to_string(),
        format!("Total: {}", format_cents(stats.ok_amount_cents)),
        String::new(),
    ];

    if stats.cancelled_count > 0 {
        lines.push(format!("CANCELLED TICKETS: {}", stats.cancelled_count));
        lines.push("Cancelled amount (not added):".to_string());
        lines.push(format_cents(stats.cancelled_amount_cents));
        lines.push(String::new());
    }

    let missing: Vec<_> = detailed_summary(store, scan_limit)
        .into_iter()
        .filter(|row| row.status == RowStatus::Missing)
        .collect();

    lines.push(format!("MISSING TICKETS: {}", missing.len()));
    if missing.is_empty() {
        lines.push("All tickets in order".to_string());
        lines.push(String::new());
    } else {
        lines.push(rule.clone());
        for row in missing {
            lines.push(format!("Folio {}", row.folio));
            lines.push("Check cameras:".to_string());
            if let Some(window) = row.camera_window {
                lines.push(window);
            }
            lines.push(String::new());
        }
    }

    lines.push(rule.clone());
    lines.push(format!("Next shift: {}", shift.next()));
    lines.push(rule);
    // trailing feed for the paper cutter
    lines.push(String::new());

    lines.join("\n")
}

/// `close_<shift>_<YYYYMMDD>.txt`.
pub fn report_file_name(shift: Shift, now: NaiveDateTime) -> String {
    format!("close_{}_{}.txt", shift, now.format("%Y%m%d"))
}

/// Write the closing report into `dir`, replacing any report for the same shift and day.
pub fn write_report(
    dir: &Path,
    shift: Shift,
    now: NaiveDateTime,
    text: &str,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create reports dir failed: {}", dir.display()))?;

    let path = dir.join(report_file_name(shift, now));
    fs::write(&path, text)
        .with_context(|| format!("write closing report failed: {}", path.display()))?;

    Ok(path)
}
