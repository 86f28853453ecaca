use anyhow::Result;
use chrono::NaiveDateTime;
use tkt_parse::generator::{compact_code, test_sequence, validate_standard};
use tkt_store::format_cents;

pub fn generate(
    count: u32,
    skip: Option<u32>,
    base: NaiveDateTime,
    step_minutes: i64,
    compact: bool,
) -> Result<()> {
    let seq = test_sequence(count, skip, base, step_minutes)
        .map_err(|e| anyhow::anyhow!("GENERATE_FAILED: {e}"))?;
    for g in seq {
        if compact {
            println!("{}", compact_code(g.folio, g.amount_cents, g.timestamp));
        } else {
            println!("{}", g.code);
        }
    }
    Ok(())
}

pub fn validate(code: &str) -> Result<()> {
    match validate_standard(code.trim()) {
        Ok(v) => {
            println!("valid=true");
            println!("folio={:03}", v.folio);
            println!("amount={}", format_cents(v.amount_cents));
            println!("timestamp={}", v.timestamp.format("%Y-%m-%d %H:%M:%S"));
            Ok(())
        }
        Err(e) => {
            println!("valid=false");
            anyhow::bail!("{e}")
        }
    }
}
