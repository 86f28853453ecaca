use chrono::{NaiveDate, NaiveDateTime};
use tkt_parse::generator::{compact_code, standard_code, test_sequence};
use tkt_parse::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 13)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 13)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn scenario_compact_codes_recover_every_field() {
    let cases = [
        ("000000-001-0000.00", 1, 0, at(0, 0, 0)),
        ("083005-042-0089.75", 42, 8_975, at(8, 30, 5)),
        ("235959-999-9999.99", 999, 999_999, at(23, 59, 59)),
        ("120000-1000-0001.01", 1000, 101, at(12, 0, 0)),
        ("SCN 101500 007 0125 50 END", 7, 12_550, at(10, 15, 0)),
    ];

    for (code, folio, cents, ts) in cases {
        let p = parse_code(code, now()).unwrap_or_else(|e| panic!("{code}: {e}"));
        assert_eq!(p.folio, folio, "{code}");
        assert_eq!(p.amount_cents, cents, "{code}");
        assert_eq!(p.timestamp, ts, "{code}");
    }
}

#[test]
fn scenario_long_form_reference_code() {
    let p = parse_code("20251013143025-001-0125.50", now()).unwrap();
    assert_eq!(p.folio, 1);
    assert_eq!(p.amount_cents, 12_550);
    assert_eq!(p.timestamp, at(14, 30, 25));
    assert_eq!(p.grammar, Grammar::LongForm);
}

#[test]
fn scenario_garbage_is_invalid_code() {
    let err = parse_code("invalid-format-here", now()).unwrap_err();
    assert!(matches!(err, ParseError::TooShort { .. }));
}

#[test]
fn scenario_framed_iso_code_with_prefix_and_suffix() {
    let p = parse_code("INICIO2025-10-13T14:35:00_127_75.25FIN", now()).unwrap();
    assert_eq!(p.grammar, Grammar::Heuristic);
    assert_eq!(p.folio, 127);
    assert_eq!(p.amount_cents, 7_525);
    assert_eq!(p.timestamp, at(14, 35, 0));
}

#[test]
fn scenario_generated_codes_parse_back() {
    for g in test_sequence(12, Some(4), at(9, 0, 0), 3).unwrap() {
        let p = parse_code(&g.code, now()).unwrap();
        assert_eq!(p.grammar, Grammar::LongForm);
        assert_eq!(p.folio, g.folio);
        assert_eq!(p.amount_cents, g.amount_cents);
        assert_eq!(p.timestamp, g.timestamp);
    }

    let p = parse_code(&compact_code(15, 4_010, at(11, 5, 9)), now()).unwrap();
    assert_eq!(p.grammar, Grammar::CompactDecimal);
    assert_eq!(
        (p.folio, p.amount_cents, p.timestamp),
        (15, 4_010, at(11, 5, 9))
    );

    let p = parse_code(&standard_code(15, 4_010, at(11, 5, 9)), now()).unwrap();
    assert_eq!(
        (p.folio, p.amount_cents, p.timestamp),
        (15, 4_010, at(11, 5, 9))
    );
}
