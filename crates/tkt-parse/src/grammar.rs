use chrono::{NaiveDateTime, Timelike};

use crate::scan::{
    cents_from_digits, datetime, datetime_from_compact14, digit_run_end, digit_runs, digits_at,
    find_shape, folio_from_digits, is_digit_at, number, text,
};
use crate::{Grammar, ParseError, ParsedCode};

/// Minimum count of digits and decimal points a code must carry.
pub const MIN_NORMALIZED_LEN: usize = 12;

/// Integer digits accepted for a decimal amount outside the compact grammars.
/// Longer runs are timestamp fragments, not money.
const MAX_AMOUNT_INT_DIGITS: usize = 12;

/// Longest digit run the heuristic accepts as an integer amount.
const MAX_FALLBACK_AMOUNT_DIGITS: usize = 6;

// ---------------------------------------------------------------------------
// Input projection
// ---------------------------------------------------------------------------

struct CodeText<'a> {
    /// Input with surrounding whitespace removed.
    raw: &'a str,
    chars: Vec<char>,
    /// Only ASCII digits and `.` from `raw`.
    normalized: String,
}

impl<'a> CodeText<'a> {
    fn new(input: &'a str) -> Self {
        let raw = input.trim();
        let chars: Vec<char> = raw.chars().collect();
        let normalized = chars
            .iter()
            .filter(|c| c.is_ascii_digit() || **c == '.')
            .collect();
        Self {
            raw,
            chars,
            normalized,
        }
    }
}

#[derive(Debug)]
struct Fields {
    folio: u32,
    timestamp: NaiveDateTime,
    amount_cents: i64,
}

/// `None` = grammar does not apply; `Some(Err)` = grammar applies but the record is invalid.
type RuleOutcome = Option<Result<Fields, ParseError>>;
type Rule = fn(&CodeText<'_>, NaiveDateTime) -> RuleOutcome;

/// Strict grammars in priority order. The heuristic runs only when none applies.
const GRAMMARS: &[(Grammar, Rule)] = &[
    (Grammar::CompactDecimal, compact_decimal),
    (Grammar::CompactDigits, compact_digits),
    (Grammar::LongForm, long_form),
];

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Parse a scanned code.
///
/// `now` supplies the date for time-only grammars and every defaulted field. It is
/// truncated to whole seconds.
pub fn parse_code(input: &str, now: NaiveDateTime) -> Result<ParsedCode, ParseError> {
    let code = CodeText::new(input);
    if code.normalized.len() < MIN_NORMALIZED_LEN {
        return Err(ParseError::TooShort {
            normalized_len: code.normalized.len(),
        });
    }

    let now = now.with_nanosecond(0).unwrap_or(now);

    let matched = GRAMMARS
        .iter()
        .find_map(|(grammar, rule)| rule(&code, now).map(|outcome| (*grammar, outcome)));

    let (grammar, fields) = match matched {
        Some((grammar, outcome)) => (grammar, outcome?),
        None => (Grammar::Heuristic, heuristic(&code, now)?),
    };

    Ok(ParsedCode {
        folio: fields.folio,
        timestamp: fields.timestamp,
        amount_cents: fields.amount_cents,
        raw_source: code.raw.to_string(),
        grammar,
    })
}

// ---------------------------------------------------------------------------
// Compact grammars
// ---------------------------------------------------------------------------

fn compact_decimal(code: &CodeText<'_>, now: NaiveDateTime) -> RuleOutcome {
    let (digits, frac) = code.normalized.split_once('.')?;
    if frac.len() != 2 || !all_digits(frac) || !all_digits(digits) {
        return None;
    }
    compact_fields(digits, frac, now)
}

fn compact_digits(code: &CodeText<'_>, now: NaiveDateTime) -> RuleOutcome {
    let norm = code.normalized.as_str();
    if !all_digits(norm) || norm.len() < 2 {
        return None;
    }
    let (digits, frac) = norm.split_at(norm.len() - 2);
    compact_fields(digits, frac, now)
}

/// `digits` = `HHMMSS` + folio (3 or 4) + 4 amount digits.
fn compact_fields(digits: &str, frac: &str, now: NaiveDateTime) -> RuleOutcome {
    let folio_len = match digits.len() {
        13 => 3,
        14 => 4,
        _ => return None,
    };
    let (time, rest) = digits.split_at(6);
    let (folio, amount_int) = rest.split_at(folio_len);

    let timestamp = match now.date().and_hms_opt(
        number(&time[0..2]),
        number(&time[2..4]),
        number(&time[4..6]),
    ) {
        Some(ts) => ts,
        None => {
            return Some(Err(ParseError::InvalidDateTime {
                raw: time.to_string(),
            }))
        }
    };

    Some(folio_from_digits(folio).map(|folio| Fields {
        folio,
        timestamp,
        amount_cents: cents_from_digits(amount_int, frac),
    }))
}

// ---------------------------------------------------------------------------
// Long-form grammar
// ---------------------------------------------------------------------------

/// `YYYYMMDDHHMMSS <d> FFF <d> N.CC` anywhere in the original text, where `<d>` is
/// any single non-alphanumeric character.
fn long_form(code: &CodeText<'_>, _now: NaiveDateTime) -> RuleOutcome {
    let chars = &code.chars;
    let found = (0..chars.len()).find_map(|at| long_form_at(chars, at));
    let (stamp, folio, int_part, frac) = found?;

    let Some(timestamp) = datetime_from_compact14(&stamp) else {
        return Some(Err(ParseError::InvalidDateTime { raw: stamp }));
    };

    Some(folio_from_digits(&folio).map(|folio| Fields {
        folio,
        timestamp,
        amount_cents: cents_from_digits(&int_part, &frac),
    }))
}

fn long_form_at(chars: &[char], at: usize) -> Option<(String, String, String, String)> {
    let is_delim = |pos: usize| chars.get(pos).is_some_and(|c| !c.is_alphanumeric());

    let mut pos = at;
    if !digits_at(chars, pos, 14) {
        return None;
    }
    let stamp = text(chars, pos, pos + 14);
    pos += 14;

    if !is_delim(pos) || !digits_at(chars, pos + 1, 3) {
        return None;
    }
    let folio = text(chars, pos + 1, pos + 4);
    pos += 4;

    if !is_delim(pos) {
        return None;
    }
    pos += 1;

    let int_end = digit_run_end(chars, pos);
    let int_len = int_end - pos;
    if int_len == 0 || int_len > MAX_AMOUNT_INT_DIGITS {
        return None;
    }
    if chars.get(int_end) != Some(&'.') || !digits_at(chars, int_end + 1, 2) {
        return None;
    }

    Some((
        stamp,
        folio,
        text(chars, pos, int_end),
        text(chars, int_end + 1, int_end + 3),
    ))
}

// ---------------------------------------------------------------------------
// Heuristic extraction
// ---------------------------------------------------------------------------

/// Field positions inside a timestamp shape, as half-open char ranges.
struct TimestampLayout {
    shape: &'static str,
    year: (usize, usize),
    month: (usize, usize),
    day: (usize, usize),
    hour: (usize, usize),
    minute: (usize, usize),
    second: Option<(usize, usize)>,
}

const TIMESTAMP_LAYOUTS: &[TimestampLayout] = &[
    // 2025-10-13T14:30:25
    TimestampLayout {
        shape: "####-##-##T##:##:##",
        year: (0, 4),
        month: (5, 7),
        day: (8, 10),
        hour: (11, 13),
        minute: (14, 16),
        second: Some((17, 19)),
    },
    // 13/10/2025 14:30:25
    TimestampLayout {
        shape: "##/##/#### ##:##:##",
        year: (6, 10),
        month: (3, 5),
        day: (0, 2),
        hour: (11, 13),
        minute: (14, 16),
        second: Some((17, 19)),
    },
    // 20251013143025
    TimestampLayout {
        shape: "##############",
        year: (0, 4),
        month: (4, 6),
        day: (6, 8),
        hour: (8, 10),
        minute: (10, 12),
        second: Some((12, 14)),
    },
    // 202510131430
    TimestampLayout {
        shape: "############",
        year: (0, 4),
        month: (4, 6),
        day: (6, 8),
        hour: (8, 10),
        minute: (10, 12),
        second: None,
    },
];

impl TimestampLayout {
    /// First occurrence of the shape, if it is a real calendar value.
    fn extract(&self, chars: &[char]) -> Option<NaiveDateTime> {
        let at = find_shape(chars, self.shape)?;
        let field = |(start, end): (usize, usize)| number(&text(chars, at + start, at + end));
        datetime(
            field(self.year),
            field(self.month),
            field(self.day),
            field(self.hour),
            field(self.minute),
            self.second.map(field).unwrap_or(0),
        )
    }
}

fn heuristic(code: &CodeText<'_>, now: NaiveDateTime) -> Result<Fields, ParseError> {
    let chars = &code.chars;

    let timestamp = TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| layout.extract(chars))
        .unwrap_or(now);

    let folio = match find_folio(chars) {
        Some(digits) => folio_from_digits(&digits)?,
        None => synthesized_folio(now),
    };

    Ok(Fields {
        folio,
        timestamp,
        amount_cents: find_amount(chars),
    })
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `_123_` / `_123` at the end first, then the first standalone 3-4 digit run.
fn find_folio(chars: &[char]) -> Option<String> {
    let underscored = chars.iter().enumerate().find_map(|(i, c)| {
        if *c != '_' {
            return None;
        }
        let start = i + 1;
        let end = digit_run_end(chars, start);
        let closed = end == chars.len() || chars[end] == '_';
        ((3..=4).contains(&(end - start)) && closed).then(|| text(chars, start, end))
    });
    if underscored.is_some() {
        return underscored;
    }

    digit_runs(chars).into_iter().find_map(|(start, end)| {
        let open = start == 0 || !is_word(chars[start - 1]);
        let closed = end == chars.len() || !is_word(chars[end]);
        ((3..=4).contains(&(end - start)) && open && closed).then(|| text(chars, start, end))
    })
}

/// Low-order digits of the clock; `0` maps to `1000` so the folio stays positive.
fn synthesized_folio(now: NaiveDateTime) -> u32 {
    match now.and_utc().timestamp().rem_euclid(1000) {
        0 => 1000,
        n => n as u32,
    }
}

/// First `N.CC` decimal, else the last integer run of 1-6 digits, else zero.
fn find_amount(chars: &[char]) -> i64 {
    let runs = digit_runs(chars);

    let decimal = runs.iter().find_map(|&(start, end)| {
        let exact_fraction = chars.get(end) == Some(&'.')
            && digits_at(chars, end + 1, 2)
            && !is_digit_at(chars, end + 3);
        if !exact_fraction || end - start > MAX_AMOUNT_INT_DIGITS {
            return None;
        }
        let frac = text(chars, end + 1, end + 3);
        Some(cents_from_digits(&text(chars, start, end), &frac))
    });
    if let Some(cents) = decimal {
        return cents;
    }

    let fallback_len = 1..=MAX_FALLBACK_AMOUNT_DIGITS;
    runs.iter()
        .rev()
        .find(|&&(start, end)| fallback_len.contains(&(end - start)))
        .map(|&(start, end)| cents_from_digits(&text(chars, start, end), "00"))
        .unwrap_or(0)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
