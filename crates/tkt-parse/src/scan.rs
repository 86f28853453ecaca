//! Character-level scanning helpers shared by the grammars and the generator.
//!
//! Shapes are written with `#` standing for one ASCII digit; every other
//! character in a shape must match literally.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ParseError;

pub(crate) const DIGIT: char = '#';

pub(crate) fn is_digit_at(chars: &[char], at: usize) -> bool {
    chars.get(at).is_some_and(|c| c.is_ascii_digit())
}

/// True when `n` ASCII digits start at `at`.
pub(crate) fn digits_at(chars: &[char], at: usize, n: usize) -> bool {
    at + n <= chars.len() && chars[at..at + n].iter().all(|c| c.is_ascii_digit())
}

/// End (exclusive) of the digit run starting at `start`.
pub(crate) fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while is_digit_at(chars, end) {
        end += 1;
    }
    end
}

/// Maximal runs of ASCII digits as half-open `(start, end)` ranges, left to right.
pub(crate) fn digit_runs(chars: &[char]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let end = digit_run_end(chars, i);
            runs.push((i, end));
            i = end;
        } else {
            i += 1;
        }
    }
    runs
}

pub(crate) fn matches_shape(chars: &[char], at: usize, shape: &str) -> bool {
    let mut pos = at;
    for expected in shape.chars() {
        let Some(actual) = chars.get(pos) else {
            return false;
        };
        let ok = if expected == DIGIT {
            actual.is_ascii_digit()
        } else {
            *actual == expected
        };
        if !ok {
            return false;
        }
        pos += 1;
    }
    true
}

/// Leftmost position where `shape` matches.
pub(crate) fn find_shape(chars: &[char], shape: &str) -> Option<usize> {
    let width = shape.chars().count();
    if width > chars.len() {
        return None;
    }
    (0..=chars.len() - width).find(|&at| matches_shape(chars, at, shape))
}

pub(crate) fn text(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

/// Value of an all-digit string. Callers bound the width so this cannot overflow.
pub(crate) fn number(digits: &str) -> u32 {
    let mut n = 0u32;
    for b in digits.bytes().filter(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    n
}

/// Folio digits to a canonical folio (leading zeros dropped).
pub(crate) fn folio_from_digits(digits: &str) -> Result<u32, ParseError> {
    match number(digits) {
        0 => Err(ParseError::ZeroFolio),
        folio => Ok(folio),
    }
}

/// Integer part and exactly two fraction digits to cents.
pub(crate) fn cents_from_digits(int_part: &str, frac_part: &str) -> i64 {
    let mut n = 0i64;
    for b in int_part.bytes().filter(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    let frac = i64::from(number(frac_part));
    n.saturating_mul(100).saturating_add(frac)
}

pub(crate) fn datetime(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// `YYYYMMDDHHMMSS` to a calendar value.
pub(crate) fn datetime_from_compact14(digits: &str) -> Option<NaiveDateTime> {
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    datetime(
        number(&digits[0..4]),
        number(&digits[4..6]),
        number(&digits[6..8]),
        number(&digits[8..10]),
        number(&digits[10..12]),
        number(&digits[12..14]),
    )
}
