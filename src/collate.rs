//! Numeric-aware string collation.
//!
//! Strings are read as a sequence of units: every run of ASCII digits is one
//! unit and every other character is a unit of its own. Units compare by
//! class first (whitespace, then punctuation and symbols, then digits, then
//! letters). Digit runs compare by numeric value, so `"2" < "10"`, and letters
//! compare case-insensitively. Ties are broken by case (lowercase first) and
//! finally by plain byte order, so the ordering is total.

use std::cmp::Ordering;

const DIGITS: u8 = 2;

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_ascii_digit() {
        DIGITS
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

/// One collation unit. `weight` is the digit count of a leading-zero-free
/// digit run, or zero for a single character.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Unit {
    class: u8,
    weight: usize,
    text: String,
}

fn units(s: &str) -> Vec<Unit> {
    let mut out = Vec::new();
    let mut rest = s;
    while let Some(first) = rest.chars().next() {
        if first.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (run, tail) = rest.split_at(end);
            let digits = run.trim_start_matches('0');
            out.push(Unit {
                class: DIGITS,
                weight: digits.len(),
                text: digits.to_string(),
            });
            rest = tail;
        } else {
            out.push(Unit {
                class: char_class(first),
                weight: 0,
                text: first.to_lowercase().collect(),
            });
            rest = &rest[first.len_utf8()..];
        }
    }
    out
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) if x.to_lowercase().eq(y.to_lowercase()) => Ordering::Less,
            (false, true) if x.to_lowercase().eq(y.to_lowercase()) => Ordering::Greater,
            _ => Ordering::Equal,
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compares two strings the way a numeric-aware locale collation would.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    units(a)
        .cmp(&units(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}
