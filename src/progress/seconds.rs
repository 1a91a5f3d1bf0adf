//! Parse-and-coerce step for attempt durations
//!
//! `timeSpentSeconds` arrives as a JSON number, a numeric string, something
//! else entirely, or not at all. [`read_seconds`] turns whatever is there into
//! a [`SecondsReading`]; [`SecondsReading::contribution`] is the single place
//! where unusable values become zero.

use serde_json::Value;

/// Field carrying the elapsed time of one attempt
pub const TIME_SPENT_FIELD: &str = "timeSpentSeconds";

/// Typed result of reading one attempt's elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecondsReading {
    /// A finite number of seconds
    Valid(f64),
    /// Field absent, `null`, or an empty string
    Missing,
    /// Present but not a finite number
    Invalid,
}

impl SecondsReading {
    /// Seconds this reading adds to a total. Missing and invalid values add 0.
    pub fn contribution(self) -> f64 {
        match self {
            SecondsReading::Valid(secs) => secs,
            SecondsReading::Missing | SecondsReading::Invalid => 0.0,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, SecondsReading::Valid(_))
    }
}

/// Pure: Read the elapsed time of an attempt record
///
/// Attempts that are not JSON objects carry no field and read as `Missing`.
pub fn read_seconds(attempt: &Value) -> SecondsReading {
    match attempt.get(TIME_SPENT_FIELD) {
        Some(value) => coerce_seconds(value),
        None => SecondsReading::Missing,
    }
}

/// Pure: Coerce a raw JSON value to seconds
///
/// - numbers are taken as-is; numbers outside the `f64` range are `Invalid`
/// - non-blank strings are parsed with [`parse_numeric_str`]
/// - `null` and blank strings are `Missing`
/// - booleans, arrays and objects are `Invalid`
pub fn coerce_seconds(value: &Value) -> SecondsReading {
    let parsed = match value {
        Value::Null => return SecondsReading::Missing,
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return SecondsReading::Missing,
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };

    match parsed {
        Some(secs) if secs.is_finite() => SecondsReading::Valid(secs),
        _ => SecondsReading::Invalid,
    }
}

/// Pure: Parse a numeric string the way browsers convert strings to numbers
///
/// Accepts surrounding whitespace, decimal and exponent notation with an
/// optional sign, `Infinity`, and unsigned `0x`/`0o`/`0b` integer literals.
/// Returns `None` for anything else. Non-finite results are returned as-is;
/// callers decide what to do with them.
pub fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(value) = parse_radix_literal(s) {
        return Some(value);
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rust also accepts "inf", "nan", etc.; only plain decimal notation here.
    let is_decimal = unsigned
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.')
        && unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && unsigned.bytes().any(|b| b.is_ascii_digit());
    if !is_decimal {
        return None;
    }

    unsigned.parse::<f64>().ok().map(|v| sign * v)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    // Fold into f64 so oversized literals degrade to large numbers, not errors.
    Some(
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d)),
    )
}
