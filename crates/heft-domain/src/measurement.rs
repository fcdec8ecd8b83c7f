//! Single-day measurement values as they appear in the ledger note.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::grammar::GrammarError;

/// Literal used for a day whose value was not recorded.
pub const UNKNOWN_TOKEN: &str = "?";
/// `?`, `??` and `???` all mark an unknown day.
const MAX_UNKNOWN_MARKS: usize = 3;

const CONVENTIONAL_INTEGER_DIGITS: std::ops::RangeInclusive<usize> = 2..=3;
const CONVENTIONAL_FRACTION_DIGITS: usize = 1;

/// A recorded decimal value. Keeps the literal text so the note can be
/// reproduced exactly (`71.0` stays `71.0`).
#[derive(Debug, Clone)]
pub struct Reading {
    literal: String,
    value: f64,
}

impl Reading {
    /// Parses a decimal literal: one or more digits, optionally followed by
    /// `.` and more digits.
    pub fn parse(literal: &str) -> Option<Self> {
        let (integer, fraction) = split_literal(literal);
        if integer.is_empty() || !all_digits(integer) || !fraction.map_or(true, all_digits) {
            return None;
        }
        let value = literal.trim_end_matches('.').parse::<f64>().ok()?;
        Some(Self {
            literal: literal.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// True for values with 2–3 integer digits and at most one fractional digit.
    pub fn has_conventional_shape(&self) -> bool {
        let (integer, fraction) = split_literal(&self.literal);
        CONVENTIONAL_INTEGER_DIGITS.contains(&integer.len())
            && fraction.map_or(0, str::len) <= CONVENTIONAL_FRACTION_DIGITS
    }
}

impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl Eq for Reading {}

impl Hash for Reading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.literal.hash(state);
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// One day's measurement: a known reading or the `?` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Measurement {
    Known(Reading),
    Unknown,
}

impl Measurement {
    /// Numeric value, `None` for [`Measurement::Unknown`].
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Known(reading) => Some(reading.value()),
            Measurement::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Measurement::Unknown)
    }

    /// Unknown values always pass; readings must look like a plausible daily value.
    pub fn has_conventional_shape(&self) -> bool {
        match self {
            Measurement::Known(reading) => reading.has_conventional_shape(),
            Measurement::Unknown => true,
        }
    }
}

impl FromStr for Measurement {
    type Err = GrammarError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if is_unknown_marker(token) {
            return Ok(Measurement::Unknown);
        }
        Reading::parse(token)
            .map(Measurement::Known)
            .ok_or_else(|| GrammarError::InvalidToken(token.to_string()))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Known(reading) => reading.fmt(f),
            Measurement::Unknown => f.write_str(UNKNOWN_TOKEN),
        }
    }
}

fn is_unknown_marker(token: &str) -> bool {
    (1..=MAX_UNKNOWN_MARKS).contains(&token.len()) && token.chars().all(|c| c == '?')
}

fn split_literal(literal: &str) -> (&str, Option<&str>) {
    match literal.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (literal, None),
    }
}

fn all_digits(part: &str) -> bool {
    part.chars().all(|c| c.is_ascii_digit())
}
