//! Grammar of the ledger note: validation, parsing and the history serializer.
//!
//! A note reads `"(" h1 ", " h2 ... "), " p1 ", " p2 ...`: an optional
//! parenthesized history group at the very start followed by bare pending
//! values. Values are decimals or `?`, oldest first.

use std::fmt;

use crate::{measurement::Measurement, note::LedgerNote};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reasons a ledger note (or one of its values) is rejected.
pub enum GrammarError {
    MisplacedOpeningParenthesis,
    MismatchedParentheses { opening: usize, closing: usize },
    TooManyParentheses { opening: usize, closing: usize },
    EmptyHistoryGroup,
    UnexpectedCharacters(String),
    InvalidToken(String),
    UnconventionalValue(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::MisplacedOpeningParenthesis => f.write_str(
                "an opening parenthesis must be the first character of the note",
            ),
            GrammarError::MismatchedParentheses { opening, closing } => write!(
                f,
                "mismatched parentheses ({opening} opening, {closing} closing)"
            ),
            GrammarError::TooManyParentheses { opening, closing } => write!(
                f,
                "expected at most one pair of parentheses, found {opening} opening and {closing} closing"
            ),
            GrammarError::EmptyHistoryGroup => f.write_str(
                "empty parentheses; a history group must hold at least one value",
            ),
            GrammarError::UnexpectedCharacters(chars) => {
                write!(f, "unexpected characters `{chars}` in the note")
            }
            GrammarError::InvalidToken(token) => write!(f, "`{token}` is not a valid value"),
            GrammarError::UnconventionalValue(token) => write!(
                f,
                "`{token}` does not look like a daily value (expected 2-3 digits and at most one decimal)"
            ),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Checks the overall shape of the note text. The first violated rule wins.
pub fn validate(text: &str) -> Result<(), GrammarError> {
    if let Some(position) = text.find('(') {
        if position != 0 {
            return Err(GrammarError::MisplacedOpeningParenthesis);
        }
    }

    let opening = text.matches('(').count();
    let closing = text.matches(')').count();
    if opening != closing {
        return Err(GrammarError::MismatchedParentheses { opening, closing });
    }
    if opening > 1 {
        return Err(GrammarError::TooManyParentheses { opening, closing });
    }
    if let Some((group, _)) = text.strip_prefix('(').and_then(|rest| rest.split_once(')')) {
        if group.chars().all(|c| c == ',' || c.is_whitespace()) {
            return Err(GrammarError::EmptyHistoryGroup);
        }
    }

    let mut unexpected: Vec<char> = strip_punctuation(text)
        .filter(|c| !c.is_ascii_digit())
        .collect();
    if !unexpected.is_empty() {
        unexpected.dedup();
        return Err(GrammarError::UnexpectedCharacters(
            unexpected.into_iter().collect(),
        ));
    }
    Ok(())
}

/// Splits validated text into its history and pending segments.
pub fn parse(text: &str) -> Result<LedgerNote, GrammarError> {
    validate(text)?;
    match text.split_once(')') {
        Some((history, pending)) => Ok(LedgerNote::new(
            tokenize(history.trim_start_matches('('))?,
            tokenize(pending)?,
        )),
        None => Ok(LedgerNote::new(Vec::new(), tokenize(text)?)),
    }
}

/// Serializes committed history. The trailing `", "` marks that no pending
/// values follow; an empty history serializes to an empty string.
pub fn format_history(history: &[Measurement]) -> String {
    if history.is_empty() {
        return String::new();
    }
    format!("({}), ", join_values(history))
}

pub(crate) fn join_values(values: &[Measurement]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn tokenize(segment: &str) -> Result<Vec<Measurement>, GrammarError> {
    segment
        .replace(',', " ")
        .split_whitespace()
        .map(str::parse)
        .collect()
}

fn strip_punctuation(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '.' | '?') && !c.is_whitespace())
}
