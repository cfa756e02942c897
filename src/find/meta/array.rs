//! Array predicates: `[?]` (some element), `[*]` (every element) and `[n]`
//! (the n-th element).
//!
//! The bracket may be followed, inside the same token, by a key segment
//! (`[?].key`) or another bracket (`[?][*]`); otherwise the predicate applied
//! to the elements is parsed from the following tokens.

use serde_json::Value;

use super::{parse_key_path, KeyPath};
use crate::find::error::{Error, Result};
use crate::find::predicate::Predicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayPredicateType {
    /// `[?]`
    Some,
    /// `[*]`
    All,
    /// `[n]`
    Nth(usize),
}

#[derive(Debug)]
pub struct ArrayPredicate {
    kind: ArrayPredicateType,
    next: Box<KeyPath>,
}

impl ArrayPredicate {
    pub fn new(kind: ArrayPredicateType, next: KeyPath) -> ArrayPredicate {
        ArrayPredicate {
            kind,
            next: Box::new(next),
        }
    }
}

impl Predicate<Value> for ArrayPredicate {
    fn eval(&self, value: &Value) -> bool {
        let values = match value.as_array() {
            Some(values) => values,
            None => return false,
        };

        match self.kind {
            ArrayPredicateType::Some => values.iter().any(|v| self.next.eval(v)),
            ArrayPredicateType::All => values.iter().all(|v| self.next.eval(v)),
            ArrayPredicateType::Nth(n) => {
                values.get(n).map_or(false, |v| self.next.eval(v))
            }
        }
    }

    fn eval_negated(&self, value: &Value) -> bool {
        let values = match value.as_array() {
            Some(values) => values,
            None => return false,
        };

        match self.kind {
            ArrayPredicateType::Some => !values.iter().any(|v| self.next.eval(v)),
            ArrayPredicateType::All => {
                values.iter().any(|v| self.next.eval_negated(v))
            }
            // An out-of-range index fails under both polarities.
            ArrayPredicateType::Nth(n) => {
                values.get(n).map_or(false, |v| self.next.eval_negated(v))
            }
        }
    }
}

/// Parses an array predicate from `tokens`, returning the unconsumed tokens.
pub fn parse<'a>(tokens: &'a [String]) -> Result<(ArrayPredicate, &'a [String])> {
    match tokens.split_first() {
        Some((token, rest)) => parse_array_predicate(token, rest),
        None => Err(Error::ExpectedOpeningBracket),
    }
}

/// Parses an array predicate starting at `token`, a possibly partially
/// consumed token, and continuing with `tokens`.
pub(crate) fn parse_array_predicate<'a>(
    token: &str,
    tokens: &'a [String],
) -> Result<(ArrayPredicate, &'a [String])> {
    let (kind, bracket, rest) = parse_array_predicate_type(token)?;
    let (next, tokens) = parse_key_path(rest, bracket, tokens)?;
    Ok((ArrayPredicate::new(kind, next), tokens))
}

/// Parses the leading bracket of `token`. Returns the predicate type, the
/// bracket text and the rest of the token.
fn parse_array_predicate_type(
    token: &str,
) -> Result<(ArrayPredicateType, &str, &str)> {
    let inner = match token.strip_prefix('[') {
        Some(inner) => inner,
        None => return Err(Error::ExpectedOpeningBracket),
    };

    match inner.chars().next() {
        None => Err(Error::ExpectedClosingBracket),
        Some(']') => Err(Error::ExpectedArrayPredicateType),
        Some(c) if c == '*' || c == '?' => {
            if !inner[1..].starts_with(']') {
                return Err(Error::ExpectedClosingBracketAfter(c));
            }
            let kind = if c == '*' {
                ArrayPredicateType::All
            } else {
                ArrayPredicateType::Some
            };
            Ok((kind, &token[..3], &inner[2..]))
        }
        Some(_) => {
            let end = match inner.find(']') {
                Some(end) => end,
                None => return Err(Error::ExpectedClosingBracket),
            };
            let index = &inner[..end];
            if !index.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::ExpectedArrayIndex);
            }
            let n = index.parse().map_err(|_| Error::ExpectedArrayIndex)?;
            Ok((ArrayPredicateType::Nth(n), &token[..end + 2], &inner[end + 1..]))
        }
    }
}
