//! Predicates over metadata values.
//!
//! The metadata grammar reuses the expression parser with its own set of
//! primaries:
//! - `-true`, `-false`: the value is the JSON boolean,
//! - `-empty`: the value is an empty array or object,
//! - `.key …`: navigates into an object,
//! - `[?] …`, `[*] …`, `[n] …`: array predicates (see [`array`]).
//!
//! Key segments and brackets chain inside a single token
//! (`.tags[?].key -true`); the predicate they lead to is parsed from the
//! following tokens.

pub mod array;

use lazy_static::lazy_static;
use serde_json::Value;

use self::array::{parse_array_predicate, ArrayPredicate};
use super::error::{Error, Result};
use super::parser::{Parser, Primary};
use super::predicate::{Expr, Predicate};

lazy_static! {
    static ref PRIMARIES: Vec<Box<dyn Primary<Value>>> = vec![
        Box::new(BooleanPrimary {
            name: "-true",
            value: true
        }),
        Box::new(BooleanPrimary {
            name: "-false",
            value: false
        }),
        Box::new(EmptyPrimary),
        Box::new(KeyPrimary),
        Box::new(ArrayPrimary),
    ];
}

/// Parses the longest metadata predicate expression at the start of
/// `tokens`, returning the unconsumed tokens. Operators leading to tokens
/// that are not metadata primaries are left unconsumed.
pub fn parse_expression<'a>(tokens: &'a [String]) -> Result<(Expr<Value>, &'a [String])> {
    Parser::nested(&PRIMARIES[..]).parse(tokens)
}

/// What follows a `]` or a `.key` segment.
#[derive(Debug)]
pub enum KeyPath {
    /// Another array predicate, e.g. the second bracket of `[?][*]`.
    Array(ArrayPredicate),
    /// Navigation into an object field.
    Key { key: String, next: Box<KeyPath> },
    /// The terminal predicate.
    Predicate(Expr<Value>),
}

impl Predicate<Value> for KeyPath {
    fn eval(&self, value: &Value) -> bool {
        match self {
            KeyPath::Array(p) => p.eval(value),
            KeyPath::Key { key, next } => {
                lookup(value, key).map_or(false, |v| next.eval(v))
            }
            KeyPath::Predicate(p) => p.eval(value),
        }
    }

    fn eval_negated(&self, value: &Value) -> bool {
        match self {
            KeyPath::Array(p) => p.eval_negated(value),
            KeyPath::Key { key, next } => {
                lookup(value, key).map_or(false, |v| next.eval_negated(v))
            }
            KeyPath::Predicate(p) => p.eval_negated(value),
        }
    }
}

/// Returns the field `key` of an object value. An exact match wins over a
/// case-insensitive one.
fn lookup<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    let object = value.as_object()?;
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Parses `rest`, the unconsumed part of the current token, followed by
/// `tokens`. `segment` is the already consumed text the path continues from.
pub(crate) fn parse_key_path<'a>(
    rest: &str,
    segment: &str,
    tokens: &'a [String],
) -> Result<(KeyPath, &'a [String])> {
    if rest.is_empty() {
        if tokens.is_empty() {
            return Err(Error::ExpectedPredicateAfter(segment.to_owned()));
        }
        let (p, tokens) = parse_expression(tokens)?;
        return Ok((KeyPath::Predicate(p), tokens));
    }

    if rest.starts_with('[') {
        let (p, tokens) = parse_array_predicate(rest, tokens)?;
        return Ok((KeyPath::Array(p), tokens));
    }

    if let Some(rest) = rest.strip_prefix('.') {
        let end = rest.find(|c: char| c == '.' || c == '[').unwrap_or(rest.len());
        let key = &rest[..end];
        if key.is_empty() {
            return Err(Error::ExpectedKeyName);
        }

        let segment = format!(".{}", key);
        let (next, tokens) = parse_key_path(&rest[end..], &segment, tokens)?;
        return Ok((
            KeyPath::Key {
                key: key.to_owned(),
                next: Box::new(next),
            },
            tokens,
        ));
    }

    Err(Error::ExpectedDotOrBracket(rest.to_owned()))
}

#[derive(Debug)]
struct IsBoolean(bool);

impl Predicate<Value> for IsBoolean {
    fn eval(&self, value: &Value) -> bool {
        value.as_bool() == Some(self.0)
    }

    fn eval_negated(&self, value: &Value) -> bool {
        value.as_bool() == Some(!self.0)
    }
}

struct BooleanPrimary {
    name: &'static str,
    value: bool,
}

impl Primary<Value> for BooleanPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token == self.name
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Value>, &'a [String])> {
        Ok((Expr::primary(self.name, IsBoolean(self.value)), &tokens[1..]))
    }
}

#[derive(Debug)]
struct IsEmpty;

impl Predicate<Value> for IsEmpty {
    fn eval(&self, value: &Value) -> bool {
        match value {
            Value::Array(values) => values.is_empty(),
            Value::Object(object) => object.is_empty(),
            _ => false,
        }
    }

    fn eval_negated(&self, value: &Value) -> bool {
        match value {
            Value::Array(values) => !values.is_empty(),
            Value::Object(object) => !object.is_empty(),
            _ => false,
        }
    }
}

struct EmptyPrimary;

impl Primary<Value> for EmptyPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token == "-empty"
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Value>, &'a [String])> {
        Ok((Expr::primary("-empty", IsEmpty), &tokens[1..]))
    }
}

struct KeyPrimary;

impl Primary<Value> for KeyPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token.starts_with('.')
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Value>, &'a [String])> {
        let (path, rest) = parse_key_path(&tokens[0], "", &tokens[1..])?;
        Ok((Expr::primary(".", path), rest))
    }
}

struct ArrayPrimary;

impl Primary<Value> for ArrayPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token.starts_with('[')
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Value>, &'a [String])> {
        let (p, rest) = parse_array_predicate(&tokens[0], &tokens[1..])?;
        Ok((Expr::primary("[", p), rest))
    }
}
