//! Primaries of entry expressions.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::error::{Error, Result};
use super::glob::glob_to_regex;
use super::meta;
use super::parser::Primary;
use super::predicate::{Expr, Predicate};
use crate::client::Entry;

/// Name of the primary testing entry metadata.
pub const META: &str = "-meta";

lazy_static! {
    pub static ref PRIMARIES: Vec<Box<dyn Primary<Entry>>> = vec![
        Box::new(LiteralPrimary {
            name: "-true",
            value: true
        }),
        Box::new(LiteralPrimary {
            name: "-false",
            value: false
        }),
        Box::new(GlobPrimary {
            name: "-name",
            field: Field::Name
        }),
        Box::new(GlobPrimary {
            name: "-path",
            field: Field::Path
        }),
        Box::new(MetaPrimary),
    ];
}

struct LiteralPrimary {
    name: &'static str,
    value: bool,
}

impl Primary<Entry> for LiteralPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token == self.name
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Entry>, &'a [String])> {
        Ok((Expr::Literal(self.value), &tokens[1..]))
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Path,
}

/// `-name <glob>`, `-path <glob>`
#[derive(Debug)]
struct GlobPredicate {
    regex: Regex,
    field: Field,
}

impl Predicate<Entry> for GlobPredicate {
    fn eval(&self, entry: &Entry) -> bool {
        match self.field {
            Field::Name => self.regex.is_match(&entry.name),
            Field::Path => self.regex.is_match(&entry.normalized_path),
        }
    }

    fn eval_negated(&self, entry: &Entry) -> bool {
        !self.eval(entry)
    }
}

struct GlobPrimary {
    name: &'static str,
    field: Field,
}

impl Primary<Entry> for GlobPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token == self.name
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Entry>, &'a [String])> {
        let glob = match tokens.get(1) {
            Some(glob) => glob,
            None => return Err(Error::MissingArgument(self.name.to_owned())),
        };
        let regex = glob_to_regex(glob).map_err(|error| Error::InvalidGlob {
            glob: glob.clone(),
            error,
        })?;

        let predicate = GlobPredicate {
            regex,
            field: self.field,
        };
        Ok((Expr::primary(self.name, predicate), &tokens[2..]))
    }
}

/// `-meta <expression>`: applies a metadata expression to the entry's
/// metadata.
#[derive(Debug)]
struct MetaPredicate(Expr<Value>);

impl Predicate<Entry> for MetaPredicate {
    fn eval(&self, entry: &Entry) -> bool {
        self.0.eval(&entry.metadata)
    }

    fn eval_negated(&self, entry: &Entry) -> bool {
        self.0.eval_negated(&entry.metadata)
    }
}

struct MetaPrimary;

impl Primary<Entry> for MetaPrimary {
    fn is_primary_token(&self, token: &str) -> bool {
        token == META || token == "-m"
    }

    fn parse<'a>(&self, tokens: &'a [String]) -> Result<(Expr<Entry>, &'a [String])> {
        if tokens.len() < 2 {
            return Err(Error::MissingArgument(META.to_owned()));
        }

        let (expr, rest) = meta::parse_expression(&tokens[1..])?;
        Ok((Expr::primary(META, MetaPredicate(expr)), rest))
    }
}
