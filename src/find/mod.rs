// Copyright 2020 Google LLC
//
// Use of this source code is governed by an MIT-style license that can be found
// in the LICENSE file or at https://opensource.org/licenses/MIT.

//! Compiling and evaluating `find` queries.
//!
//! A query is a predicate expression over entries:
//! - `-true`, `-false`: constants,
//! - `-name <glob>`, `-path <glob>`: match an entry's name or display path,
//! - `-meta <expression>` (`-m`): match an entry's metadata, see [`meta`],
//! combined with `!`, `-a` (or juxtaposition), `-o` and parentheses.
//!
//! Compiled queries are applied to a remote tree by the [`walker`].

mod error;
pub mod glob;
pub mod meta;
pub mod parser;
pub mod predicate;
pub mod primary;
pub mod walker;

pub use self::error::{Error, Result};

use self::parser::Parser;
use self::predicate::Expr;
use crate::client::Entry;

/// A compiled query.
#[derive(Debug)]
pub struct Query {
    predicate: Expr<Entry>,
    uses_meta: bool,
}

impl Query {
    fn new(predicate: Expr<Entry>) -> Query {
        let uses_meta = predicate.uses_primary(primary::META);
        Query {
            predicate,
            uses_meta,
        }
    }

    pub fn predicate(&self) -> &Expr<Entry> {
        &self.predicate
    }

    /// Whether the query inspects entry metadata.
    pub fn uses_meta(&self) -> bool {
        self.uses_meta
    }

    pub fn is_match(&self, entry: &Entry) -> bool {
        self.predicate.eval(entry)
    }
}

/// Compiles a query from command line tokens. No tokens match every entry.
pub fn parse(tokens: &[String]) -> Result<Query> {
    if tokens.is_empty() {
        return Ok(Query::new(Expr::Literal(true)));
    }

    let (predicate, rest) = Parser::new(&primary::PRIMARIES[..]).parse(tokens)?;
    match rest.first() {
        None => Ok(Query::new(predicate)),
        Some(token) if token == ")" => Err(Error::NoBeginningParen),
        Some(token) => Err(Error::UnknownPredicate(token.clone())),
    }
}

/// Compiles a query from whitespace-separated text.
pub fn parse_query(text: &str) -> Result<Query> {
    let tokens: Vec<String> = text.split_whitespace().map(String::from).collect();
    parse(&tokens)
}
