//! Applies a compiled query to a remote entry tree.
//!
//! The walk is a synchronous depth-first recursion. A failed remote call
//! fails only the visit or listing it belongs to: it is reported, recorded in
//! the walk result and the traversal carries on with the remaining entries.

use log::{debug, warn};
use std::io::Write;

use super::Query;
use crate::client::{Client, Entry, LIST};

/// Traversal configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Visit entries after their children (post-order) instead of before.
    pub depth: bool,
    /// Entries shallower than this are not tested. The root has depth 0.
    pub mindepth: u32,
    /// Entries deeper than this are not visited.
    pub maxdepth: u32,
    /// Fetch the full metadata of every tested entry before testing it.
    /// Only takes effect if the query uses `-meta`.
    pub fullmeta: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            depth: false,
            mindepth: 0,
            maxdepth: u32::MAX,
            fullmeta: false,
        }
    }
}

/// Walks entry trees, printing the display paths of matching entries to
/// `out` and walk errors to `err`.
pub struct Walker<'a, C, O, E> {
    query: &'a Query,
    options: Options,
    client: &'a C,
    out: O,
    err: E,
}

impl<'a, C, O, E> Walker<'a, C, O, E>
where
    C: Client,
    O: Write,
    E: Write,
{
    pub fn new(query: &'a Query, options: Options, client: &'a C, out: O, err: E) -> Self {
        Walker {
            query,
            options,
            client,
            out,
            err,
        }
    }

    /// Walks the tree rooted at `path`. Returns true if no errors occurred.
    pub fn walk(&mut self, path: &str) -> bool {
        let root = match self.client.info(path) {
            Ok(root) => root,
            Err(error) => {
                self.report(format_args!("{}: {}", path, error));
                return false;
            }
        };

        self.walk_entry(root, 0)
    }

    fn walk_entry(&mut self, mut entry: Entry, depth: u32) -> bool {
        let mut successful = true;
        if !self.options.depth {
            successful &= self.visit(&mut entry, depth);
        }

        if depth < self.options.maxdepth && entry.supports(LIST) {
            match self.client.list(&entry) {
                Ok(children) => {
                    for (_, child) in children {
                        successful &= self.walk_entry(child, depth + 1);
                    }
                }
                Err(error) => {
                    self.report(format_args!(
                        "could not get children of {}: {}",
                        entry.normalized_path, error
                    ));
                    successful = false;
                }
            }
        }

        if self.options.depth {
            successful &= self.visit(&mut entry, depth);
        }
        successful
    }

    fn visit(&mut self, entry: &mut Entry, depth: u32) -> bool {
        if depth < self.options.mindepth {
            return true;
        }
        debug!("visiting '{}' at depth {}", entry.normalized_path, depth);

        if self.options.fullmeta && self.query.uses_meta() {
            match self.client.metadata(&entry.path) {
                Ok(metadata) => entry.metadata = metadata,
                Err(error) => {
                    self.report(format_args!(
                        "could not get full metadata of {}: {}",
                        entry.normalized_path, error
                    ));
                    return false;
                }
            }
        }

        if !self.query.is_match(entry) {
            return true;
        }

        match writeln!(self.out, "{}", entry.normalized_path) {
            Ok(()) => true,
            Err(error) => {
                self.report(format_args!(
                    "could not print {}: {}",
                    entry.normalized_path, error
                ));
                false
            }
        }
    }

    fn report(&mut self, message: std::fmt::Arguments) {
        if let Err(error) = writeln!(self.err, "{}", message) {
            warn!("failed to report '{}': {}", message, error);
        }
    }
}
