// Copyright 2020 Google LLC
//
// Use of this source code is governed by an MIT-style license that can be found
// in the LICENSE file or at https://opensource.org/licenses/MIT.

//! Access to the remote resource tree.
//!
//! The walker only needs three operations from the remote side: resolving a
//! path to an entry, listing the children of an entry and fetching the full
//! metadata of an entry. They are abstracted by the [`Client`] trait; the
//! [`http`] module implements it against the resource API.

mod error;
#[cfg(test)]
pub mod fake;
pub mod http;

pub use self::error::Error;

use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the action the API reports for entries with children.
pub const LIST: &str = "list";

/// A snapshot of a remote entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Name of the entry within its parent.
    pub name: String,
    /// Absolute path of the entry understood by the API.
    pub path: String,
    /// Path the entry is displayed as: the path the walk started from with
    /// the names of the descendants joined to it.
    pub normalized_path: String,
    /// Names of the actions the entry supports.
    pub actions: Vec<String>,
    /// Metadata sent along with the entry. Possibly partial; see
    /// [`Client::metadata`].
    pub metadata: Value,
}

impl Entry {
    pub fn supports(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

pub trait Client {
    /// Resolves `path` to an entry.
    fn info(&self, path: &str) -> Result<Entry, Error>;

    /// Returns the children of `entry` keyed by their names.
    fn list(&self, entry: &Entry) -> Result<BTreeMap<String, Entry>, Error>;

    /// Fetches the complete metadata of the entry with the given API path.
    fn metadata(&self, path: &str) -> Result<Value, Error>;
}

/// Joins `name` to the display path of a parent entry.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports() {
        let entry = Entry {
            name: "a".to_string(),
            path: "/a".to_string(),
            normalized_path: "a".to_string(),
            actions: vec!["list".to_string(), "exec".to_string()],
            metadata: Value::Null,
        };

        assert!(entry.supports(LIST));
        assert!(entry.supports("exec"));
        assert!(!entry.supports("read"));
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("/", "a"), "/a");
        assert_eq!(child_path("/a", "b"), "/a/b");
        assert_eq!(child_path("a/", "b"), "a/b");
        assert_eq!(child_path(".", "b"), "./b");
    }
}
