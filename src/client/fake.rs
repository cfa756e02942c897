//! An in-memory [`Client`] for tests.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::{child_path, Client, Entry, Error, LIST};

/// A fake resource tree. Entries are keyed by absolute paths, a child's
/// parent is the entry at its path with the last component stripped.
#[derive(Default)]
pub struct Fake {
    entries: HashMap<String, Entry>,
    children: HashMap<String, Vec<String>>,
    full_metadata: HashMap<String, Value>,
    failing_lists: HashSet<String>,
    failing_metadata: HashSet<String>,
    metadata_requests: RefCell<Vec<String>>,
}

impl Fake {
    pub fn new() -> Fake {
        Fake::default()
    }

    /// Adds an entry with children.
    pub fn dir(mut self, path: &str) -> Fake {
        self.add(path, LIST, Value::Null);
        self
    }

    /// Adds an entry without children carrying the given partial metadata.
    pub fn file(mut self, path: &str, metadata: Value) -> Fake {
        self.add(path, "read", metadata);
        self
    }

    /// Sets the metadata returned by [`Client::metadata`] for `path`.
    pub fn full_metadata(mut self, path: &str, metadata: Value) -> Fake {
        self.full_metadata.insert(path.to_owned(), metadata);
        self
    }

    /// Makes listing the children of `path` fail.
    pub fn fail_list(mut self, path: &str) -> Fake {
        self.failing_lists.insert(path.to_owned());
        self
    }

    /// Makes fetching the full metadata of `path` fail.
    pub fn fail_metadata(mut self, path: &str) -> Fake {
        self.failing_metadata.insert(path.to_owned());
        self
    }

    /// Paths full metadata was requested for, in request order.
    pub fn metadata_requests(&self) -> Vec<String> {
        self.metadata_requests.borrow().clone()
    }

    fn add(&mut self, path: &str, action: &str, metadata: Value) {
        let (parent, name) = match path.rfind('/') {
            Some(0) => ("/", &path[1..]),
            Some(i) => (&path[..i], &path[i + 1..]),
            None => ("", path),
        };

        if parent != path && self.entries.contains_key(parent) {
            self.children
                .entry(parent.to_owned())
                .or_default()
                .push(path.to_owned());
        }

        self.entries.insert(
            path.to_owned(),
            Entry {
                name: name.to_owned(),
                path: path.to_owned(),
                normalized_path: path.to_owned(),
                actions: vec![action.to_owned()],
                metadata,
            },
        );
    }
}

fn not_found(path: &str) -> Error {
    Error::Api {
        kind: "entry-not-found".to_owned(),
        msg: format!("{} does not exist", path),
    }
}

impl Client for Fake {
    fn info(&self, path: &str) -> Result<Entry, Error> {
        self.entries.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn list(&self, entry: &Entry) -> Result<BTreeMap<String, Entry>, Error> {
        if self.failing_lists.contains(&entry.path) {
            return Err(Error::Status(500));
        }

        let paths = match self.children.get(&entry.path) {
            Some(paths) => paths,
            None => return Ok(BTreeMap::new()),
        };

        let mut children = BTreeMap::new();
        for path in paths {
            let mut child = self.info(path)?;
            child.normalized_path = child_path(&entry.normalized_path, &child.name);
            children.insert(child.name.clone(), child);
        }
        Ok(children)
    }

    fn metadata(&self, path: &str) -> Result<Value, Error> {
        self.metadata_requests.borrow_mut().push(path.to_owned());
        if self.failing_metadata.contains(path) {
            return Err(Error::Status(503));
        }

        match self.full_metadata.get(path) {
            Some(metadata) => Ok(metadata.clone()),
            None => self.info(path).map(|entry| entry.metadata),
        }
    }
}
