//! [`Client`] implementation talking to the resource API over HTTP.
//!
//! Every operation is a `GET /fs/<endpoint>?path=<api path>` request. Error
//! responses carry a `{"kind": ..., "msg": ...}` object.

use log::debug;
use reqwest::blocking;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use super::{child_path, Client, Entry, Error};
use crate::path::absolutize;

pub struct HttpClient {
    base_url: String,
    http: blocking::Client,
}

impl HttpClient {
    /// Creates a client for the API served at `base_url`. Requests taking
    /// longer than `timeout` fail.
    pub fn new(base_url: &str, timeout: Duration) -> Result<HttpClient, Error> {
        let http = blocking::Client::builder().timeout(timeout).build()?;
        Ok(HttpClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    fn get<R: DeserializeOwned>(&self, endpoint: &str, path: &str) -> Result<R, Error> {
        let url = format!("{}/fs/{}", self.base_url, endpoint);
        debug!("requesting {} for '{}'", url, path);

        let response = self.http.get(&url).query(&[("path", path)]).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes()?;
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(response.json()?)
    }
}

impl Client for HttpClient {
    fn info(&self, path: &str) -> Result<Entry, Error> {
        let cwd = std::env::current_dir()?;
        let api_path = absolutize(Path::new(path), &cwd);
        let entry: ApiEntry = self.get("info", &api_path.to_string_lossy())?;
        Ok(entry.into_entry(display_path(path)))
    }

    fn list(&self, entry: &Entry) -> Result<BTreeMap<String, Entry>, Error> {
        let children: Vec<ApiEntry> = self.get("list", &entry.path)?;
        debug!("'{}' has {} children", entry.path, children.len());

        Ok(children
            .into_iter()
            .map(|child| {
                let normalized_path = child_path(&entry.normalized_path, &child.name);
                (child.name.clone(), child.into_entry(normalized_path))
            })
            .collect())
    }

    fn metadata(&self, path: &str) -> Result<Value, Error> {
        self.get("metadata", path)
    }
}

/// An entry as serialized by the API.
#[derive(Debug, Deserialize)]
struct ApiEntry {
    name: String,
    path: String,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    metadata: Value,
}

impl ApiEntry {
    fn into_entry(self, normalized_path: String) -> Entry {
        Entry {
            name: self.name,
            path: self.path,
            normalized_path,
            actions: self.actions,
            metadata: self.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    kind: String,
    msg: String,
}

/// Builds the error for a non-success response with the given body.
fn api_error(status: u16, body: &[u8]) -> Error {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(error) => Error::Api {
            kind: error.kind,
            msg: error.msg,
        },
        Err(_) => Error::Status(status),
    }
}

/// Returns the path the walk root is displayed as.
fn display_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    }
}
