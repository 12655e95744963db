//! Blocking REST client for the sparseview workspace API.
//!
//! The backend exposes two endpoints:
//!
//! - `GET {base}/api/workspaces` — list of workspace names
//! - `GET {base}/api/workspace/{name}` — one workspace (points + image poses)
//!
//! Fetches are issued synchronously from UI interactions; there is no retry
//! or cancellation.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;

use std::time::Duration;

use serde::de::DeserializeOwned;
use sparseview_core::workspace::{Workspace, WorkspaceList};

pub use error::{ClientError, Result};

/// Request timeout for workspace fetches. Sparse clouds with a few hundred
/// thousand points can take a while to serialize on the backend side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a workspace API server.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://127.0.0.1:5000`).
    ///
    /// A trailing slash on the base URL is stripped.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the list of available workspace names.
    pub fn list_workspaces(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/workspaces", self.base_url);
        let list: WorkspaceList = self.get_json(&url)?;
        Ok(list.workspaces)
    }

    /// Fetches a single workspace by name.
    pub fn fetch_workspace(&self, name: &str) -> Result<Workspace> {
        let url = format!("{}/api/workspace/{name}", self.base_url);
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {url}");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn bare_url_is_kept() {
        let client = ApiClient::new("http://viewer.example.org:8080").unwrap();
        assert_eq!(client.base_url(), "http://viewer.example.org:8080");
    }

    // Wire-format fixtures: these decode the same payload shapes the live
    // endpoints produce, without a network round trip.

    #[test]
    fn workspace_list_fixture_decodes() {
        let json = r#"{"workspaces": ["south-building", "gerrard-hall"]}"#;
        let list: WorkspaceList = serde_json::from_str(json).unwrap();
        assert_eq!(list.workspaces, ["south-building", "gerrard-hall"]);
    }

    #[test]
    fn workspace_fixture_with_intrinsics_block_decodes() {
        let json = r#"{
            "points": [
                {"x": 0.1, "y": 0.2, "z": 0.3, "r": 10, "g": 20, "b": 30},
                {"x": -1.0, "y": 0.0, "z": 4.5, "r": 255, "g": 255, "b": 255}
            ],
            "images": {
                "P1180141.JPG": {"qw": 0.9, "qx": 0.1, "qy": 0.0, "qz": 0.0,
                                  "tx": 1.0, "ty": 2.0, "tz": 3.0}
            },
            "cameras": {"1": {"model": "SIMPLE_RADIAL", "params": [2559.8, 1536.0, 1152.0, -0.0204]}}
        }"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert_eq!(ws.points.len(), 2);
        assert_eq!(ws.images.len(), 1);
        assert!(ws.images.contains_key("P1180141.JPG"));
    }

    #[test]
    fn empty_workspace_fixture_decodes() {
        let ws: Workspace = serde_json::from_str(r#"{"points": [], "images": {}}"#).unwrap();
        assert!(ws.points.is_empty());
        assert!(ws.images.is_empty());
    }
}
