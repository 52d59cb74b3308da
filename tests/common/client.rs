//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all library endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    #[allow(dead_code)]
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Get stats request failed")
    }

    /// GET /songs with optional filters and pagination
    pub async fn get_songs(
        &self,
        group: Option<&str>,
        song: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Response {
        let mut url = format!("{}/songs", self.base_url);
        let mut params = vec![];
        if let Some(g) = group {
            params.push(format!("group={}", g));
        }
        if let Some(s) = song {
            params.push(format!("song={}", s));
        }
        if let Some(l) = limit {
            params.push(format!("limit={}", l));
        }
        if let Some(o) = offset {
            params.push(format!("offset={}", o));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.client
            .get(&url)
            .send()
            .await
            .expect("Get songs request failed")
    }

    /// GET /songs with a raw query string, for malformed-parameter tests
    pub async fn get_songs_raw(&self, query: &str) -> Response {
        self.client
            .get(format!("{}/songs?{}", self.base_url, query))
            .send()
            .await
            .expect("Get songs raw request failed")
    }

    /// GET /songs/{id}
    pub async fn get_song(&self, id: i64) -> Response {
        self.client
            .get(format!("{}/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Get song request failed")
    }

    /// POST /songs
    pub async fn add_song(
        &self,
        group_name: &str,
        song_name: &str,
        release_date: &str,
        text: &str,
        link: &str,
    ) -> Response {
        self.client
            .post(format!("{}/songs", self.base_url))
            .json(&json!({
                "group_name": group_name,
                "song_name": song_name,
                "release_date": release_date,
                "text": text,
                "link": link
            }))
            .send()
            .await
            .expect("Add song request failed")
    }

    /// POST /songs with an arbitrary body, for malformed-payload tests
    pub async fn add_song_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("{}/songs", self.base_url))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Add song raw request failed")
    }

    /// PUT /songs/{id}
    pub async fn update_song(&self, id: i64, body: serde_json::Value) -> Response {
        self.client
            .put(format!("{}/songs/{}", self.base_url, id))
            .json(&body)
            .send()
            .await
            .expect("Update song request failed")
    }

    /// DELETE /songs/{id}
    pub async fn delete_song(&self, id: i64) -> Response {
        self.client
            .delete(format!("{}/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete song request failed")
    }
}
