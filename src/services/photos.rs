// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pexels photo search for flashcard set thumbnails.
//!
//! Thumbnails are decoration only: every failure is logged and turned into
//! "no thumbnail".

use crate::error::AppError;
use futures_util::{stream, StreamExt};
use serde::Deserialize;
use std::time::Duration;

const PHOTO_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONCURRENT_LOOKUPS: usize = 8;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Deserialize)]
struct PhotoSources {
    medium: String,
}

/// Pexels API client.
#[derive(Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PhotoClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Look up one thumbnail per query, preserving order.
    pub async fn thumbnails(&self, queries: &[String]) -> Vec<Option<String>> {
        if self.api_key.is_none() {
            return vec![None; queries.len()];
        }

        stream::iter(queries.iter().cloned())
            .map(|query| async move { self.thumbnail(&query).await })
            .buffered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await
    }

    /// First search result's medium-size URL, if any.
    pub async fn thumbnail(&self, query: &str) -> Option<String> {
        let api_key = self.api_key.as_deref()?;

        match self.search_first(api_key, query).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::debug!(query, "No images found");
                None
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Error fetching images from Pexels");
                None
            }
        }
    }

    async fn search_first(&self, api_key: &str, query: &str) -> Result<Option<String>, AppError> {
        let response = self
            .http
            .get(format!("{}/v1/search", self.base_url))
            .timeout(PHOTO_TIMEOUT)
            .header(reqwest::header::AUTHORIZATION, api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Pexels returned HTTP {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        Ok(body.photos.into_iter().next().map(|p| p.src.medium))
    }
}
