// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the hosted text-to-flashcard endpoint.

use crate::error::AppError;
use crate::models::Flashcard;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
}

/// The endpoint answers with a bare array; some deployments wrap it.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Cards(Vec<Flashcard>),
    Wrapped { flashcards: Vec<Flashcard> },
}

/// Generation endpoint client.
#[derive(Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl GeneratorClient {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Turn free-form text into front/back pairs.
    pub async fn generate(&self, text: &str) -> Result<Vec<Flashcard>, AppError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(AppError::NotConfigured("Flashcard generation"))?;

        let response = self
            .http
            .post(endpoint)
            .timeout(GENERATE_TIMEOUT)
            .json(&GenerateRequest { text })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Failed to generate flashcards: HTTP {}: {}",
                status, body
            )));
        }

        let cards = match response.json::<GenerateResponse>().await.map_err(|e| {
            AppError::Upstream(format!("Invalid generation response: {}", e))
        })? {
            GenerateResponse::Cards(cards) => cards,
            GenerateResponse::Wrapped { flashcards } => flashcards,
        };

        tracing::debug!(count = cards.len(), "Generated flashcards");
        Ok(cards)
    }
}
