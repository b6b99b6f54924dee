// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard generation from pasted text.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::Flashcard;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate", post(generate))
}

#[derive(Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 20000, message = "Text must be at most 20000 characters.")
    )]
    pub text: String,
}

fn not_blank(text: &str) -> std::result::Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Please enter some text to generate flashcards.".into());
        return Err(err);
    }
    Ok(())
}

/// Generate flashcards from the request text. Nothing is saved.
async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Vec<Flashcard>>> {
    request.validate()?;

    tracing::info!(
        user_id = %user.user_id,
        chars = request.text.chars().count(),
        "Generating flashcards"
    );

    let flashcards = state.generator.generate(&request.text).await?;
    Ok(Json(flashcards))
}
