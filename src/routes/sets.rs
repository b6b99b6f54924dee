// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard set routes: save, list, fetch and delete.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::flashcard::validate_set_name;
use crate::models::{Flashcard, FlashcardSet};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/flashcard-sets", get(list_sets).post(save_set))
        .route(
            "/api/flashcard-sets/{name}",
            get(get_set).delete(delete_set),
        )
}

/// Validate a set name taken from the URL path.
pub(crate) fn path_set_name(name: &str) -> Result<&str> {
    validate_set_name(name).map_err(|e| {
        AppError::BadRequest(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid set name".to_string()),
        )
    })?;
    Ok(name)
}

// ─── Save ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SaveSetRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_set_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "There are no flashcards to save."))]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SaveSetResponse {
    pub name: String,
    pub count: usize,
    /// `false` when an existing set with this name was replaced
    pub created: bool,
}

/// Save generated flashcards under a set name.
async fn save_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut request): Json<SaveSetRequest>,
) -> Result<(StatusCode, Json<SaveSetResponse>)> {
    request.name = request.name.trim().to_string();
    request.validate()?;

    let set = FlashcardSet {
        flashcards: request.flashcards,
    };
    let outcome = state
        .db
        .save_flashcard_set(&user.user_id, &request.name, &set)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        set_name = %request.name,
        count = set.flashcards.len(),
        created = outcome.created,
        "Flashcard set saved"
    );

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SaveSetResponse {
            name: request.name,
            count: set.flashcards.len(),
            created: outcome.created,
        }),
    ))
}

// ─── List ────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlashcardSetSummary {
    pub name: String,
    /// Frontend study page for this set
    pub study_url: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlashcardSetsResponse {
    pub sets: Vec<FlashcardSetSummary>,
}

/// List the user's sets with best-effort thumbnails.
async fn list_sets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FlashcardSetsResponse>> {
    let names: Vec<String> = state
        .db
        .list_flashcard_sets(&user.user_id)
        .await?
        .into_iter()
        .map(|entry| entry.name)
        .collect();

    tracing::debug!(user_id = %user.user_id, count = names.len(), "Listing flashcard sets");

    let thumbnails = state.photos.thumbnails(&names).await;

    let sets = names
        .into_iter()
        .zip(thumbnails)
        .map(|(name, thumbnail_url)| FlashcardSetSummary {
            study_url: format!("/flashcard?id={}", urlencoding::encode(&name)),
            name,
            thumbnail_url,
        })
        .collect();

    Ok(Json(FlashcardSetsResponse { sets }))
}

// ─── Fetch / Delete ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlashcardSetResponse {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

async fn get_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<Json<FlashcardSetResponse>> {
    let name = path_set_name(&name)?;
    let set = state
        .db
        .get_flashcard_set(&user.user_id, name)
        .await?
        .ok_or_else(|| AppError::NotFound("Flashcard set not found.".to_string()))?;

    Ok(Json(FlashcardSetResponse {
        name: name.to_string(),
        flashcards: set.flashcards,
    }))
}

/// Delete a set and its index entry. Missing sets are not an error.
async fn delete_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    let name = path_set_name(&name)?;
    let listed = state.db.delete_flashcard_set(&user.user_id, name).await?;

    tracing::info!(
        user_id = %user.user_id,
        set_name = %name,
        listed,
        "Flashcard set deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
