// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Card-by-card study of a saved set.
//!
//! Stateless: the client sends back the position it was given along with
//! the next action, and receives the new position and the visible side.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::study::StudyError;
use crate::models::{StudyAction, StudySession};
use crate::routes::sets::path_set_name;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/flashcard-sets/{name}/study", post(study))
}

#[derive(Deserialize, Default)]
pub struct StudyRequest {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub show_answer: bool,
    #[serde(default)]
    pub action: StudyAction,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StudyResponse {
    pub set_name: String,
    pub index: usize,
    pub total: usize,
    pub show_answer: bool,
    /// Text on the side facing up
    pub text: String,
    /// e.g. "Card 2 of 10"
    pub label: String,
}

async fn study(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
    request: Option<Json<StudyRequest>>,
) -> Result<Json<StudyResponse>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let name = path_set_name(&name)?;
    let set = state
        .db
        .get_flashcard_set(&user.user_id, name)
        .await?
        .ok_or_else(|| AppError::NotFound("Flashcard set not found.".to_string()))?;

    let mut session = StudySession::resume(set.flashcards, request.index, request.show_answer)
        .map_err(|e| match e {
            StudyError::Empty => AppError::Unprocessable(e.to_string()),
            StudyError::OutOfRange { .. } => AppError::BadRequest(e.to_string()),
        })?;
    session.apply(request.action);

    Ok(Json(StudyResponse {
        set_name: name.to_string(),
        index: session.index(),
        total: session.total(),
        show_answer: session.show_answer(),
        text: session.visible_text().to_string(),
        label: session.progress_label(),
    }))
}
