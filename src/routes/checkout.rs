// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hosted checkout routes.
//!
//! Errors here keep the `{"error": {"message": ...}}` / HTTP 500 contract the
//! frontend's checkout and result pages expect (see [`CheckoutError`]).

use crate::error::CheckoutError;
use crate::models::Plan;
use crate::routes::is_allowed_origin;
use crate::services::CheckoutOutcome;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_PLAN: &str = "pro";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/checkout_sessions",
            get(retrieve_session).post(create_session),
        )
        .route("/api/checkout_result", get(checkout_result))
}

#[derive(Deserialize)]
struct SessionQuery {
    session_id: Option<String>,
}

fn require_session_id(query: SessionQuery) -> Result<String, CheckoutError> {
    query
        .session_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CheckoutError::new("Session ID is required"))
}

#[derive(Deserialize, Default)]
struct CreateSessionRequest {
    plan: Option<String>,
}

/// Create a checkout session and return the processor's session object.
///
/// The body is optional; an empty body buys the default plan.
async fn create_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, CheckoutError> {
    let request: CreateSessionRequest = if body.is_empty() {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| CheckoutError::new(format!("Invalid request body: {}", e)))?
    };

    let plan_id = request.plan.as_deref().unwrap_or(DEFAULT_PLAN);
    let plan = Plan::find(plan_id)
        .ok_or_else(|| CheckoutError::new(format!("Unknown plan: {}", plan_id)))?;
    if !plan.is_paid() {
        return Err(CheckoutError::new(format!(
            "The {} plan does not require checkout",
            plan.title
        )));
    }

    // Redirect back to the requesting frontend only if it is one we serve.
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .filter(|o| is_allowed_origin(o, &state.config.frontend_url))
        .unwrap_or(state.config.frontend_url.as_str());

    let session = state.payments.create_checkout_session(plan, origin).await?;
    Ok(Json(session))
}

/// Retrieve a checkout session verbatim.
async fn retrieve_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Value>, CheckoutError> {
    let session_id = require_session_id(query)?;
    let session = state
        .payments
        .retrieve_checkout_session(&session_id)
        .await?;
    Ok(Json(session))
}

/// Report whether a checkout session was paid.
async fn checkout_result(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<CheckoutOutcome>, CheckoutError> {
    let session_id = require_session_id(query)?;
    let session = state
        .payments
        .retrieve_checkout_session(&session_id)
        .await?;

    let outcome = CheckoutOutcome::from_session(&session_id, &session);
    tracing::info!(session_id = %session_id, paid = outcome.paid, "Checkout result");
    Ok(Json(outcome))
}
