// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable",
                Some(msg.clone()),
            ),
            AppError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Upstream service error");
                (StatusCode::BAD_GATEWAY, "upstream_error", Some(msg.clone()))
            }
            AppError::NotConfigured(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_configured",
                Some(format!("{} is not configured", what)),
            ),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first field message; the frontend shows one alert at a time.
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{}'", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::BadRequest(message)
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Error for the checkout routes.
///
/// These routes keep the payment processor's error contract: every failure is
/// HTTP 500 with `{"error": {"message": ...}}`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CheckoutError {
    pub message: String,
}

impl CheckoutError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<AppError> for CheckoutError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Upstream(msg) | AppError::BadRequest(msg) => Self::new(msg),
            AppError::NotConfigured(what) => Self::new(format!("{} is not configured", what)),
            other => Self::new(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct CheckoutErrorBody<'a> {
    error: CheckoutErrorMessage<'a>,
}

#[derive(Serialize)]
struct CheckoutErrorMessage<'a> {
    message: &'a str,
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.message, "Error handling checkout session");
        let body = CheckoutErrorBody {
            error: CheckoutErrorMessage {
                message: &self.message,
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
