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
    #[error("Missing or malformed provider key")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Token exchange failed: {0}")]
    AuthExchange(String),

    #[error("CRM API error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Upstream rejected our identity token. Reported to the caller as 401.
    pub const CRM_TOKEN_ERROR: &'static str = "CRM rejected identity token";
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
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::AuthExchange(msg) => {
                tracing::warn!(error = %msg, "Token exchange failed");
                (StatusCode::UNAUTHORIZED, "auth_exchange_failed", None)
            }
            AppError::Upstream(msg) if msg == Self::CRM_TOKEN_ERROR => {
                tracing::warn!("CRM rejected identity token");
                (StatusCode::UNAUTHORIZED, "crm_token_rejected", None)
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "crm_error", Some(msg.clone())),
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

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
