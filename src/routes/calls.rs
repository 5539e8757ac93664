// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Call event route.

use crate::error::{AppError, Result};
use crate::models::{CallEvent, Credential};
use crate::services::CallLogOutcome;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/events/calls", post(handle_call_event))
}

/// Record a finished call against the matching CRM record, if any.
async fn handle_call_event(
    State(state): State<Arc<AppState>>,
    Extension(credential): Extension<Credential>,
    payload: std::result::Result<Json<CallEvent>, JsonRejection>,
) -> Result<Json<CallLogOutcome>> {
    let Json(event) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if event.end < event.start {
        return Err(AppError::BadRequest(
            "Call end precedes call start".to_string(),
        ));
    }

    tracing::info!(
        credential = %credential,
        direction = ?event.direction,
        "Handling call event"
    );

    let outcome = state.bridge.log_call(&credential, &event).await?;
    Ok(Json(outcome))
}
