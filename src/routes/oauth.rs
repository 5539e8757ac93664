// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth callback route.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/oauth2/callback", get(oauth_callback))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Provider key handed back to the bridge after authorization.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub api_key: String,
    pub api_url: String,
}

/// OAuth callback - exchange the authorization code for the caller's credential.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<CallbackResponse>> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from identity provider");
        return Err(AppError::BadRequest(format!("Authorization failed: {}", error)));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");
    let credential = state.bridge.handle_oauth_callback(&code).await?;

    Ok(Json(CallbackResponse {
        api_key: credential.as_str().to_string(),
        api_url: state.config.api_url.clone(),
    }))
}
