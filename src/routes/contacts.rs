// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact listing route.

use crate::error::Result;
use crate::models::{Credential, NormalizedContact};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/contacts", get(get_contacts))
}

/// All candidates and contacts for the calling credential.
async fn get_contacts(
    State(state): State<Arc<AppState>>,
    Extension(credential): Extension<Credential>,
) -> Result<Json<Vec<NormalizedContact>>> {
    tracing::info!(credential = %credential, "Fetching contacts");
    let contacts = state.bridge.fetch_all(&credential).await?;
    Ok(Json(contacts))
}
