// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider key middleware.
//!
//! The bridge caller sends its credential in `X-Provider-Key` on every
//! request. It is decoded here, once, and handed to handlers as a
//! [`Credential`] extension.

use crate::error::AppError;
use crate::models::Credential;
use axum::{extract::Request, middleware::Next, response::Response};

pub const PROVIDER_KEY_HEADER: &str = "x-provider-key";

/// Middleware that requires a provider key.
pub async fn require_credential(mut request: Request, next: Next) -> Result<Response, AppError> {
    let raw = request
        .headers()
        .get(PROVIDER_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let credential = Credential::parse(raw);
    if credential.access_token_id.is_empty() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(credential);
    Ok(next.run(request).await)
}
