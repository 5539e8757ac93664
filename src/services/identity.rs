// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client for OAuth token exchanges.
//!
//! Handles:
//! - Authorization code exchange (initial connect)
//! - Refresh token exchange (expired identity token)

use crate::error::AppError;
use serde::Deserialize;
use std::future::Future;

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

impl TokenResponse {
    /// Token presented to the CRM: the ID token when issued, else the access token.
    pub fn identity_token(&self) -> Result<&str, AppError> {
        self.id_token
            .as_deref()
            .or(self.access_token.as_deref())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::AuthExchange("Response carried no token".to_string()))
    }
}

/// Token exchanges against the identity provider.
pub trait TokenExchange: Send + Sync {
    /// `grant_type=authorization_code`
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenResponse, AppError>> + Send;

    /// `grant_type=refresh_token`
    fn refresh(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> impl Future<Output = Result<TokenResponse, AppError>> + Send;
}

/// reqwest-backed identity provider client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
}

impl IdentityClient {
    pub fn new(token_url: String, client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url,
            client_id,
        }
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::AuthExchange(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Token exchange rejected");
            return Err(AppError::AuthExchange(format!(
                "Token endpoint returned status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AuthExchange(format!("Failed to parse token response: {}", e)))
    }
}

impl TokenExchange for IdentityClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        self.post_form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
        ])
        .await
    }

    async fn refresh(&self, client_id: &str, refresh_token: &str) -> Result<TokenResponse, AppError> {
        self.post_form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
        ])
        .await
    }
}
