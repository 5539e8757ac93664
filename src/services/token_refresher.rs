// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity token lifecycle.
//!
//! Every outbound CRM call asks for headers here first. A cached token is
//! reused while fresh; otherwise exactly one refresh exchange is attempted
//! and its failure goes straight back to the caller.

use crate::error::AppError;
use crate::models::{AuthHeaders, CachedToken, Credential};
use crate::services::identity::{TokenExchange, TokenResponse};
use crate::services::token_store::TokenStore;
use crate::time_utils::{Clock, SystemClock};

pub struct TokenRefresher<E, C = SystemClock> {
    exchange: E,
    store: TokenStore,
    clock: C,
    /// Client ID used for authorization-code exchanges and for credentials
    /// that carry none.
    client_id: String,
}

impl<E: TokenExchange, C: Clock> TokenRefresher<E, C> {
    pub fn new(exchange: E, store: TokenStore, clock: C, client_id: String) -> Self {
        Self {
            exchange,
            store,
            clock,
            client_id,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Return headers built from a fresh identity token for `credential`.
    pub async fn ensure_fresh_token(&self, credential: &Credential) -> Result<AuthHeaders, AppError> {
        let now = self.clock.now_millis();

        if let Some(cached) = self.store.get(credential.as_str()) {
            if cached.is_fresh(now) {
                tracing::info!(credential = %credential, "Using cached identity token");
                return Ok(headers(credential, cached.token));
            }
        }

        tracing::info!(credential = %credential, "Identity token missing or expired, refreshing");

        let client_id = if credential.client_id.is_empty() {
            self.client_id.as_str()
        } else {
            credential.client_id.as_str()
        };

        let response = self
            .exchange
            .refresh(client_id, &credential.refresh_token)
            .await?;
        let token = self.cache(credential, &response)?;

        tracing::info!(credential = %credential, "Identity token refreshed and cached");
        Ok(headers(credential, token))
    }

    /// Exchange an authorization code and build the caller's credential.
    ///
    /// The new credential is seeded in the store so the first request made
    /// with it skips the refresh.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<Credential, AppError> {
        let response = self.exchange.exchange_code(code).await?;
        let identity_token = response.identity_token()?;

        let refresh_token = response
            .refresh_token
            .as_deref()
            .ok_or_else(|| AppError::AuthExchange("Response carried no refresh token".to_string()))?;

        let credential = Credential::from_parts(
            response.access_token.as_deref().unwrap_or(identity_token),
            &self.client_id,
            refresh_token,
            identity_token,
        );

        self.cache(&credential, &response)?;
        tracing::info!(credential = %credential, "Authorization code exchanged");
        Ok(credential)
    }

    fn cache(&self, credential: &Credential, response: &TokenResponse) -> Result<String, AppError> {
        let token = response.identity_token()?.to_string();
        self.store.put(
            credential.as_str(),
            CachedToken {
                token: token.clone(),
                expires_in_seconds: response.expires_in,
                issued_at_millis: self.clock.now_millis(),
            },
        );
        Ok(token)
    }
}

fn headers(credential: &Credential, token: String) -> AuthHeaders {
    AuthHeaders {
        tenant_key: credential.access_token_id.clone(),
        access_token: token,
    }
}
