// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached identity token and the headers derived from it.

/// Token issued by the identity provider, stamped with the time we received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    pub expires_in_seconds: i64,
    pub issued_at_millis: i64,
}

impl CachedToken {
    /// A token is fresh while `now < issued_at + expires_in`.
    pub fn is_fresh(&self, now_millis: i64) -> bool {
        let expires_at = self
            .issued_at_millis
            .saturating_add(self.expires_in_seconds.saturating_mul(1000));
        now_millis < expires_at
    }
}

/// Headers attached to every authenticated CRM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Tenant key, sent as `x-api-key`.
    pub tenant_key: String,
    /// Identity token, sent as `id-token`.
    pub access_token: String,
}
