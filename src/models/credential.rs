// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Composite caller credential.
//!
//! The bridge caller hands us one opaque string per request. It packs four
//! colon-delimited, positional fields:
//!
//! ```text
//! <access_token_id>:<client_id>:<refresh_token>:<id_token>
//! ```
//!
//! The string is decoded once at the HTTP edge. Everything past that point
//! works with [`Credential`] and never re-splits the raw value.

use std::fmt;

const DELIMITER: char = ':';

/// Number of trailing characters kept visible when a credential is logged.
const VISIBLE_SUFFIX_CHARS: usize = 10;

/// Decoded caller credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    raw: String,
    pub access_token_id: String,
    pub client_id: String,
    pub refresh_token: String,
    pub id_token: String,
}

impl Credential {
    /// Decode a raw credential string.
    ///
    /// Missing trailing fields decode to empty strings. Segments after the
    /// fourth are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(DELIMITER);
        let mut next = || parts.next().unwrap_or_default().to_string();

        let access_token_id = next();
        let client_id = next();
        let refresh_token = next();
        let id_token = next();

        Self {
            raw: raw.to_string(),
            access_token_id,
            client_id,
            refresh_token,
            id_token,
        }
    }

    /// Build a credential from its parts (used after the initial OAuth exchange).
    pub fn from_parts(
        access_token_id: &str,
        client_id: &str,
        refresh_token: &str,
        id_token: &str,
    ) -> Self {
        let raw = [access_token_id, client_id, refresh_token, id_token].join(&DELIMITER.to_string());
        Self::parse(&raw)
    }

    /// The raw encoded form. This is the token store key and the value
    /// handed back to the caller as its API key.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Log-safe rendering: only the last 10 characters survive.
    pub fn redacted(&self) -> String {
        let chars: Vec<char> = self.raw.chars().collect();
        let start = chars.len().saturating_sub(VISIBLE_SUFFIX_CHARS);
        let suffix: String = chars[start..].iter().collect();
        format!("******{}", suffix)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}
