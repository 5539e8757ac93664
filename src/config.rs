// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Missing required values are fatal at startup.

use std::env;

const DEFAULT_TOKEN_URL: &str = "https://id.vincere.io/oauth2/token";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client ID registered with the identity provider
    pub client_id: String,
    /// Base URL of the CRM REST API (with trailing slash)
    pub api_url: String,
    /// Identity provider token endpoint
    pub token_url: String,
    /// Server port
    pub port: u16,
    /// Maximum number of listing items enriched at once
    pub enrichment_concurrency: usize,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            api_url: "http://localhost:9999/api/v2/".to_string(),
            token_url: "http://localhost:9999/oauth2/token".to_string(),
            port: 8080,
            enrichment_concurrency: 1,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let enrichment_concurrency = match env::var("ENRICHMENT_CONCURRENCY") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ConfigError::Invalid("ENRICHMENT_CONCURRENCY", raw)),
            },
            Err(_) => 1,
        };

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            api_url: with_trailing_slash(required("API_URL")?),
            token_url: env::var("TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            enrichment_concurrency,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
