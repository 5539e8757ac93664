// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Vincere bridge: recruitment CRM contacts for the telephony bridge
//!
//! This crate exposes CRM contacts and candidates as one normalized contact
//! list and writes call comments back, managing the OAuth identity token
//! lifecycle for every caller credential.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::Bridge;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub bridge: Bridge,
}
