// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod bridge;
pub mod crm;
pub mod identity;
pub mod mapper;
pub mod paginator;
pub mod token_refresher;
pub mod token_store;

pub use bridge::{Bridge, CallLogOutcome, ContactBridge};
pub use crm::{CrmApi, CrmClient, EntityKind};
pub use identity::{IdentityClient, TokenExchange};
pub use token_refresher::TokenRefresher;
pub use token_store::TokenStore;
