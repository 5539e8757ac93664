// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod call_event;
pub mod contact;
pub mod credential;
pub mod token;

pub use call_event::{CallDirection, CallEvent};
pub use contact::{NormalizedContact, PhoneNumber, PhoneNumberLabel};
pub use credential::Credential;
pub use token::{AuthHeaders, CachedToken};
