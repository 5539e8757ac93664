// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalized contact returned to the bridge caller.

use serde::{Deserialize, Serialize};

/// Phone number label understood by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneNumberLabel {
    Work,
    Mobile,
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub label: PhoneNumberLabel,
    pub phone_number: String,
}

/// One contact, produced from either a CRM contact or a CRM candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContact {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<String>,
    pub contact_url: Option<String>,
    pub avatar_url: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
}
