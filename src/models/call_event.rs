// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inbound call event posted by the telephony side after a call ends.

use crate::time_utils::{format_duration_millis, format_epoch_millis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallDirection {
    In,
    Out,
}

/// A finished call. `start` and `end` are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEvent {
    pub direction: CallDirection,
    pub from: String,
    pub to: String,
    pub start: i64,
    pub end: i64,
}

impl CallEvent {
    /// Number of the party on the CRM side of the call.
    pub fn remote_number(&self) -> &str {
        match self.direction {
            CallDirection::In => &self.from,
            CallDirection::Out => &self.to,
        }
    }

    /// Free-text comment written back to the CRM.
    pub fn description(&self) -> String {
        let kind = match self.direction {
            CallDirection::In => "Incoming",
            CallDirection::Out => "Outgoing",
        };
        let duration = format_duration_millis(self.end.saturating_sub(self.start));
        match format_epoch_millis(self.start) {
            Some(started) => format!(
                "{} call from {} to {} ({}) at {}",
                kind, self.from, self.to, duration, started
            ),
            None => format!("{} call from {} to {} ({})", kind, self.from, self.to, duration),
        }
    }
}
