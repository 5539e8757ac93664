// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact bridge: the single entry point behind the HTTP adapter.
//!
//! Handles:
//! - Pulling candidates and contacts, enriching each record and mapping it
//!   to a normalized contact
//! - Writing a call comment against the first record matching a call
//! - Completing the OAuth authorization-code exchange
//!
//! Every CRM call is preceded by its own token check, so a token that
//! expires in the middle of a long pull is refreshed for the next call.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{CallEvent, Credential, NormalizedContact};
use crate::services::crm::{CommentRequest, CrmApi, CrmClient, EntityKind};
use crate::services::identity::{IdentityClient, TokenExchange};
use crate::services::mapper;
use crate::services::paginator::collect_all;
use crate::services::token_refresher::TokenRefresher;
use crate::services::token_store::TokenStore;
use crate::time_utils::{Clock, SystemClock};
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::Value;

/// Production wiring.
pub type Bridge = ContactBridge<CrmClient, IdentityClient, SystemClock>;

/// Result of logging a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallLogOutcome {
    Logged { entity: EntityKind, id: String },
    NoMatch,
}

pub struct ContactBridge<A, E, C = SystemClock> {
    api: A,
    tokens: TokenRefresher<E, C>,
    enrichment_concurrency: usize,
}

impl Bridge {
    /// Build the production bridge around a shared token store.
    pub fn from_config(config: &Config, store: TokenStore) -> Self {
        let identity = IdentityClient::new(config.token_url.clone(), config.client_id.clone());
        ContactBridge::new(
            CrmClient::new(config.api_url.clone()),
            TokenRefresher::new(identity, store, SystemClock, config.client_id.clone()),
            config.enrichment_concurrency,
        )
    }
}

impl<A: CrmApi, E: TokenExchange, C: Clock> ContactBridge<A, E, C> {
    pub fn new(api: A, tokens: TokenRefresher<E, C>, enrichment_concurrency: usize) -> Self {
        Self {
            api,
            tokens,
            enrichment_concurrency: enrichment_concurrency.max(1),
        }
    }

    pub fn tokens(&self) -> &TokenRefresher<E, C> {
        &self.tokens
    }

    /// Fetch every candidate and contact as normalized contacts.
    ///
    /// Candidates come first. Any failed call fails the whole request.
    pub async fn fetch_all(&self, credential: &Credential) -> Result<Vec<NormalizedContact>, AppError> {
        let mut contacts = self.fetch_kind(credential, EntityKind::Candidate).await?;
        let candidate_count = contacts.len();
        contacts.extend(self.fetch_kind(credential, EntityKind::Contact).await?);

        tracing::info!(
            credential = %credential,
            candidates = candidate_count,
            contacts = contacts.len() - candidate_count,
            "Fetched contacts"
        );
        Ok(contacts)
    }

    /// Write a comment for `event` against the first matching contact, else
    /// the first matching candidate. Without a match nothing is written.
    pub async fn log_call(
        &self,
        credential: &Credential,
        event: &CallEvent,
    ) -> Result<CallLogOutcome, AppError> {
        let number = event.remote_number();

        for kind in [EntityKind::Contact, EntityKind::Candidate] {
            let records = self.list_kind(credential, kind).await?;
            let Some(id) = records
                .iter()
                .filter(|record| mapper::record_has_phone(record, number))
                .find_map(mapper::record_id)
            else {
                continue;
            };

            let headers = self.tokens.ensure_fresh_token(credential).await?;
            self.api
                .post_comment(kind, &headers, &id, &CommentRequest::call(event.description()))
                .await?;

            tracing::info!(credential = %credential, entity = %kind, id = %id, "Call logged");
            return Ok(CallLogOutcome::Logged { entity: kind, id });
        }

        tracing::info!(credential = %credential, "No record matches call, nothing logged");
        Ok(CallLogOutcome::NoMatch)
    }

    /// Complete the OAuth flow and return the caller's new credential.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<Credential, AppError> {
        self.tokens.exchange_authorization_code(code).await
    }

    /// All raw listing records of one kind.
    async fn list_kind(&self, credential: &Credential, kind: EntityKind) -> Result<Vec<Value>, AppError> {
        collect_all(|cursor| async move {
            let headers = self.tokens.ensure_fresh_token(credential).await?;
            self.api.list(kind, &headers, cursor).await
        })
        .await
    }

    async fn fetch_kind(
        &self,
        credential: &Credential,
        kind: EntityKind,
    ) -> Result<Vec<NormalizedContact>, AppError> {
        let records = self.list_kind(credential, kind).await?;
        tracing::debug!(entity = %kind, count = records.len(), "Enriching records");

        stream::iter(records)
            .map(|record| self.enrich(credential, kind, record))
            .buffered(self.enrichment_concurrency)
            .try_collect()
            .await
    }

    /// Detail, public URL and (candidates only) photo for one listing record.
    async fn enrich(
        &self,
        credential: &Credential,
        kind: EntityKind,
        record: Value,
    ) -> Result<NormalizedContact, AppError> {
        let id = mapper::record_id(&record)
            .ok_or_else(|| AppError::Upstream(format!("{} listing item without id", kind)))?;

        let headers = self.tokens.ensure_fresh_token(credential).await?;
        let detail = self.api.get_detail(kind, &headers, &id).await?;

        let headers = self.tokens.ensure_fresh_token(credential).await?;
        let contact_url = self.api.get_public_url(kind, &headers, &id).await?;

        let avatar_url = match kind {
            EntityKind::Candidate => {
                let headers = self.tokens.ensure_fresh_token(credential).await?;
                self.api.get_photo(&headers, &id).await?
            }
            EntityKind::Contact => None,
        };

        let mut contact = mapper::map_record(kind, &mapper::merge_records(record, detail));
        contact.contact_url = contact_url;
        contact.avatar_url = avatar_url;
        Ok(contact)
    }
}
