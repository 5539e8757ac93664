// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRM REST API client.
//!
//! Handles:
//! - Paginated contact and candidate listings
//! - Per-record enrichment (detail, public URL, candidate photo)
//! - Call comments written back to a record
//!
//! Every call takes the headers produced by the token refresher; this
//! client never looks at credentials itself.

use crate::error::AppError;
use crate::models::AuthHeaders;
use crate::services::paginator::{Page, PageCursor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;

const TENANT_KEY_HEADER: &str = "x-api-key";
const ID_TOKEN_HEADER: &str = "id-token";

/// Comment category for telephone activity.
pub const CALL_COMMENT_CATEGORY: i32 = 2;
/// Comment action for telephone activity.
pub const CALL_COMMENT_ACTION: &str = "CALL";

/// The two record collections we pull contacts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Contact,
    Candidate,
}

impl EntityKind {
    pub fn path(self) -> &'static str {
        match self {
            EntityKind::Contact => "contact",
            EntityKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Body of a call comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub category_id: i32,
    pub action: String,
    pub content: String,
}

impl CommentRequest {
    pub fn call(content: String) -> Self {
        Self {
            category_id: CALL_COMMENT_CATEGORY,
            action: CALL_COMMENT_ACTION.to_string(),
            content,
        }
    }
}

/// Operations the contact bridge needs from the CRM.
pub trait CrmApi: Send + Sync {
    fn list(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        cursor: PageCursor,
    ) -> impl Future<Output = Result<Page<Value>, AppError>> + Send;

    fn get_detail(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
    ) -> impl Future<Output = Result<Value, AppError>> + Send;

    /// Public profile URL, `None` when the record has none.
    fn get_public_url(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
    ) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Candidate photo URL, `None` when no photo is on file.
    fn get_photo(
        &self,
        headers: &AuthHeaders,
        id: &str,
    ) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    fn post_comment(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
        comment: &CommentRequest,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Deserialize)]
struct ListingResponse {
    result: Page<Value>,
}

#[derive(Deserialize)]
struct PublicUrlResponse {
    #[serde(default, alias = "public_url")]
    url: Option<String>,
}

#[derive(Deserialize)]
struct PhotoResponse {
    #[serde(default)]
    url: Option<String>,
}

/// reqwest-backed CRM client.
#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl CrmClient {
    /// `base_url` must end with a slash.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn record_url(&self, kind: EntityKind, id: &str, suffix: &str) -> String {
        format!(
            "{}{}/{}{}",
            self.base_url,
            kind.path(),
            urlencoding::encode(id),
            suffix
        )
    }

    fn get(&self, url: &str, headers: &AuthHeaders) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header(TENANT_KEY_HEADER, &headers.tenant_key)
            .header(ID_TOKEN_HEADER, &headers.access_token)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &AuthHeaders,
    ) -> Result<T, AppError> {
        let response = self
            .get(url, headers)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response_json(response).await
    }

    /// GET that maps 404 to `None`.
    async fn get_optional_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &AuthHeaders,
    ) -> Result<Option<T>, AppError> {
        let response = self
            .get(url, headers)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        check_response_json(response).await.map(Some)
    }
}

impl CrmApi for CrmClient {
    async fn list(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        cursor: PageCursor,
    ) -> Result<Page<Value>, AppError> {
        let url = format!("{}{}/search", self.base_url, kind.path());

        let response = self
            .get(&url, headers)
            .query(&[
                ("start", cursor.start.to_string()),
                ("limit", cursor.size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let listing: ListingResponse = check_response_json(response).await?;
        Ok(listing.result)
    }

    async fn get_detail(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
    ) -> Result<Value, AppError> {
        self.get_json(&self.record_url(kind, id, ""), headers).await
    }

    async fn get_public_url(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
    ) -> Result<Option<String>, AppError> {
        let response: Option<PublicUrlResponse> = self
            .get_optional_json(&self.record_url(kind, id, "/publicurl"), headers)
            .await?;
        Ok(response.and_then(|r| r.url).filter(|u| !u.is_empty()))
    }

    async fn get_photo(&self, headers: &AuthHeaders, id: &str) -> Result<Option<String>, AppError> {
        let response: Option<PhotoResponse> = self
            .get_optional_json(
                &self.record_url(EntityKind::Candidate, id, "/photo"),
                headers,
            )
            .await?;
        Ok(response.and_then(|r| r.url).filter(|u| !u.is_empty()))
    }

    async fn post_comment(
        &self,
        kind: EntityKind,
        headers: &AuthHeaders,
        id: &str,
        comment: &CommentRequest,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.record_url(kind, id, "/comment"))
            .header(TENANT_KEY_HEADER, &headers.tenant_key)
            .header(ID_TOKEN_HEADER, &headers.access_token)
            .json(comment)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        check_response(response).await
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(status_error(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
}

async fn status_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.as_u16() == 429 {
        tracing::warn!("CRM rate limit hit (429)");
    }

    // Unauthorized - identity token rejected despite being fresh locally
    if status.as_u16() == 401 {
        return AppError::Upstream(AppError::CRM_TOKEN_ERROR.to_string());
    }

    AppError::Upstream(format!("HTTP {}: {}", status, body))
}
