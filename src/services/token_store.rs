// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory identity token cache.
//!
//! Keyed by the raw credential string, so distinct credentials never share
//! an entry. Entries are superseded on every successful exchange and never
//! evicted; the key space is the set of active credentials.
//!
//! Concurrent refreshes of the same credential are not deduplicated. Both
//! writes land and the last one wins.

use crate::models::CachedToken;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared token store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<DashMap<String, CachedToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<CachedToken> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Insert or overwrite the token for `key`.
    pub fn put(&self, key: &str, token: CachedToken) {
        self.inner.insert(key.to_string(), token);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> CachedToken {
        CachedToken {
            token: value.to_string(),
            expires_in_seconds: 3600,
            issued_at_millis: 0,
        }
    }

    #[test]
    fn test_put_overwrites() {
        let store = TokenStore::new();
        assert!(store.get("a").is_none());

        store.put("a", token("first"));
        store.put("a", token("second"));

        assert_eq!(store.get("a").unwrap().token, "second");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = TokenStore::new();
        let shared = store.clone();
        shared.put("a", token("x"));
        assert_eq!(store.get("a").unwrap().token, "x");
    }

    #[tokio::test]
    async fn test_concurrent_writers_on_distinct_keys() {
        let store = TokenStore::new();
        let mut handles = vec![];

        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let key = format!("credential-{}", i);
                for round in 0..50 {
                    store.put(&key, token(&format!("{}-{}", i, round)));
                }
            }));
        }

        for handle in handles {
            handle.await.expect("Task join failed");
        }

        assert_eq!(store.len(), 32);
        for i in 0..32 {
            let key = format!("credential-{}", i);
            assert_eq!(store.get(&key).unwrap().token, format!("{}-49", i));
        }
    }
}
