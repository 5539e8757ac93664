// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Offset pagination over CRM listing endpoints.
//!
//! The first page reports the collection total. We keep requesting pages of
//! `PAGE_SIZE` until we hold at least that many items. Short pages in the
//! middle of a result set are normal and simply continue the loop. There is
//! no page cap.

use crate::error::AppError;
use serde::Deserialize;
use std::future::Future;

/// Items requested per listing call.
pub const PAGE_SIZE: u32 = 100;

/// Position of one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub start: u64,
    pub size: u32,
}

impl PageCursor {
    pub fn first() -> Self {
        Self {
            start: 0,
            size: PAGE_SIZE,
        }
    }

    pub fn next(self) -> Self {
        Self {
            start: self.start + u64::from(self.size),
            size: self.size,
        }
    }
}

/// One listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Fetch every page and return all items in order.
///
/// Any failing fetch aborts the whole collection; nothing partial is returned.
pub async fn collect_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(PageCursor) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    let mut cursor = PageCursor::first();
    let first = fetch_page(cursor).await?;
    let total = first.total;
    let mut items = first.items;

    while (items.len() as u64) < total {
        cursor = cursor.next();
        let page = fetch_page(cursor).await?;
        if page.items.is_empty() {
            tracing::warn!(
                start = cursor.start,
                collected = items.len(),
                total,
                "Empty page before reported total"
            );
        }
        items.extend(page.items);
    }

    tracing::debug!(collected = items.len(), total, "Pagination complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Serve `total` numbered items, `min(size, total - start)` per page.
    async fn run(total: u64) -> (Vec<u64>, Vec<PageCursor>) {
        let calls = RefCell::new(Vec::new());
        let items = collect_all(|cursor| {
            calls.borrow_mut().push(cursor);
            async move {
                let start = cursor.start;
                let end = (start + u64::from(cursor.size)).min(total);
                Ok(Page {
                    total,
                    items: (start..end.max(start)).collect(),
                })
            }
        })
        .await
        .unwrap();
        (items, calls.into_inner())
    }

    #[tokio::test]
    async fn test_page_counts() {
        for (total, expected_calls) in [(0, 1), (1, 1), (99, 1), (100, 1), (101, 2), (250, 3), (1000, 10), (2501, 26)] {
            let (items, calls) = run(total).await;
            assert_eq!(items.len() as u64, total, "total {}", total);
            assert_eq!(calls.len(), expected_calls, "total {}", total);
        }
    }

    #[tokio::test]
    async fn test_cursor_advances_by_page_size() {
        let (items, calls) = run(350).await;
        let starts: Vec<u64> = calls.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 100, 200, 300]);
        assert!(calls.iter().all(|c| c.size == PAGE_SIZE));
        assert_eq!(items, (0..350).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_no_cap_beyond_ten_pages() {
        let (items, calls) = run(5_000).await;
        assert_eq!(items.len(), 5_000);
        assert_eq!(calls.len(), 50);
    }

    #[tokio::test]
    async fn test_short_pages_continue_until_total() {
        // Sparse upstream: every page returns only 40 items.
        let calls = RefCell::new(0);
        let items = collect_all(|cursor| {
            *calls.borrow_mut() += 1;
            async move {
                Ok(Page {
                    total: 100,
                    items: vec![cursor.start; 40],
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.into_inner(), 3);
        assert_eq!(items.len(), 120);
    }

    #[tokio::test]
    async fn test_total_comes_from_first_page_only() {
        let items = collect_all(|cursor| async move {
            let total = if cursor.start == 0 { 150 } else { 10_000 };
            Ok(Page {
                total,
                items: vec![(); 100],
            })
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 200);
    }

    #[tokio::test]
    async fn test_error_aborts_collection() {
        let result: Result<Vec<u64>, AppError> = collect_all(|cursor| async move {
            if cursor.start == 200 {
                return Err(AppError::Upstream("HTTP 500".to_string()));
            }
            Ok(Page {
                total: 500,
                items: vec![cursor.start; 100],
            })
        })
        .await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[test]
    fn test_cursor_passes_u32_range() {
        let cursor = PageCursor {
            start: u64::from(u32::MAX) - 50,
            size: PAGE_SIZE,
        };
        assert_eq!(cursor.next().start, u64::from(u32::MAX) + 50);
    }

    #[test]
    fn test_page_deserializes_without_items() {
        let page: Page<serde_json::Value> = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }
}
