//! Shared test fixtures.
//!
//! Provides captured card list pages and a [`FixtureSource`] that serves them
//! by `freewords`, counting every fetch so tests can assert when the network
//! would (or would not) have been hit.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use opcg_memo::{CatalogError, MarkupSource, OpcgMemo, Result, SearchQuery};

/// Number search for `OP06-118`: regular, parallel and image-less printings
/// plus an unrelated `OP06-119` block.
pub const OP06_118_PAGE: &str = include_str!("../fixtures/cardlist_op06_118.html");

/// Name search for `ゾロ`: parallel duplicates, a non-matching name, broken
/// anchors and a `src`-only thumbnail.
pub const ZORO_PAGE: &str = include_str!("../fixtures/cardlist_name_zoro.html");

/// Result page with no hits.
pub const EMPTY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ja"><head><meta charset="UTF-8"></head>
<body><main><div class="resultCol"></div></main></body></html>"#;

pub const BASE: &str = "https://www.onepiece-cardgame.com";

/// Serves pages keyed by `freewords`; unknown queries get [`EMPTY_PAGE`].
#[derive(Clone, Default)]
pub struct FixtureSource {
    pages: HashMap<String, String>,
    pub fetches: Arc<AtomicUsize>,
    pub queries: Arc<Mutex<Vec<SearchQuery>>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, freewords: &str, markup: &str) -> Self {
        self.pages.insert(freewords.to_string(), markup.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl MarkupSource for FixtureSource {
    fn fetch(&self, query: &SearchQuery) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        Ok(self
            .pages
            .get(&query.freewords)
            .cloned()
            .unwrap_or_else(|| EMPTY_PAGE.to_string()))
    }
}

/// A source whose every fetch fails like a refused connection.
pub struct FailingSource;

impl MarkupSource for FailingSource {
    fn fetch(&self, _query: &SearchQuery) -> Result<String> {
        Err(CatalogError::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}

/// The default fixture set: `OP06-118` and `ゾロ`.
pub fn fixture_source() -> FixtureSource {
    FixtureSource::new()
        .page("OP06-118", OP06_118_PAGE)
        .page("ゾロ", ZORO_PAGE)
}

/// Build an [`OpcgMemo`] over `source`.
///
/// Returns the source handle too; it shares the fetch counter with the copy
/// owned by the memo.
pub fn setup_memo(source: FixtureSource) -> (OpcgMemo, FixtureSource) {
    let handle = source.clone();
    let memo = OpcgMemo::builder()
        .base_url(BASE)
        .source(Box::new(source))
        .build()
        .unwrap();
    (memo, handle)
}

/// Same as [`setup_memo`] but with memoization effectively disabled.
pub fn setup_memo_without_cache(source: FixtureSource) -> (OpcgMemo, FixtureSource) {
    let handle = source.clone();
    let memo = OpcgMemo::builder()
        .base_url(BASE)
        .variant_ttl(Duration::ZERO)
        .candidate_ttl(Duration::ZERO)
        .source(Box::new(source))
        .build()
        .unwrap();
    (memo, handle)
}
