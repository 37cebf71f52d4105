//! Markup source, extractor and memo tables behind one handle.
//!
//! Query wrappers borrow a [`Catalog`] the same way they would borrow a
//! database connection.

use std::cell::RefCell;
use std::time::Duration;

use tracing::debug;

use crate::cache::MemoCache;
use crate::card_no::CardNo;
use crate::client::{MarkupSource, SearchQuery};
use crate::error::Result;
use crate::extract::Extractor;
use crate::models::{CandidateSummary, CardLookup, Color};

/// Memo key of a candidate search: trimmed name and the color filter.
pub type CandidateKey = (String, Vec<Color>);

pub struct Catalog {
    source: Box<dyn MarkupSource>,
    extractor: Extractor,
    /// Exact-number lookups.
    pub(crate) variant_cache: RefCell<MemoCache<CardNo, CardLookup>>,
    /// Name + color candidate lists.
    pub(crate) candidate_cache: RefCell<MemoCache<CandidateKey, Vec<CandidateSummary>>>,
}

impl Catalog {
    pub fn new(
        source: Box<dyn MarkupSource>,
        extractor: Extractor,
        variant_ttl: Duration,
        candidate_ttl: Duration,
    ) -> Self {
        Self {
            source,
            extractor,
            variant_cache: RefCell::new(MemoCache::new(variant_ttl)),
            candidate_cache: RefCell::new(MemoCache::new(candidate_ttl)),
        }
    }

    /// Fetch raw markup for `query` from the source. Never memoized.
    pub fn fetch(&self, query: &SearchQuery) -> Result<String> {
        debug!(freewords = %query.freewords, "fetching markup");
        self.source.fetch(query)
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Number of memoized card-number lookups, expired ones included.
    pub fn memoized_lookups(&self) -> usize {
        self.variant_cache.borrow().len()
    }

    /// Number of memoized candidate lists, expired ones included.
    pub fn memoized_candidate_lists(&self) -> usize {
        self.candidate_cache.borrow().len()
    }

    /// Forget every memoized result.
    pub fn clear_caches(&self) {
        self.variant_cache.borrow_mut().clear();
        self.candidate_cache.borrow_mut().clear();
    }
}
