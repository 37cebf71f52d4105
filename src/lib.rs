//! ONE PIECE CARD GAME card list lookups and deck-memo post drafting.
//!
//! Searches the official card list by card number or by name + color,
//! extracts card names, acquisition info and artwork variants, and drafts a
//! short post with a character-limit check.
//!
//! # Quick start
//!
//! ```no_run
//! use opcg_memo::{compose, OpcgMemo};
//!
//! let memo = OpcgMemo::builder().build().unwrap();
//!
//! // Every printing of one card number
//! let card = memo.variants().lookup("OP06-118").unwrap();
//!
//! // Draft a post and check its length
//! let text = compose::compose("", &card.card_no, &card.card_name, &card.packs, "", "#ワンピースカード");
//! let check = compose::check_length(&text, compose::LengthPolicy::NewlineInclusive);
//! println!("{text}\n{check}");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod archive;
pub mod cache;
pub mod card_no;
pub mod catalog;
pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod queries;
pub mod session;

#[cfg(feature = "async")]
pub use async_client::AsyncOpcgMemo;
pub use cache::MemoCache;
pub use card_no::CardNo;
pub use catalog::Catalog;
pub use client::{CatalogClient, MarkupSource, SearchQuery};
pub use compose::{LengthCheck, LengthPolicy, LengthVerdict, PostDraft};
pub use error::{CatalogError, Result};
pub use extract::{extract_candidates, extract_variants, Extractor};
pub use models::{CandidateSummary, CardLookup, CardVariant, Color};
pub use session::{SearchMode, Session, SessionState};

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// OpcgMemoBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`OpcgMemo`] instance.
///
/// Use [`OpcgMemo::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](OpcgMemoBuilder::build).
pub struct OpcgMemoBuilder {
    base_url: String,
    timeout: Duration,
    request_delay: Duration,
    variant_ttl: Duration,
    candidate_ttl: Duration,
    source: Option<Box<dyn MarkupSource>>,
}

impl Default for OpcgMemoBuilder {
    fn default() -> Self {
        Self {
            base_url: config::BASE_URL.to_string(),
            timeout: config::REQUEST_TIMEOUT,
            request_delay: config::REQUEST_DELAY,
            variant_ttl: config::VARIANT_TTL,
            candidate_ttl: config::CANDIDATE_TTL,
            source: None,
        }
    }
}

impl OpcgMemoBuilder {
    /// Set the site origin. Image paths are resolved against it and the
    /// search endpoint is `<base_url>/cardlist/`.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout. Defaults to 25 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause taken before each search. Defaults to 700 ms.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// How long exact-number lookups are memoized. Defaults to 24 hours.
    pub fn variant_ttl(mut self, ttl: Duration) -> Self {
        self.variant_ttl = ttl;
        self
    }

    /// How long candidate lists are memoized. Defaults to 1 hour.
    pub fn candidate_ttl(mut self, ttl: Duration) -> Self {
        self.candidate_ttl = ttl;
        self
    }

    /// Use a custom markup source instead of the live site.
    ///
    /// `timeout` and `request_delay` are ignored when a source is given.
    pub fn source(mut self, source: Box<dyn MarkupSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the instance. No request is made until the first query.
    pub fn build(self) -> Result<OpcgMemo> {
        let source = match self.source {
            Some(source) => source,
            None => Box::new(CatalogClient::new(
                &config::cardlist_url(&self.base_url),
                self.timeout,
                self.request_delay,
            )?),
        };
        let extractor = Extractor::new(&self.base_url)?;
        let catalog = Catalog::new(source, extractor, self.variant_ttl, self.candidate_ttl);
        Ok(OpcgMemo { catalog })
    }
}

// ---------------------------------------------------------------------------
// OpcgMemo
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Wraps a [`Catalog`] (which owns the markup source and memo tables) and
/// exposes query interfaces as lightweight borrowing wrappers.
pub struct OpcgMemo {
    catalog: Catalog,
}

impl OpcgMemo {
    pub fn builder() -> OpcgMemoBuilder {
        OpcgMemoBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access exact card-number lookups.
    pub fn variants(&self) -> queries::VariantQuery<'_> {
        queries::VariantQuery::new(&self.catalog)
    }

    /// Access name + color candidate searches.
    pub fn candidates(&self) -> queries::CandidateQuery<'_> {
        queries::CandidateQuery::new(&self.catalog)
    }

    // -- Utility -----------------------------------------------------------

    /// Forget every memoized search result.
    pub fn clear_cache(&self) {
        self.catalog.clear_caches();
    }

    /// Return a reference to the underlying [`Catalog`].
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl fmt::Display for OpcgMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpcgMemo(base_url={}, memoized_lookups={}, memoized_candidate_lists={})",
            self.catalog.extractor().base_url(),
            self.catalog.memoized_lookups(),
            self.catalog.memoized_candidate_lists()
        )
    }
}
