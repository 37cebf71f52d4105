//! Name + color candidate searches.

use tracing::debug;

use crate::catalog::Catalog;
use crate::client::SearchQuery;
use crate::error::{CatalogError, Result};
use crate::models::{CandidateSummary, Color};

/// Query interface for disambiguating a card by (partial) name and colors.
pub struct CandidateQuery<'a> {
    catalog: &'a Catalog,
}

impl<'a> CandidateQuery<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// One candidate per card number whose name contains `name`.
    ///
    /// An empty result is not an error. A blank `name` is rejected without a
    /// request. Results are memoized per (trimmed name, colors).
    pub fn search(&self, name: &str, colors: &[Color]) -> Result<Vec<CandidateSummary>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "card name must not be empty".into(),
            ));
        }

        let key = (name.to_string(), colors.to_vec());
        if let Some(hit) = self.catalog.candidate_cache.borrow_mut().get(&key) {
            debug!(name, "candidates served from memo");
            return Ok(hit);
        }

        let markup = self.catalog.fetch(&SearchQuery::name(name, colors))?;
        let candidates = self.catalog.extractor().candidates(&markup, name)?;
        debug!(name, found = candidates.len(), "candidate search");

        self.catalog
            .candidate_cache
            .borrow_mut()
            .insert(key, candidates.clone());
        Ok(candidates)
    }
}
