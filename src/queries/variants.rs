//! Exact card-number lookups.

use tracing::debug;

use crate::card_no::CardNo;
use crate::catalog::Catalog;
use crate::client::SearchQuery;
use crate::error::{CatalogError, Result};
use crate::models::{CardLookup, CardVariant};

/// Query interface for card-number searches.
pub struct VariantQuery<'a> {
    catalog: &'a Catalog,
}

impl<'a> VariantQuery<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    // -- Aggregate lookup --------------------------------------------------

    /// Look up a card by its full number (e.g. `OP06-118`).
    ///
    /// The number is validated before anything is fetched. Fails with
    /// [`CatalogError::NotFound`] when no detail block carries exactly this
    /// number. Results are memoized per number.
    pub fn lookup(&self, card_no: &str) -> Result<CardLookup> {
        let card_no = CardNo::parse(card_no)?;
        self.lookup_card_no(&card_no)
    }

    /// Look up a card from a prefix and the `NN-NNN` part (e.g. `"OP"`, `"05-067"`).
    pub fn lookup_parts(&self, prefix: &str, number: &str) -> Result<CardLookup> {
        let card_no = CardNo::from_parts(prefix, number)?;
        self.lookup_card_no(&card_no)
    }

    pub fn lookup_card_no(&self, card_no: &CardNo) -> Result<CardLookup> {
        if let Some(hit) = self.catalog.variant_cache.borrow_mut().get(card_no) {
            debug!(%card_no, "lookup served from memo");
            return Ok(hit);
        }

        let variants = self.fetch_variants(card_no)?;
        let lookup = CardLookup::from_variants(card_no.as_str(), variants)
            .ok_or_else(|| CatalogError::NotFound(format!("card {card_no}")))?;

        self.catalog
            .variant_cache
            .borrow_mut()
            .insert(card_no.clone(), lookup.clone());
        Ok(lookup)
    }

    // -- Raw variants ------------------------------------------------------

    /// All matching variants, image-less ones included. Not memoized.
    ///
    /// An empty list means the number was not found.
    pub fn variants(&self, card_no: &str) -> Result<Vec<CardVariant>> {
        let card_no = CardNo::parse(card_no)?;
        self.fetch_variants(&card_no)
    }

    fn fetch_variants(&self, card_no: &CardNo) -> Result<Vec<CardVariant>> {
        let markup = self.catalog.fetch(&SearchQuery::card_no(card_no))?;
        self.catalog
            .extractor()
            .variants(&markup, card_no.as_str())
    }
}
