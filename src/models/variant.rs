use serde::{Deserialize, Serialize};

use crate::config;
use crate::extract::unique_keep_order;

// ---------------------------------------------------------------------------
// CardVariant — One artwork/printing of a card number
// ---------------------------------------------------------------------------

/// One detail block from the card list that matched the queried number.
///
/// Regular and parallel arts of the same card number each produce their own
/// variant (`OP05-067`, `OP05-067_p1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVariant {
    /// The `id` attribute of the detail block. Only compared for equality.
    pub variant_id: String,
    pub card_no: String,
    pub card_name: String,
    /// Acquisition info, deduplicated in first-seen order.
    pub packs: Vec<String>,
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// CardLookup — Aggregate result of an exact card-number search
// ---------------------------------------------------------------------------

/// Everything needed to draft a post about one card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLookup {
    pub card_no: String,
    pub card_name: String,
    /// Union of every variant's packs, first-seen order, no duplicates.
    pub packs: Vec<String>,
    /// Variants that carry an image URL.
    pub variants: Vec<CardVariant>,
}

impl CardLookup {
    /// Fold extracted variants into a lookup result.
    ///
    /// Returns `None` when `variants` is empty. Variants without an image
    /// still contribute their packs but are dropped from `variants`.
    pub fn from_variants(card_no: &str, variants: Vec<CardVariant>) -> Option<Self> {
        if variants.is_empty() {
            return None;
        }

        let card_name = variants
            .iter()
            .map(|v| v.card_name.as_str())
            .find(|name| !name.is_empty())
            .unwrap_or(config::UNKNOWN_CARD_NAME)
            .to_string();

        let packs = unique_keep_order(variants.iter().flat_map(|v| v.packs.iter().cloned()));

        let variants = variants
            .into_iter()
            .filter(|v| v.image_url.is_some())
            .collect();

        Some(Self {
            card_no: card_no.to_string(),
            card_name,
            packs,
            variants,
        })
    }

    /// Image URLs of every variant, in page order.
    pub fn image_urls(&self) -> Vec<&str> {
        self.variants
            .iter()
            .filter_map(|v| v.image_url.as_deref())
            .collect()
    }
}
