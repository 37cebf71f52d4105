//! HTML extraction for card list search results.
//!
//! The card list renders one `dl.modalCol` detail block per artwork. Each
//! block is expected to look like:
//!
//! ```text
//! dl.modalCol#OP05-067[_p1]
//!   dt
//!     .infoCol span        card number (first span), rarity, type...
//!     .cardName            display name
//!   dd
//!     .frontCol img[data-src]     site-relative image path
//!     .backCol .getInfo           zero or more sections, h3 heading + text
//! ```
//!
//! Thumbnails live in `div.resultCol a.modalOpen[data-src="#<block id>"]`.
//! Everything that depends on this markup is confined to this module.

use std::collections::{HashMap, HashSet};

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::config;
use crate::error::{CatalogError, Result};
use crate::models::{CandidateSummary, CardVariant};

/// Heading text that marks an acquisition-info section.
const ACQUISITION_HEADING: &str = "入手情報";

const MISSING_VARIANT_ID: &str = "(no-id)";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CatalogError::Selector(format!("{css}: {e:?}")))
}

struct Selectors {
    modal: Selector,
    info_span: Selector,
    card_name: Selector,
    get_info: Selector,
    heading: Selector,
    front_image: Selector,
    result_anchor: Selector,
    image: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            modal: selector("dl.modalCol")?,
            info_span: selector("dt .infoCol span")?,
            card_name: selector("dt .cardName")?,
            get_info: selector("dd .backCol .getInfo")?,
            heading: selector("h3")?,
            front_image: selector("dd .frontCol img")?,
            result_anchor: selector("div.resultCol a.modalOpen")?,
            image: selector("img")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Parses card list markup into variants and candidates.
///
/// Holds the compiled selectors and the origin used to absolutize image
/// paths.
pub struct Extractor {
    base_url: String,
    sel: Selectors,
}

impl Extractor {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sel: Selectors::new()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract every detail block whose card number equals `target_card_no`.
    ///
    /// Matching is exact: `OP06-11` never matches a block for `OP06-118`.
    /// Variants without an image are still returned.
    pub fn variants(&self, markup: &str, target_card_no: &str) -> Result<Vec<CardVariant>> {
        let document = Html::parse_document(markup);
        let mut variants = Vec::new();

        for block in document.select(&self.sel.modal) {
            let Some(card_no) = self.card_no_of(block) else {
                warn!(id = block.value().id(), "detail block without a card number");
                continue;
            };
            if card_no != target_card_no {
                continue;
            }

            let variant_id = block
                .value()
                .attr("id")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .unwrap_or(MISSING_VARIANT_ID)
                .to_string();

            let card_name = self.card_name_of(block).unwrap_or_default();
            let packs = self.packs_of(block);

            let image_url = block
                .select(&self.sel.front_image)
                .next()
                .and_then(|img| img.value().attr("data-src"))
                .map(|src| absolute_url(&self.base_url, src));

            debug!(%variant_id, packs = packs.len(), has_image = image_url.is_some(), "variant");

            variants.push(CardVariant {
                variant_id,
                card_no,
                card_name,
                packs,
                image_url,
            });
        }

        Ok(variants)
    }

    /// Extract one candidate per card number from a name (+ color) search.
    ///
    /// Thumbnails are resolved to their detail block through the anchor's
    /// `data-src="#<id>"`. The block's name must contain the trimmed `name`.
    pub fn candidates(&self, markup: &str, name: &str) -> Result<Vec<CandidateSummary>> {
        let document = Html::parse_document(markup);
        let query = name.trim();

        let mut blocks: HashMap<&str, ElementRef<'_>> = HashMap::new();
        for block in document.select(&self.sel.modal) {
            if let Some(id) = block.value().attr("id") {
                blocks.entry(id).or_insert(block);
            }
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for anchor in document.select(&self.sel.result_anchor) {
            let Some(block_id) = anchor
                .value()
                .attr("data-src")
                .and_then(|t| t.strip_prefix('#'))
            else {
                continue;
            };
            let Some(block) = blocks.get(block_id).copied() else {
                debug!(block_id, "thumbnail without a detail block");
                continue;
            };

            let (Some(card_no), Some(card_name)) =
                (self.card_no_of(block), self.card_name_of(block))
            else {
                continue;
            };

            if !card_name.contains(query) {
                continue;
            }
            if !seen.insert(card_no.clone()) {
                continue;
            }

            let thumb_url = anchor.select(&self.sel.image).next().and_then(|img| {
                let attrs = img.value();
                attrs
                    .attr("data-src")
                    .filter(|s| !s.is_empty())
                    .or_else(|| attrs.attr("src").filter(|s| !s.is_empty()))
                    .map(|src| absolute_url(&self.base_url, src))
            });

            candidates.push(CandidateSummary {
                card_no,
                card_name,
                thumb_url,
            });
        }

        Ok(candidates)
    }

    fn card_no_of(&self, block: ElementRef<'_>) -> Option<String> {
        block.select(&self.sel.info_span).next().map(element_text)
    }

    fn card_name_of(&self, block: ElementRef<'_>) -> Option<String> {
        block.select(&self.sel.card_name).next().map(element_text)
    }

    /// Acquisition-info strings of one block, deduplicated.
    ///
    /// Sections headed by anything other than the acquisition heading
    /// (e.g. remarks) are skipped. Unheaded sections are kept.
    fn packs_of(&self, block: ElementRef<'_>) -> Vec<String> {
        let texts = block.select(&self.sel.get_info).filter_map(|section| {
            let heading = section
                .select(&self.sel.heading)
                .next()
                .map(element_text)
                .unwrap_or_default();
            if !heading.is_empty() && !heading.contains(ACQUISITION_HEADING) {
                return None;
            }
            let text = text_without_headings(section);
            (!text.is_empty()).then_some(text)
        });
        unique_keep_order(texts)
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// [`Extractor::variants`] against the official site origin.
pub fn extract_variants(markup: &str, target_card_no: &str) -> Result<Vec<CardVariant>> {
    Extractor::new(config::BASE_URL)?.variants(markup, target_card_no)
}

/// [`Extractor::candidates`] against the official site origin.
pub fn extract_candidates(markup: &str, name: &str) -> Result<Vec<CandidateSummary>> {
    Extractor::new(config::BASE_URL)?.candidates(markup, name)
}

/// Turn a site-relative path into an absolute URL under `base_url`.
///
/// Every `../` is removed, then any leading `.` and `/` characters, so
/// `../images/x.png`, `./images/x.png` and `images/x.png` all map to
/// `<base_url>/images/x.png`. Query strings are kept.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let path = path.trim().replace("../", "");
    let path = path.trim_start_matches(['.', '/']);
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Collapse runs of whitespace to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop empty and repeated strings, keeping the first occurrence of each.
pub fn unique_keep_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

/// Text of an element with each text node trimmed and concatenated.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect::<String>()
}

/// Text of a section excluding any `h3` subtree, space-joined and collapsed.
fn text_without_headings(section: ElementRef<'_>) -> String {
    let section_id = section.id();
    let mut parts = Vec::new();

    for node in section.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let in_heading = node
            .ancestors()
            .take_while(|a| a.id() != section_id)
            .any(|a| a.value().as_element().is_some_and(|e| e.name() == "h3"));
        if in_heading {
            continue;
        }
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text);
        }
    }

    collapse_whitespace(&parts.join(" "))
}
