//! HTTP access to the official card list search.
//!
//! A search is a GET of the card list page (to pick up session cookies)
//! followed by a form POST to the same URL. Nothing is retried.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::debug;

use crate::card_no::CardNo;
use crate::config;
use crate::error::Result;
use crate::models::Color;

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

/// Form parameters of one card list search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// Free-text search (`freewords`): a card number or part of a name.
    pub freewords: String,
    /// Series filter. `None` searches every series.
    pub series: Option<String>,
    /// Sent as one repeated `colors[]` field per entry.
    pub colors: Vec<Color>,
}

impl SearchQuery {
    /// Exact card-number search across all series.
    pub fn card_no(card_no: &CardNo) -> Self {
        Self {
            freewords: card_no.to_string(),
            ..Self::default()
        }
    }

    /// Name search, optionally narrowed by colors.
    pub fn name(name: &str, colors: &[Color]) -> Self {
        Self {
            freewords: name.trim().to_string(),
            series: None,
            colors: colors.to_vec(),
        }
    }

    /// Form-encoded body fields in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("freewords", self.freewords.clone()),
            ("series", self.series.clone().unwrap_or_default()),
        ];
        fields.extend(
            self.colors
                .iter()
                .map(|c| ("colors[]", c.as_param().to_string())),
        );
        fields
    }
}

// ---------------------------------------------------------------------------
// MarkupSource
// ---------------------------------------------------------------------------

/// Anything that can answer a search with card list markup.
///
/// [`CatalogClient`] talks to the live site; tests plug in captured pages.
pub trait MarkupSource: Send {
    fn fetch(&self, query: &SearchQuery) -> Result<String>;
}

// ---------------------------------------------------------------------------
// CatalogClient
// ---------------------------------------------------------------------------

/// Blocking client for the card list search endpoint.
pub struct CatalogClient {
    client: Client,
    cardlist_url: String,
    delay: Duration,
}

impl CatalogClient {
    /// Create a client for `cardlist_url`.
    ///
    /// `timeout` bounds each request; `delay` is slept before every search.
    pub fn new(cardlist_url: &str, timeout: Duration, delay: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(config::USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(config::ACCEPT_LANGUAGE));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            cardlist_url: cardlist_url.to_string(),
            delay,
        })
    }

    pub fn cardlist_url(&self) -> &str {
        &self.cardlist_url
    }

    /// Run one search and return the result page markup.
    pub fn search(&self, query: &SearchQuery) -> Result<String> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        debug!(url = %self.cardlist_url, "warming up session");
        self.client
            .get(&self.cardlist_url)
            .send()?
            .error_for_status()?;

        debug!(freewords = %query.freewords, colors = query.colors.len(), "searching card list");
        let resp = self
            .client
            .post(&self.cardlist_url)
            .form(&query.form_fields())
            .send()?
            .error_for_status()?;

        Ok(resp.text()?)
    }
}

impl MarkupSource for CatalogClient {
    fn fetch(&self, query: &SearchQuery) -> Result<String> {
        self.search(query)
    }
}
