//! Async wrapper around [`OpcgMemo`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on Tokio's blocking thread pool via
//! [`tokio::task::spawn_blocking`], so the blocking HTTP client never runs on
//! the event loop.
//!
//! # Example
//!
//! ```no_run
//! use opcg_memo::AsyncOpcgMemo;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let memo = AsyncOpcgMemo::builder().build().await.unwrap();
//!
//!     let card = memo.lookup("OP06-118").await.unwrap();
//!
//!     // Any sync method via closure
//!     let zoro = memo.run(|m| m.candidates().search("ゾロ", &[])).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::models::{CandidateSummary, CardLookup, Color};
use crate::{config, OpcgMemo};

// ---------------------------------------------------------------------------
// AsyncOpcgMemoBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncOpcgMemo`] instance.
pub struct AsyncOpcgMemoBuilder {
    base_url: String,
    timeout: Duration,
    request_delay: Duration,
}

impl Default for AsyncOpcgMemoBuilder {
    fn default() -> Self {
        Self {
            base_url: config::BASE_URL.to_string(),
            timeout: config::REQUEST_TIMEOUT,
            request_delay: config::REQUEST_DELAY,
        }
    }
}

impl AsyncOpcgMemoBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Build on the blocking pool; the blocking HTTP client must not be
    /// created on the event loop.
    pub async fn build(self) -> Result<AsyncOpcgMemo> {
        tokio::task::spawn_blocking(move || {
            let memo = OpcgMemo::builder()
                .base_url(&self.base_url)
                .timeout(self.timeout)
                .request_delay(self.request_delay)
                .build()?;
            Ok(AsyncOpcgMemo::from_sync(memo))
        })
        .await
        .map_err(|e| CatalogError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncOpcgMemo
// ---------------------------------------------------------------------------

/// Async wrapper around [`OpcgMemo`].
///
/// The inner instance sits behind a [`Mutex`] since its memo tables use
/// `RefCell`; operations therefore run one at a time.
pub struct AsyncOpcgMemo {
    inner: Arc<Mutex<OpcgMemo>>,
}

impl AsyncOpcgMemo {
    pub fn builder() -> AsyncOpcgMemoBuilder {
        AsyncOpcgMemoBuilder::default()
    }

    /// Wrap an already-built instance (e.g. one with a custom source).
    pub fn from_sync(memo: OpcgMemo) -> Self {
        Self {
            inner: Arc::new(Mutex::new(memo)),
        }
    }

    /// Run a sync operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&OpcgMemo) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let memo = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = memo
                .lock()
                .map_err(|_| CatalogError::InvalidArgument("lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| CatalogError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Async [`VariantQuery::lookup`](crate::queries::VariantQuery::lookup).
    pub async fn lookup(&self, card_no: &str) -> Result<CardLookup> {
        let card_no = card_no.to_string();
        self.run(move |m| m.variants().lookup(&card_no)).await
    }

    /// Async [`CandidateQuery::search`](crate::queries::CandidateQuery::search).
    pub async fn candidates(&self, name: &str, colors: &[Color]) -> Result<Vec<CandidateSummary>> {
        let name = name.to_string();
        let colors = colors.to_vec();
        self.run(move |m| m.candidates().search(&name, &colors)).await
    }
}
