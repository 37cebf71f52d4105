//! Search-then-draft session state.
//!
//! A session starts in [`SessionState::AwaitingQuery`]. A successful lookup
//! moves it to [`SessionState::ResultsReady`], where posts can be generated
//! any number of times until the caller goes back to the query step.

use serde::{Deserialize, Serialize};

use crate::compose::{check_length, LengthCheck, LengthPolicy, PostDraft};
use crate::error::{CatalogError, Result};
use crate::models::{CandidateSummary, CardLookup, Color};
use crate::OpcgMemo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Search by exact card number.
    #[default]
    ByNumber,
    /// Search by name and colors, then pick a candidate.
    ByNameColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingQuery {
        mode: SearchMode,
    },
    ResultsReady {
        mode: SearchMode,
        lookup: CardLookup,
        /// Last generated post, empty until [`Session::generate`] runs.
        generated_text: String,
    },
}

/// Explicit state for one interactive search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    state: SessionState,
    candidates: Vec<CandidateSummary>,
    deck_title: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

impl Session {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            state: SessionState::AwaitingQuery { mode },
            candidates: Vec::new(),
            deck_title: String::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> SearchMode {
        match &self.state {
            SessionState::AwaitingQuery { mode } | SessionState::ResultsReady { mode, .. } => *mode,
        }
    }

    pub fn candidates(&self) -> &[CandidateSummary] {
        &self.candidates
    }

    pub fn lookup(&self) -> Option<&CardLookup> {
        match &self.state {
            SessionState::ResultsReady { lookup, .. } => Some(lookup),
            SessionState::AwaitingQuery { .. } => None,
        }
    }

    pub fn generated_text(&self) -> Option<&str> {
        match &self.state {
            SessionState::ResultsReady { generated_text, .. } if !generated_text.is_empty() => {
                Some(generated_text)
            }
            _ => None,
        }
    }

    /// Deck title remembered from the last generation.
    pub fn deck_title(&self) -> &str {
        &self.deck_title
    }

    // -- Query step --------------------------------------------------------

    /// Switch search mode while waiting for a query.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if let SessionState::AwaitingQuery { .. } = self.state {
            self.state = SessionState::AwaitingQuery { mode };
        }
    }

    /// Look up `card_no` and move to the results step.
    ///
    /// On error the session stays at the query step and the error is
    /// returned unchanged.
    pub fn search_number(&mut self, memo: &OpcgMemo, card_no: &str) -> Result<&CardLookup> {
        let mode = self.mode();
        self.state = SessionState::AwaitingQuery { mode };
        let lookup = memo.variants().lookup(card_no)?;
        Ok(self.show(mode, lookup))
    }

    /// Search candidates by name and colors. The session stays at the query
    /// step; the list is kept for [`pick_candidate`](Self::pick_candidate).
    pub fn search_candidates(
        &mut self,
        memo: &OpcgMemo,
        name: &str,
        colors: &[Color],
    ) -> Result<&[CandidateSummary]> {
        self.state = SessionState::AwaitingQuery {
            mode: SearchMode::ByNameColor,
        };
        self.candidates.clear();
        self.candidates = memo.candidates().search(name, colors)?;
        Ok(&self.candidates)
    }

    /// Look up the candidate at `index` and move to the results step.
    pub fn pick_candidate(&mut self, memo: &OpcgMemo, index: usize) -> Result<&CardLookup> {
        let card_no = self
            .candidates
            .get(index)
            .map(|c| c.card_no.clone())
            .ok_or_else(|| {
                CatalogError::InvalidArgument(format!("no candidate at index {index}"))
            })?;
        self.state = SessionState::AwaitingQuery {
            mode: SearchMode::ByNameColor,
        };
        let lookup = memo.variants().lookup(&card_no)?;
        Ok(self.show(SearchMode::ByNameColor, lookup))
    }

    fn show(&mut self, mode: SearchMode, lookup: CardLookup) -> &CardLookup {
        self.state = SessionState::ResultsReady {
            mode,
            lookup,
            generated_text: String::new(),
        };
        match &self.state {
            SessionState::ResultsReady { lookup, .. } => lookup,
            SessionState::AwaitingQuery { .. } => unreachable!("state was just set"),
        }
    }

    // -- Results step ------------------------------------------------------

    /// Generate (or regenerate) the post for the current card.
    ///
    /// Length is checked newline-inclusive. Fails if no card is shown.
    pub fn generate(
        &mut self,
        deck_title: &str,
        comment: &str,
        hashtag: &str,
    ) -> Result<(String, LengthCheck)> {
        let SessionState::ResultsReady {
            lookup,
            generated_text,
            ..
        } = &mut self.state
        else {
            return Err(CatalogError::InvalidArgument(
                "no card selected; search first".into(),
            ));
        };

        let text = PostDraft::from_lookup(lookup)
            .deck_title(deck_title.trim())
            .comment(comment)
            .hashtag(hashtag)
            .render();
        let check = check_length(&text, LengthPolicy::NewlineInclusive);

        *generated_text = text.clone();
        self.deck_title = deck_title.trim().to_string();
        Ok((text, check))
    }

    /// Drop the shown card and generated text and return to the query step.
    pub fn back_to_query(&mut self, mode: SearchMode) {
        self.state = SessionState::AwaitingQuery { mode };
    }
}
