//! Post drafting and length checking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::CardLookup;

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Render the post text.
///
/// ```text
/// デッキ構築メモ
///
/// OP06-118 ロロノア・ゾロ
///
/// ▶︎ 収録パック
/// ・<pack>
///
/// <comment>
/// <hashtag>
/// ```
///
/// The blank line before the comment and the comment itself only appear when
/// the trimmed comment is non-empty; likewise for the hashtag line. No
/// trailing newline.
///
/// `deck_title` is accepted but does not appear in the output.
pub fn compose(
    _deck_title: &str,
    card_no: &str,
    card_name: &str,
    packs: &[String],
    comment: &str,
    hashtag: &str,
) -> String {
    let mut lines: Vec<String> = vec![
        config::POST_HEADER.to_string(),
        String::new(),
        format!("{card_no} {card_name}"),
        String::new(),
        config::PACK_SECTION_LABEL.to_string(),
    ];
    lines.extend(packs.iter().map(|p| format!("{}{}", config::PACK_BULLET, p)));

    let comment = comment.trim();
    if !comment.is_empty() {
        lines.push(String::new());
        lines.push(comment.to_string());
    }
    let hashtag = hashtag.trim();
    if !hashtag.is_empty() {
        lines.push(hashtag.to_string());
    }

    lines.join("\n")
}

/// Inputs of one post. Rebuilt for every generation; only the text matters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub deck_title: String,
    pub card_no: String,
    pub card_name: String,
    pub packs: Vec<String>,
    pub comment: String,
    pub hashtag: String,
}

impl PostDraft {
    /// Start a draft from a lookup result with an empty comment and hashtag.
    pub fn from_lookup(lookup: &CardLookup) -> Self {
        Self {
            card_no: lookup.card_no.clone(),
            card_name: lookup.card_name.clone(),
            packs: lookup.packs.clone(),
            ..Self::default()
        }
    }

    pub fn deck_title(mut self, deck_title: &str) -> Self {
        self.deck_title = deck_title.to_string();
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn hashtag(mut self, hashtag: &str) -> Self {
        self.hashtag = hashtag.to_string();
        self
    }

    pub fn render(&self) -> String {
        compose(
            &self.deck_title,
            &self.card_no,
            &self.card_name,
            &self.packs,
            &self.comment,
            &self.hashtag,
        )
    }
}

// ---------------------------------------------------------------------------
// Length check
// ---------------------------------------------------------------------------

/// How characters are counted against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthPolicy {
    /// Every character counts, newlines included. Used by the interactive flow.
    NewlineInclusive,
    /// Newlines are removed before counting. Used by the batch command.
    NewlineStripped,
}

impl LengthPolicy {
    pub fn count(self, text: &str) -> usize {
        match self {
            LengthPolicy::NewlineInclusive => text.chars().count(),
            LengthPolicy::NewlineStripped => text.chars().filter(|&c| c != '\n').count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthVerdict {
    Ok,
    Over,
}

/// Result of measuring a post against the character limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthCheck {
    pub length: usize,
    pub limit: usize,
    pub verdict: LengthVerdict,
    /// Characters over the limit; zero when within it.
    pub overage: usize,
}

impl LengthCheck {
    pub fn is_ok(&self) -> bool {
        self.verdict == LengthVerdict::Ok
    }
}

impl fmt::Display for LengthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            LengthVerdict::Ok => write!(f, "{} / {} : OK", self.length, self.limit),
            LengthVerdict::Over => write!(
                f,
                "{} / {} : NG ({} over)",
                self.length, self.limit, self.overage
            ),
        }
    }
}

/// Measure `text` against [`config::CHAR_LIMIT`].
pub fn check_length(text: &str, policy: LengthPolicy) -> LengthCheck {
    check_length_with_limit(text, policy, config::CHAR_LIMIT)
}

pub fn check_length_with_limit(text: &str, policy: LengthPolicy, limit: usize) -> LengthCheck {
    let length = policy.count(text);
    let verdict = if length <= limit {
        LengthVerdict::Ok
    } else {
        LengthVerdict::Over
    };
    LengthCheck {
        length,
        limit,
        verdict,
        overage: length.saturating_sub(limit),
    }
}
