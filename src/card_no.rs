//! Card-number validation.
//!
//! Numbers look like `OP06-118`: an alphabetic prefix (`OP`, `ST`, `EB`, `P`,
//! `PRB`), a two-digit set number, a dash, and a three-digit card number.
//! Validation runs before any request is issued.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{CatalogError, Result};

fn full_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{1,3}[0-9]{2}-[0-9]{3}$").expect("valid card number pattern"))
}

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").expect("valid number pattern"))
}

/// A validated, upper-cased card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardNo(String);

impl CardNo {
    /// Parse a full card number such as `op06-118` or `OP06-118`.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_uppercase();
        if full_pattern().is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(CatalogError::Validation(format!(
                "'{}' (expected e.g. OP06-118)",
                input.trim()
            )))
        }
    }

    /// Build a card number from one of [`config::PREFIXES`] and the
    /// `NN-NNN` part, e.g. `("OP", "05-067")`.
    pub fn from_parts(prefix: &str, number: &str) -> Result<Self> {
        let prefix = prefix.trim().to_uppercase();
        if !config::PREFIXES.contains(&prefix.as_str()) {
            return Err(CatalogError::Validation(format!("unknown prefix '{prefix}'")));
        }
        let number = number.trim();
        if !number_pattern().is_match(number) {
            return Err(CatalogError::Validation(format!(
                "'{number}' (expected e.g. 05-067)"
            )));
        }
        Self::parse(&format!("{prefix}{number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CardNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardNo {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CardNo> for String {
    fn from(value: CardNo) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes() {
        assert_eq!(CardNo::parse("OP06-118").unwrap().as_str(), "OP06-118");
        assert_eq!(CardNo::parse(" op06-118 ").unwrap().as_str(), "OP06-118");
        assert!(CardNo::parse("P-001").is_err());
        assert_eq!(CardNo::parse("PRB01-001").unwrap().as_str(), "PRB01-001");
    }

    #[test]
    fn rejects_short_segments() {
        assert!(matches!(CardNo::parse("6-118"), Err(CatalogError::Validation(_))));
        assert!(matches!(CardNo::parse("OP6-118"), Err(CatalogError::Validation(_))));
        assert!(matches!(CardNo::parse("OP06-11"), Err(CatalogError::Validation(_))));
        assert!(matches!(CardNo::parse("OP06-1180"), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn from_parts_checks_number_segment() {
        assert_eq!(CardNo::from_parts("OP", "05-067").unwrap().as_str(), "OP05-067");
        assert_eq!(CardNo::from_parts("st", "01-012").unwrap().as_str(), "ST01-012");
        assert!(CardNo::from_parts("OP", "6-118").is_err());
        assert!(CardNo::from_parts("OP", "05067").is_err());
        assert!(CardNo::from_parts("XX", "05-067").is_err());
    }
}
