use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Card colors accepted by the card list's `colors[]` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
    Black,
    Yellow,
    Mix,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Black,
        Color::Yellow,
        Color::Mix,
    ];

    /// Form value sent to the site.
    pub fn as_param(self) -> &'static str {
        match self {
            Color::Red => "赤",
            Color::Green => "緑",
            Color::Blue => "青",
            Color::Purple => "紫",
            Color::Black => "黒",
            Color::Yellow => "黄",
            Color::Mix => "mix",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Black => "black",
            Color::Yellow => "yellow",
            Color::Mix => "mix",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Color {
    type Err = CatalogError;

    /// Accepts the site's value (`赤`) or the English name (`red`, any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Color::ALL
            .into_iter()
            .find(|c| c.as_param() == s || c.english_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::InvalidArgument(format!("unknown color: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_site_values_and_english_names() {
        assert_eq!("赤".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Purple".parse::<Color>().unwrap(), Color::Purple);
        assert_eq!(" MIX ".parse::<Color>().unwrap(), Color::Mix);
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(matches!(
            "orange".parse::<Color>(),
            Err(CatalogError::InvalidArgument(_))
        ));
    }
}
