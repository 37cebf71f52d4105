use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.onepiece-cardgame.com";
pub const CARDLIST_PATH: &str = "cardlist/";

/// Character budget for a single post.
pub const CHAR_LIMIT: usize = 140;

pub const VARIANT_TTL: Duration = Duration::from_secs(60 * 60 * 24);
pub const CANDIDATE_TTL: Duration = Duration::from_secs(60 * 60);

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);
pub const REQUEST_DELAY: Duration = Duration::from_millis(700);

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "ja,en-US;q=0.9,en;q=0.8";

/// Card-number prefixes offered by the official card list.
pub const PREFIXES: [&str; 5] = ["OP", "ST", "P", "EB", "PRB"];

// Post template pieces.
pub const POST_HEADER: &str = "デッキ構築メモ";
pub const PACK_SECTION_LABEL: &str = "▶︎ 収録パック";
pub const PACK_BULLET: &str = "・";
pub const UNKNOWN_CARD_NAME: &str = "(カード名不明)";
pub const DEFAULT_HASHTAG: &str = "#ワンピースカード";

/// Join the site origin and the card list path.
pub fn cardlist_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), CARDLIST_PATH)
}

pub fn default_archive_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("opcg-memo").join("archive")
    } else {
        PathBuf::from("archive")
    }
}
