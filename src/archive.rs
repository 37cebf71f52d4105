//! Text archive of generated posts, one file per card.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

const UNSAFE_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replace characters that are unsafe in file names with `_` and trim.
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `<card_no>_<card_name>.txt`, sanitized.
pub fn archive_file_name(card_no: &str, card_name: &str) -> String {
    sanitize_filename(&format!("{card_no}_{card_name}.txt"))
}

/// Write `text` to `dir/<card_no>_<card_name>.txt`, creating `dir` if needed.
///
/// An existing archive for the same card is overwritten.
pub fn write_archive(dir: &Path, card_no: &str, card_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(archive_file_name(card_no, card_name));
    fs::write(&path, text)?;
    info!(path = %path.display(), "archived post");
    Ok(path)
}
