use std::path::PathBuf;
use thiserror::Error;

/// Failures raised only under the strict decode/encode policies.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{path}: invalid UTF-8 at byte {offset}")]
    Decode { path: PathBuf, offset: usize },

    #[error("{path}: character {ch:?} (U+{code:04X}) has no glyph in the built-in PDF fonts")]
    Encode { path: PathBuf, ch: char, code: u32 },
}
