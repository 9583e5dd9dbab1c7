//! Text normalisation on the way in (bytes to `String`) and on the way out
//! (`String` to what the built-in PDF fonts can print: the graphic
//! characters of Latin-1, written as WinAnsi bytes).

use crate::domain::errors::ExportError;
use crate::domain::models::{DecodePolicy, EncodePolicy};
use std::borrow::Cow;
use std::path::Path;

pub const PLACEHOLDER: char = '?';

/// Decode file bytes as UTF-8 and normalise line endings to `\n`.
///
/// Under [`DecodePolicy::Lossy`] invalid sequences are dropped, not replaced.
pub fn decode_text(path: &Path, bytes: &[u8], policy: DecodePolicy) -> Result<String, ExportError> {
    let text = match policy {
        DecodePolicy::Strict => match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(e) => {
                return Err(ExportError::Decode {
                    path: path.to_path_buf(),
                    offset: e.valid_up_to(),
                });
            }
        },
        DecodePolicy::Lossy => {
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            Cow::Owned(text)
        }
    };

    Ok(normalize_newlines(&text))
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Columns between tab stops when expanding `\t`.
pub const TAB_WIDTH: usize = 4;

/// Narrow `text` to printable Latin-1.
///
/// Tabs expand to spaces at [`TAB_WIDTH`] stops, a no-break space becomes
/// `' '` and a soft hyphen `'-'`. Control characters other than `\n`, the
/// C1 block and everything past U+00FF have no glyph in the built-in fonts.
pub fn to_latin1<'a>(
    path: &Path,
    text: &'a str,
    policy: EncodePolicy,
) -> Result<Cow<'a, str>, ExportError> {
    if text.chars().all(|c| c == '\n' || is_printable(c)) {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\n' => {
                out.push('\n');
                column = 0;
                continue;
            }
            '\t' => {
                let spaces = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
                continue;
            }
            '\u{A0}' => out.push(' '),
            '\u{AD}' => out.push('-'),
            c if is_printable(c) => out.push(c),
            c => match policy {
                EncodePolicy::Strict => {
                    return Err(ExportError::Encode {
                        path: path.to_path_buf(),
                        ch: c,
                        code: c as u32,
                    });
                }
                EncodePolicy::Lossy => out.push(PLACEHOLDER),
            },
        }
        column += 1;
    }

    Ok(Cow::Owned(out))
}

/// Has a WinAnsi glyph and needs no substitution.
fn is_printable(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}
