//! Glyph advances for the two built-in PDF fonts the document uses.
//!
//! Widths are in 1/1000 em, taken from the standard Type 1 AFM files.

use printpdf::BuiltinFont;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    HelveticaBold,
    Courier,
}

impl FontFace {
    pub fn builtin(self) -> BuiltinFont {
        match self {
            FontFace::HelveticaBold => BuiltinFont::HelveticaBold,
            FontFace::Courier => BuiltinFont::Courier,
        }
    }

    pub fn advance(self, c: char) -> u16 {
        match self {
            FontFace::Courier => COURIER_ADVANCE,
            FontFace::HelveticaBold => {
                let code = c as u32;
                match code {
                    0x20..=0x7E => HELVETICA_BOLD_ASCII[(code - 0x20) as usize],
                    0xA0..=0xFF => HELVETICA_BOLD_LATIN1[(code - 0xA0) as usize],
                    _ => HELVETICA_BOLD_FALLBACK,
                }
            }
        }
    }
}

pub const COURIER_ADVANCE: u16 = 600;
const HELVETICA_BOLD_FALLBACK: u16 = 556;

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // eth..ydieresis
];

pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(text: &str, face: FontFace, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| face.advance(c) as u32).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}

/// How many characters of a monospace face fit into `width_mm`. Never less than one.
pub fn monospace_capacity(width_mm: f32, size_pt: f32) -> usize {
    let char_mm = COURIER_ADVANCE as f32 / 1000.0 * size_pt * MM_PER_PT;
    ((width_mm / char_mm).floor() as usize).max(1)
}
