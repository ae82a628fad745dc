//! Static font-metric tables for the two standard PDF fonts used on the label.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em, indexed by WinAnsi
//! code. Standard fonts are never embedded from a file, so these tables are the
//! only source of glyph widths the composer has. They must match what a viewer
//! uses to render Helvetica, otherwise centred text drifts off-centre.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::label::error::GenerationError;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard (base-14) fonts the label is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    /// Labels, instructions and the postage box.
    Helvetica,
    /// Address block and the order/name values.
    HelveticaBold,
}

impl StandardFont {
    /// The PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_font())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Advance-width table for a standard font, covering WinAnsi codes 0x20..=0xFF.
///
/// `ascii[i]` is the width of code `i + 0x20` (0x20..=0x7E), `upper[i]` the
/// width of code `i + 0x80`. Codes WinAnsi leaves undefined have width 0.
pub struct FontMetricTable {
    ascii: [u16; 95],
    upper: [u16; 128],
    /// Width used for characters WinAnsi cannot encode.
    pub fallback_width: u16,
}

impl FontMetricTable {
    /// Advance width of a WinAnsi code in 1/1000 em.
    pub fn advance(&self, code: u8) -> u16 {
        match code {
            0x20..=0x7E => self.ascii[(code - 0x20) as usize],
            0x80..=0xFF => self.upper[(code - 0x80) as usize],
            _ => 0,
        }
    }

    /// Measures a string in 1/1000 em units.
    pub fn measure_str(&self, s: &str) -> u32 {
        s.chars()
            .map(|ch| match win_ansi_code(ch) {
                Some(code) => self.advance(code) as u32,
                None => self.fallback_width as u32,
            })
            .sum()
    }
}

/// Rendered width of `text` at `size` points.
pub fn text_width(text: &str, size: f32, font: StandardFont) -> f32 {
    get_metrics(font).measure_str(text) as f32 * size / 1000.0
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps a character to its WinAnsiEncoding code, if it has one.
pub fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        ' '..='~' => ch as u32,
        '\u{A0}'..='\u{FF}' => ch as u32,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code as u8)
}

/// Encodes `text` as WinAnsi bytes for a `Tj` operator.
///
/// Fails on the first character the encoding cannot represent.
pub fn encode_win_ansi(text: &str, font: StandardFont) -> Result<Vec<u8>, GenerationError> {
    text.chars()
        .map(|ch| win_ansi_code(ch).ok_or(GenerationError::UnencodableCharacter { ch, font }))
        .collect()
}

/// Splits field text into the lines it is drawn as.
///
/// Tabs and the NEL, line separator and paragraph separator characters become
/// four spaces. `\r\n`, `\n`, `\r`, vertical tab and form feed end a line. The
/// result always holds at least one (possibly empty) line.
pub fn text_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\t' | '\u{85}' | '\u{2028}' | '\u{2029}' => current.push_str("    "),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' | '\u{0B}' | '\u{0C}' => lines.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    lines.push(current);
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9    :    ;    <    =    >    ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        // @    A    B    C    D    E    F    G    H    I    J    K    L    M    N    O
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        // P    Q    R    S    T    U    V    W    X    Y    Z    [    \    ]    ^    _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        // `    a    b    c    d    e    f    g    h    i    j    k    l    m    n    o
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        // p    q    r    s    t    u    v    w    x    y    z    {    |    }    ~
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80 .. 0x8F
        556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        // 0x90 .. 0x9F
        0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
        // 0xA0 .. 0xAF
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // 0xB0 .. 0xBF
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 0xC0 .. 0xCF
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // 0xD0 .. 0xDF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 0xE0 .. 0xEF
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // 0xF0 .. 0xFF
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    fallback_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9    :    ;    <    =    >    ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        // @    A    B    C    D    E    F    G    H    I    J    K    L    M    N    O
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        // P    Q    R    S    T    U    V    W    X    Y    Z    [    \    ]    ^    _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        // `    a    b    c    d    e    f    g    h    i    j    k    l    m    n    o
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        // p    q    r    s    t    u    v    w    x    y    z    {    |    }    ~
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80 .. 0x8F
        556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        // 0x90 .. 0x9F
        0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
        // 0xA0 .. 0xAF
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // 0xB0 .. 0xBF
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 0xC0 .. 0xCF
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // 0xD0 .. 0xDF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 0xE0 .. 0xEF
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        // 0xF0 .. 0xFF
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    fallback_width: 556,
};

/// Returns the static metric table for a standard font.
pub fn get_metrics(font: StandardFont) -> &'static FontMetricTable {
    match font {
        StandardFont::Helvetica => &HELVETICA_TABLE,
        StandardFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
