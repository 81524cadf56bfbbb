//! Display width of codepoints in monospace cells
//!
//! `unicode-width` covers most of the table, but a handful of classes must
//! come out the same on every platform regardless of the table version:
//! combining marks, joiners, variation selectors and emoji skin-tone
//! modifiers are always zero cells; CJK, Hangul, fullwidth forms and the
//! common emoji blocks are always two.

use unicode_width::UnicodeWidthChar;

/// Codepoint ranges that never occupy a cell.
const ZERO_WIDTH: &[(u32, u32)] = &[
    (0x0300, 0x036F), // combining diacritical marks
    (0x1AB0, 0x1AFF), // combining diacritical marks extended
    (0x1DC0, 0x1DFF), // combining diacritical marks supplement
    (0x200C, 0x200D), // ZWNJ, ZWJ
    (0x20D0, 0x20FF), // combining marks for symbols
    (0xFE00, 0xFE0F), // variation selectors
    (0xFE20, 0xFE2F), // combining half marks
    (0x1F3FB, 0x1F3FF), // skin tone modifiers
    (0xE0100, 0xE01EF), // variation selectors supplement
];

/// Codepoint ranges that always occupy two cells.
const DOUBLE_WIDTH: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo initial consonants
    (0x2E80, 0xA4CF),   // CJK radicals through Yi
    (0xAC00, 0xD7A3),   // Hangul syllables
    (0xF900, 0xFAFF),   // CJK compatibility ideographs
    (0xFF01, 0xFF60),   // fullwidth forms
    (0xFFE0, 0xFFE6),   // fullwidth signs
    (0x1F300, 0x1F64F), // pictographs and emoticons
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
];

#[inline]
fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Number of monospace cells `ch` occupies.
pub fn char_width(ch: char) -> usize {
    let cp = ch as u32;
    if in_ranges(cp, ZERO_WIDTH) {
        return 0;
    }
    if cp < 0x20 || (0x7F..0xA0).contains(&cp) {
        return 0;
    }
    if cp < 0x7F {
        return 1;
    }
    if in_ranges(cp, DOUBLE_WIDTH) {
        return 2;
    }
    // Unassigned or ambiguous codepoints still take a cell
    ch.width().unwrap_or(1)
}
