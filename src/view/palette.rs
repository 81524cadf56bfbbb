//! Color palette for token classes
//!
//! The built-in palette is a light theme in the Breeze style. Entries can
//! be overridden from the configuration by class name.

use crate::primitives::token::ColorClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const fn hex(v: u32) -> Rgb {
    Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Default colors in class index order
const DEFAULT_COLORS: [Rgb; 20] = [
    hex(0x1f1c1b), // default
    hex(0x1f1c1b), // keyword
    hex(0x0057ae), // type
    hex(0xb08000), // number
    hex(0xbf0303), // string
    hex(0x924c9d), // char
    hex(0x898887), // comment
    hex(0x006e28), // preprocessor
    hex(0xff5500), // include path
    hex(0xca60ca), // operator
    hex(0x644a9b), // standard name
    hex(0x0095ff), // third-party namespace
    hex(0x0057ae), // special variable
    hex(0xca60ca), // doc annotation
    hex(0xca60ca), // delimiter
    hex(0xca60ca), // bracket
    hex(0x0057ae), // address
    hex(0xbf0303), // register
    hex(0x00a000), // instruction
    hex(0xb08000), // label
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 20],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
        }
    }
}

impl Palette {
    /// Default palette with overrides applied. Unknown names and malformed
    /// colors are skipped with a warning.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut palette = Self::default();
        for (name, value) in overrides {
            match (ColorClass::from_name(name), Rgb::parse_hex(value)) {
                (Some(class), Some(rgb)) => palette.set(class, rgb),
                _ => tracing::warn!(name = %name, value = %value, "ignoring invalid color override"),
            }
        }
        palette
    }

    pub fn color(&self, class: ColorClass) -> Rgb {
        self.colors[class.index()]
    }

    pub fn set(&mut self, class: ColorClass, rgb: Rgb) {
        self.colors[class.index()] = rgb;
    }
}
