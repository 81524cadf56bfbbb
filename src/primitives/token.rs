//! Classified byte spans produced by the tokenizers
//!
//! A token names a byte range, one of twenty color classes and a style
//! bitset. The renderer resolves classes to colors through the palette;
//! tokenizers never deal with colors.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Color class of a token.
///
/// The numeric index (0..20) is stable and is what palettes are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Default,
    Keyword,
    Type,
    Number,
    String,
    Char,
    Comment,
    Preprocessor,
    IncludePath,
    Operator,
    StandardName,
    ThirdPartyNamespace,
    SpecialVariable,
    DocAnnotation,
    Delimiter,
    Bracket,
    Address,
    Register,
    Instruction,
    Label,
}

impl ColorClass {
    /// Every class in index order
    pub const ALL: [ColorClass; 20] = [
        Self::Default,
        Self::Keyword,
        Self::Type,
        Self::Number,
        Self::String,
        Self::Char,
        Self::Comment,
        Self::Preprocessor,
        Self::IncludePath,
        Self::Operator,
        Self::StandardName,
        Self::ThirdPartyNamespace,
        Self::SpecialVariable,
        Self::DocAnnotation,
        Self::Delimiter,
        Self::Bracket,
        Self::Address,
        Self::Register,
        Self::Instruction,
        Self::Label,
    ];

    /// Stable palette index
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used in configuration files and dumps
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Keyword => "keyword",
            Self::Type => "type",
            Self::Number => "number",
            Self::String => "string",
            Self::Char => "char",
            Self::Comment => "comment",
            Self::Preprocessor => "preprocessor",
            Self::IncludePath => "include_path",
            Self::Operator => "operator",
            Self::StandardName => "standard_name",
            Self::ThirdPartyNamespace => "third_party_namespace",
            Self::SpecialVariable => "special_variable",
            Self::DocAnnotation => "doc_annotation",
            Self::Delimiter => "delimiter",
            Self::Bracket => "bracket",
            Self::Address => "address",
            Self::Register => "register",
            Self::Instruction => "instruction",
            Self::Label => "label",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

bitflags! {
    /// Font style flags of a token
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TokenStyle: u8 {
        const BOLD = 1;
        const ITALIC = 2;
    }
}

/// A classified byte range `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub start: usize,
    pub len: usize,
    pub class: ColorClass,
    #[serde(default)]
    pub style: TokenStyle,
}

impl Token {
    pub fn new(start: usize, len: usize, class: ColorClass) -> Self {
        Self {
            start,
            len,
            class,
            style: TokenStyle::empty(),
        }
    }

    /// Build a token from a range with an explicit style
    pub fn styled(range: Range<usize>, class: ColorClass, style: TokenStyle) -> Self {
        Self {
            start: range.start,
            len: range.end.saturating_sub(range.start),
            class,
            style,
        }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
