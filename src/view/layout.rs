//! Mapping between byte offsets, columns and pixels
//!
//! Key concepts:
//! - **Byte offset**: position in the buffer, always on a codepoint boundary
//! - **Column**: monospace cell index within a line, counting wide
//!   codepoints as two cells and combining marks as zero
//! - **Pixel**: `gutter + column * cell_width` horizontally and
//!   `line * line_height` vertically
//!
//! Absolute coordinates are relative to the whole content; viewport
//! coordinates subtract the horizontal scroll offset and the top line.

use crate::config::{GutterConfig, MetricsConfig};
use crate::model::buffer::Buffer;
use crate::primitives::display_width::char_width;
use crate::primitives::utf8::CodepointIter;

/// Glyph measurements supplied by the rendering layer
pub trait GlyphMetrics {
    /// Advance width of `ch` in pixels, if the font can measure it
    fn advance(&self, ch: char) -> Option<u32>;
    fn ascent(&self) -> Option<u32>;
    fn descent(&self) -> Option<u32>;
}

/// Metrics for a font where every glyph is the same size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    pub advance: u32,
    pub ascent: u32,
    pub descent: u32,
}

impl GlyphMetrics for FixedMetrics {
    fn advance(&self, _ch: char) -> Option<u32> {
        Some(self.advance)
    }

    fn ascent(&self) -> Option<u32> {
        Some(self.ascent)
    }

    fn descent(&self) -> Option<u32> {
        Some(self.descent)
    }
}

/// Resolved cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub cell_width: u32,
    pub line_height: u32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::fallback(&MetricsConfig::default())
    }
}

impl FontMetrics {
    pub fn new(cell_width: u32, line_height: u32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            line_height: line_height.max(1),
        }
    }

    pub fn fallback(config: &MetricsConfig) -> Self {
        Self::new(config.fallback_cell_width, config.fallback_line_height)
    }

    /// Cell width from the advance of `M`, line height from ascent plus
    /// descent; zero or unknown values fall back to the configured ones.
    pub fn measure(glyphs: &dyn GlyphMetrics, fallback: &MetricsConfig) -> Self {
        let cell_width = glyphs
            .advance('M')
            .filter(|&w| w > 0)
            .unwrap_or(fallback.fallback_cell_width);
        let line_height = match (glyphs.ascent(), glyphs.descent()) {
            (Some(a), Some(d)) if a + d > 0 => a + d,
            _ => fallback.fallback_line_height,
        };
        Self::new(cell_width, line_height)
    }
}

/// Coordinate system for pixel conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordMode {
    /// Relative to the whole content
    #[default]
    Absolute,
    /// Relative to the visible area
    Viewport,
}

/// Scroll state needed for viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffsets {
    pub top_line: usize,
    pub h_offset_px: i32,
}

/// Pixel position of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// `n` as a pixel quantity, saturating at `i32::MAX`
#[inline]
pub fn to_px(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Column width of `text[start..end]`
pub fn columns_between(text: &[u8], start: usize, end: usize) -> usize {
    CodepointIter::new(text, start, end)
        .map(|(_, ch, _)| char_width(ch))
        .sum()
}

/// Pixel geometry of a buffer for one font and gutter setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutEngine {
    pub metrics: FontMetrics,
    pub gutter: GutterConfig,
}

impl LayoutEngine {
    pub fn new(metrics: FontMetrics, gutter: GutterConfig) -> Self {
        Self { metrics, gutter }
    }

    #[inline]
    pub fn cell_width(&self) -> i32 {
        i32::try_from(self.metrics.cell_width).unwrap_or(i32::MAX)
    }

    #[inline]
    pub fn line_height(&self) -> i32 {
        i32::try_from(self.metrics.line_height).unwrap_or(i32::MAX)
    }

    /// Pixel width of `columns` cells
    #[inline]
    pub fn columns_px(&self, columns: usize) -> i32 {
        to_px(columns).saturating_mul(self.cell_width())
    }

    /// Absolute y of the top of `line`
    #[inline]
    pub fn line_top(&self, line: usize) -> i32 {
        to_px(line).saturating_mul(self.line_height())
    }

    /// Gutter width: enough cells for the largest line number (at least
    /// `min_digits`) plus padding, or 0 when disabled.
    pub fn gutter_width(&self, line_count: usize) -> i32 {
        if !self.gutter.enabled {
            return 0;
        }
        let digits = line_count.max(1).to_string().len() as u32;
        let cells = digits
            .max(self.gutter.min_digits)
            .saturating_add(self.gutter.padding_cells);
        self.columns_px(cells as usize)
    }

    /// Full lines that fit in `height_px`, never less than one
    pub fn visible_lines(&self, height_px: i32) -> usize {
        (height_px.max(0) / self.line_height()).max(1) as usize
    }

    /// Text columns that fit next to the gutter in `width_px`
    pub fn visible_columns(&self, width_px: i32, line_count: usize) -> usize {
        (width_px.saturating_sub(self.gutter_width(line_count)).max(0) / self.cell_width()) as usize
    }

    /// Pixel width of a line's text, gutter excluded
    pub fn line_width_px(&self, buffer: &Buffer, line: usize) -> i32 {
        let range = buffer.line_index().line_range(line);
        self.columns_px(columns_between(buffer.bytes(), range.start, range.end))
    }

    /// Widest line plus gutter, and total height
    pub fn content_size(&self, buffer: &Buffer) -> (i32, i32) {
        let lines = buffer.line_count();
        let widest = (0..lines)
            .map(|line| self.line_width_px(buffer, line))
            .max()
            .unwrap_or(0);
        (
            widest.saturating_add(self.gutter_width(lines)),
            self.line_top(lines.max(1)),
        )
    }

    /// Top-left pixel of the codepoint at `pos`.
    pub fn pos_to_xy(
        &self,
        buffer: &Buffer,
        pos: usize,
        mode: CoordMode,
        scroll: ScrollOffsets,
    ) -> PixelPoint {
        let pos = buffer.clamp_position(pos);
        let index = buffer.line_index();
        let line = index.line_of(pos);
        let range = index.line_range(line);
        let pos = pos.clamp(range.start, range.end);

        let col = columns_between(buffer.bytes(), range.start, pos);
        let mut point = PixelPoint {
            x: self
                .gutter_width(index.line_count())
                .saturating_add(self.columns_px(col)),
            y: self.line_top(line),
        };
        if mode == CoordMode::Viewport {
            point.x = point.x.saturating_sub(scroll.h_offset_px);
            point.y = point.y.saturating_sub(self.line_top(scroll.top_line));
        }
        point
    }

    /// Byte offset of the codepoint under pixel `(x, y)`.
    ///
    /// Points left of the text map to the line start, points past the end
    /// of a line map to its end, and points above or below the content map
    /// to the first or last line.
    pub fn xy_to_pos(
        &self,
        buffer: &Buffer,
        x: i32,
        y: i32,
        mode: CoordMode,
        scroll: ScrollOffsets,
    ) -> usize {
        let (mut x, mut y) = (x, y);
        if mode == CoordMode::Viewport {
            x = x.saturating_add(scroll.h_offset_px);
            y = y.saturating_add(self.line_top(scroll.top_line));
        }

        let index = buffer.line_index();
        let line = (y.max(0) / self.line_height()) as usize;
        let range = index.line_range(line.min(index.line_count().saturating_sub(1)));

        let text_x = x.saturating_sub(self.gutter_width(index.line_count()));
        let target = if text_x > 0 {
            (text_x / self.cell_width()) as usize
        } else {
            0
        };

        let mut col = 0;
        for (offset, ch, _) in CodepointIter::new(buffer.bytes(), range.start, range.end) {
            let width = char_width(ch);
            if col + width > target {
                return offset;
            }
            col += width;
        }
        range.end
    }
}
