//! Scrollbar value mapping
//!
//! # Design
//! - **Direct mode**: while the visible fraction of the content is at least
//!   `min_fraction`, one scrollbar unit is one line. The scrollbar maximum is
//!   the line count and the slider is the visible line count.
//! - **Compressed mode**: for longer content the scrollbar has a fixed
//!   `max_units` range and a minimum-size slider, and the top line is mapped
//!   proportionally. Without this the slider would shrink to nothing for
//!   very long listings.
//!
//! Rounding is done in integers (half up), so conversions are exact and
//! repeated round trips never drift: when the scrollable line range is no
//! larger than the unit range, top → value → top is the identity; otherwise
//! value → top → value is.
//!
//! Horizontal scrolling is always direct, in pixels.

use crate::config::ScrollConfig;

/// Regime of a scrollbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Content fits; the scrollbar is not shown
    Hidden,
    /// One unit per line (or pixel)
    Direct,
    /// Fixed unit range mapped proportionally
    Compressed,
}

/// Values to configure a scrollbar with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarSpec {
    pub minimum: u32,
    pub maximum: u32,
    pub slider_size: u32,
    pub value: u32,
    pub increment: u32,
    pub page_increment: u32,
    pub mode: ScrollMode,
}

impl ScrollbarSpec {
    fn hidden(increment: u32, page_increment: u32) -> Self {
        Self {
            minimum: 0,
            maximum: 1,
            slider_size: 1,
            value: 0,
            increment,
            page_increment,
            mode: ScrollMode::Hidden,
        }
    }

    /// Largest value the slider can take
    pub fn upper(&self) -> u32 {
        self.maximum.saturating_sub(self.slider_size).max(self.minimum)
    }

    /// Same scrollbar with `value` clamped into range
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value.clamp(self.minimum, self.upper());
        self
    }
}

/// `round(num / den)`, half up, for non-negative values
#[inline]
fn div_round(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMapper {
    min_fraction: f64,
    max_units: u32,
    horizontal_increment: u32,
}

impl Default for ScrollMapper {
    fn default() -> Self {
        Self::new(&ScrollConfig::default())
    }
}

impl ScrollMapper {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            min_fraction: config.min_fraction,
            max_units: config.max_units.max(2),
            horizontal_increment: config.horizontal_increment_px.max(1),
        }
    }

    /// Slider size in compressed mode
    pub fn compressed_slider(&self) -> u32 {
        let slider = (self.min_fraction * f64::from(self.max_units)).round() as u32;
        slider.clamp(1, self.max_units - 1)
    }

    /// Scrollbar units the slider can travel in compressed mode
    pub fn compressed_range(&self) -> u32 {
        (self.max_units - self.compressed_slider()).max(1)
    }

    /// Whether content of `total` lines with `visible` on screen uses
    /// direct mode (or needs no scrollbar at all).
    pub fn mode_for(&self, total: usize, visible: usize) -> ScrollMode {
        let total = total.max(1);
        let visible = visible.max(1);
        if total <= visible {
            ScrollMode::Hidden
        } else if visible as f64 / total as f64 >= self.min_fraction {
            ScrollMode::Direct
        } else {
            ScrollMode::Compressed
        }
    }

    /// Vertical scrollbar for `top_line`.
    pub fn to_scrollbar(&self, top_line: usize, total: usize, visible: usize) -> ScrollbarSpec {
        let total = total.max(1);
        let visible = visible.max(1);
        let page = visible as u32;
        let mode = self.mode_for(total, visible);
        let scrollable = total.saturating_sub(visible);
        let top = top_line.min(scrollable);

        let spec = match mode {
            ScrollMode::Hidden => ScrollbarSpec::hidden(1, page),
            ScrollMode::Direct => ScrollbarSpec {
                minimum: 0,
                maximum: total as u32,
                slider_size: visible as u32,
                value: top as u32,
                increment: 1,
                page_increment: page,
                mode,
            },
            ScrollMode::Compressed => {
                let range = self.compressed_range();
                let value = div_round(top as u64 * u64::from(range), scrollable as u64);
                ScrollbarSpec {
                    minimum: 0,
                    maximum: self.max_units,
                    slider_size: self.compressed_slider(),
                    value: (value as u32).min(range),
                    increment: 1,
                    page_increment: page,
                    mode,
                }
            }
        };
        tracing::trace!(top_line, total, visible, ?spec, "vertical scrollbar");
        spec
    }

    /// Top line for a scrollbar in state `spec`.
    ///
    /// Direct mode is recognized from the scrollbar values (maximum equals the
    /// line count and the slider equals the visible line count), so values
    /// read back from a scrollbar configured by `to_scrollbar` map exactly.
    pub fn to_top_line(&self, spec: &ScrollbarSpec, total: usize, visible: usize) -> usize {
        let total = total.max(1);
        let visible = visible.max(1);
        let scrollable = total.saturating_sub(visible);

        if spec.maximum <= spec.minimum || spec.slider_size == 0 || scrollable == 0 {
            return 0;
        }
        if spec.maximum as usize == total && spec.slider_size as usize == visible {
            return (spec.value as usize).min(scrollable);
        }

        let range = spec.maximum.saturating_sub(spec.slider_size);
        if range == 0 {
            return 0;
        }
        let value = spec.value.min(range);
        let top = div_round(u64::from(value) * scrollable as u64, u64::from(range));
        (top as usize).min(scrollable)
    }

    /// Horizontal scrollbar in pixels.
    pub fn to_horizontal(&self, offset_px: i32, viewport_px: i32, content_px: i32) -> ScrollbarSpec {
        let viewport = viewport_px.max(1) as u32;
        let content = content_px.max(0) as u32;
        if content <= viewport {
            return ScrollbarSpec::hidden(self.horizontal_increment, viewport);
        }
        ScrollbarSpec {
            minimum: 0,
            maximum: content,
            slider_size: viewport,
            value: 0,
            increment: self.horizontal_increment,
            page_increment: viewport,
            mode: ScrollMode::Direct,
        }
        .with_value(offset_px.max(0) as u32)
    }
}
