use crate::view::layout::ScrollOffsets;

/// The viewport - what portion of the content is visible
///
/// Sizes are in pixels. The viewport does not know the content; callers
/// pass the scroll limits (`max_top`, `max_h_offset`) computed from the
/// current buffer and layout.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Visible area size, gutter included
    pub width: i32,
    pub height: i32,

    /// First fully visible line
    top_line: usize,

    /// Horizontal scroll offset in pixels
    h_offset_px: i32,

    /// Offsets as of the last `take_change`
    reported: ScrollOffsets,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            top_line: 0,
            h_offset_px: 0,
            reported: ScrollOffsets::default(),
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        tracing::trace!(width = self.width, height = self.height, "viewport resized");
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn h_offset_px(&self) -> i32 {
        self.h_offset_px
    }

    pub fn offsets(&self) -> ScrollOffsets {
        ScrollOffsets {
            top_line: self.top_line,
            h_offset_px: self.h_offset_px,
        }
    }

    /// Scroll so `line` is on top, clamped to `[0, max_top]`.
    pub fn set_top_line(&mut self, line: usize, max_top: usize) {
        self.top_line = line.min(max_top);
    }

    /// Scroll by `delta` lines, clamped to `[0, max_top]`.
    pub fn scroll_lines(&mut self, delta: isize, max_top: usize) {
        let target = self.top_line.saturating_add_signed(delta);
        self.set_top_line(target, max_top);
    }

    /// Set the horizontal offset, clamped to `[0, max_h_offset]`.
    pub fn set_h_offset(&mut self, px: i32, max_h_offset: i32) {
        self.h_offset_px = px.clamp(0, max_h_offset.max(0));
    }

    /// Minimal vertical scroll that brings `line` into view.
    pub fn ensure_line_visible(&mut self, line: usize, visible: usize, max_top: usize) {
        let visible = visible.max(1);
        let mut top = self.top_line;
        if line < top {
            top = line;
        } else if line >= top + visible {
            top = line + 1 - visible;
        }
        self.set_top_line(top, max_top);
    }

    /// Horizontal scroll that brings absolute pixel `x` into view.
    ///
    /// Text occupies viewport columns `[gutter, width)`. A caret left of
    /// that is scrolled to the gutter edge; a caret past the right edge is
    /// scrolled so it ends up `margin` pixels inside.
    pub fn ensure_x_visible(&mut self, x: i32, gutter: i32, margin: i32, max_h_offset: i32) {
        let mut h = self.h_offset_px;
        if x - h < gutter {
            h = x - gutter;
        } else if x - h >= self.width {
            h = x - (self.width - margin);
        }
        self.set_h_offset(h.max(0), max_h_offset);
    }

    /// New offsets if they changed since the previous call.
    pub fn take_change(&mut self) -> Option<ScrollOffsets> {
        let now = self.offsets();
        if now == self.reported {
            return None;
        }
        self.reported = now;
        tracing::trace!(top_line = now.top_line, h_offset_px = now.h_offset_px, "viewport changed");
        Some(now)
    }
}
