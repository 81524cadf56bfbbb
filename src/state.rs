use crate::config::{Config, MetricsConfig, ScrollConfig};
use crate::input::keys::Modifiers;
use crate::model::buffer::Buffer;
use crate::model::selection::SelectionModel;
use crate::overlay::TokenList;
use crate::primitives::disasm_tokenizer::tokenize_disassembly;
use crate::primitives::source_tokenizer::tokenize_source;
use crate::primitives::token::Token;
use crate::primitives::{utf8, word_navigation};
use crate::view::layout::{
    to_px, CoordMode, FontMetrics, GlyphMetrics, LayoutEngine, PixelPoint, ScrollOffsets,
};
use crate::view::paint::{self, PaintInput, PaintPlan, Rect};
use crate::view::palette::Palette;
use crate::view::scroll::{ScrollMapper, ScrollMode, ScrollbarSpec};
use crate::view::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// How content is tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "runtime", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// C/C++ source
    #[default]
    Source,
    /// objdump/gdb-style disassembly listing
    Disassembly,
    /// No coloring
    Plain,
}

impl ContentKind {
    /// Guess the kind from a file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("s" | "asm" | "dis") => ContentKind::Disassembly,
            Some("txt" | "log") => ContentKind::Plain,
            _ => ContentKind::Source,
        }
    }

    pub fn tokenize(self, text: &[u8]) -> Vec<Token> {
        match self {
            ContentKind::Source => tokenize_source(text),
            ContentKind::Disassembly => tokenize_disassembly(text),
            ContentKind::Plain => Vec::new(),
        }
    }
}

/// Step direction for caret, page and wheel moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn sign(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// The complete viewer state: content, tokens, geometry, scroll position
/// and caret/selection. All operations run to completion synchronously.
#[derive(Debug, Clone)]
pub struct ViewState {
    buffer: Buffer,
    kind: ContentKind,
    tokens: TokenList,
    layout: LayoutEngine,
    palette: Palette,
    scroll_config: ScrollConfig,
    metrics_config: MetricsConfig,
    mapper: ScrollMapper,
    viewport: Viewport,
    selection: SelectionModel,

    /// Widest line plus gutter, recomputed when content or metrics change
    content_width: i32,

    /// Last vertical scrollbar regime, for logging regime switches
    scroll_mode: ScrollMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ViewState {
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            buffer: Buffer::empty(),
            kind: ContentKind::default(),
            tokens: TokenList::new(),
            layout: LayoutEngine::new(FontMetrics::fallback(&config.metrics), config.gutter),
            palette: Palette::with_overrides(&config.colors),
            scroll_config: config.scroll.clone(),
            metrics_config: config.metrics,
            mapper: ScrollMapper::new(&config.scroll),
            viewport: Viewport::default(),
            selection: SelectionModel::new(),
            content_width: 0,
            scroll_mode: ScrollMode::Hidden,
        };
        state.relayout();
        state
    }

    // ----- content -----

    /// Replace the content. Tokens are recomputed for `kind`, the caret and
    /// selection return to the start and the view scrolls to the top.
    pub fn set_content(&mut self, content: Vec<u8>, kind: ContentKind) {
        self.buffer.replace_content(content);
        self.kind = kind;
        let tokens = kind.tokenize(self.buffer.bytes());
        self.tokens = TokenList::from_tokens(&tokens, self.buffer.len());
        self.selection.reset();
        self.relayout();
        self.viewport.set_top_line(0, 0);
        self.viewport.set_h_offset(0, 0);

        tracing::debug!(
            ?kind,
            bytes = self.buffer.len(),
            lines = self.buffer.line_count(),
            tokens = self.tokens.len(),
            "content replaced"
        );
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn text(&self) -> &[u8] {
        self.buffer.bytes()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Offset one past the last byte
    pub fn last_position(&self) -> usize {
        self.buffer.len()
    }

    // ----- tokens -----

    /// Replace all tokens; overlaps among `incoming` resolve in order.
    pub fn set_tokens(&mut self, incoming: &[Token]) {
        self.tokens.replace(incoming, self.buffer.len());
    }

    /// Overlay `incoming` on the current tokens.
    pub fn merge_tokens(&mut self, incoming: &[Token]) {
        self.tokens.merge(incoming, self.buffer.len());
    }

    pub fn tokens(&self) -> &[Token] {
        self.tokens.tokens()
    }

    // ----- metrics and size -----

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) {
        self.layout.metrics = metrics;
        self.relayout();
    }

    /// Take the cell size from a glyph provider, with configured fallbacks
    pub fn measure_font(&mut self, glyphs: &dyn GlyphMetrics) {
        let metrics = FontMetrics::measure(glyphs, &self.metrics_config);
        tracing::debug!(
            cell_width = metrics.cell_width,
            line_height = metrics.line_height,
            "font measured"
        );
        self.set_metrics(metrics);
    }

    pub fn set_gutter_enabled(&mut self, enabled: bool) {
        self.layout.gutter.enabled = enabled;
        self.relayout();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// New viewport size in pixels
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport.resize(width, height);
        self.clamp_scroll();
    }

    pub fn viewport_size(&self) -> (i32, i32) {
        (self.viewport.width, self.viewport.height)
    }

    pub fn visible_lines(&self) -> usize {
        self.layout.visible_lines(self.viewport.height)
    }

    pub fn visible_columns(&self) -> usize {
        self.layout
            .visible_columns(self.viewport.width, self.buffer.line_count())
    }

    /// Widest line plus gutter, and all lines' height
    pub fn content_size(&self) -> (i32, i32) {
        let height = self.layout.line_top(self.buffer.line_count().max(1));
        (self.content_width, height)
    }

    fn relayout(&mut self) {
        self.content_width = self.layout.content_size(&self.buffer).0;
        self.clamp_scroll();
    }

    fn max_top(&self) -> usize {
        self.buffer.line_count().saturating_sub(self.visible_lines())
    }

    fn max_h_offset(&self) -> i32 {
        (self.content_width - self.viewport.width).max(0)
    }

    fn clamp_scroll(&mut self) {
        let (top, h) = (self.viewport.top_line(), self.viewport.h_offset_px());
        self.viewport.set_top_line(top, self.max_top());
        self.viewport.set_h_offset(h, self.max_h_offset());

        let mode = self
            .mapper
            .mode_for(self.buffer.line_count(), self.visible_lines());
        if mode != self.scroll_mode {
            tracing::debug!(from = ?self.scroll_mode, to = ?mode, "vertical scroll mode changed");
            self.scroll_mode = mode;
        }
    }

    // ----- coordinate mapping -----

    pub fn scroll_offsets(&self) -> ScrollOffsets {
        self.viewport.offsets()
    }

    pub fn position_to_pixel(&self, pos: usize, mode: CoordMode) -> PixelPoint {
        self.layout
            .pos_to_xy(&self.buffer, pos, mode, self.viewport.offsets())
    }

    pub fn pixel_to_position(&self, x: i32, y: i32, mode: CoordMode) -> usize {
        self.layout
            .xy_to_pos(&self.buffer, x, y, mode, self.viewport.offsets())
    }

    // ----- scrolling -----

    pub fn vertical_scrollbar(&self) -> ScrollbarSpec {
        self.mapper.to_scrollbar(
            self.viewport.top_line(),
            self.buffer.line_count(),
            self.visible_lines(),
        )
    }

    /// Scrollbar moved to `value`
    pub fn set_vertical_scroll_value(&mut self, value: u32) {
        let spec = ScrollbarSpec {
            value,
            ..self.vertical_scrollbar()
        };
        let top = self
            .mapper
            .to_top_line(&spec, self.buffer.line_count(), self.visible_lines());
        self.set_top_line(top);
    }

    pub fn horizontal_scrollbar(&self) -> ScrollbarSpec {
        self.mapper.to_horizontal(
            self.viewport.h_offset_px(),
            self.viewport.width,
            self.content_width,
        )
    }

    pub fn set_horizontal_offset(&mut self, px: i32) {
        self.viewport.set_h_offset(px, self.max_h_offset());
    }

    pub fn horizontal_offset(&self) -> i32 {
        self.viewport.h_offset_px()
    }

    pub fn top_line(&self) -> usize {
        self.viewport.top_line()
    }

    pub fn set_top_line(&mut self, line: usize) {
        self.viewport.set_top_line(line, self.max_top());
    }

    /// Scroll so the line holding `pos` is on top
    pub fn set_top_character(&mut self, pos: usize) {
        let pos = self.buffer.clamp_position(pos);
        let line = self.buffer.line_index().line_of(pos);
        self.set_top_line(line);
    }

    /// Offset of the first character on the top line
    pub fn top_character(&self) -> usize {
        self.buffer.line_index().line_start(self.viewport.top_line())
    }

    /// Scroll as little as possible to bring `pos` into view.
    pub fn show_position(&mut self, pos: usize) {
        let pos = self.buffer.clamp_position(pos);
        let line = self.buffer.line_index().line_of(pos);
        let visible = self.visible_lines();
        let max_top = self.max_top();
        self.viewport.ensure_line_visible(line, visible, max_top);

        let x = self.position_to_pixel(pos, CoordMode::Absolute).x;
        let gutter = self.layout.gutter_width(self.buffer.line_count());
        let margin = self.scroll_config.horizontal_margin_px as i32;
        let max_h = self.max_h_offset();
        self.viewport.ensure_x_visible(x, gutter, margin, max_h);
    }

    pub fn scroll_lines(&mut self, delta: isize) {
        let max_top = self.max_top();
        self.viewport.scroll_lines(delta, max_top);
    }

    /// Scroll horizontally by `dx` pixels; nothing happens when the content fits
    pub fn scroll_horizontal(&mut self, dx: i32) {
        if self.content_width <= self.viewport.width {
            return;
        }
        let h = self.viewport.h_offset_px().saturating_add(dx);
        self.set_horizontal_offset(h);
    }

    /// One wheel notch. Ctrl scrolls faster, Shift scrolls horizontally.
    pub fn wheel(&mut self, direction: Direction, modifiers: Modifiers) {
        let lines = if modifiers.contains(Modifiers::CTRL) {
            self.scroll_config.wheel_lines_accelerated
        } else {
            self.scroll_config.wheel_lines
        } as usize;

        if modifiers.contains(Modifiers::SHIFT) {
            let dx = to_px(lines).saturating_mul(self.layout.line_height());
            self.scroll_horizontal(match direction {
                Direction::Backward => -dx,
                Direction::Forward => dx,
            });
        } else {
            self.scroll_lines(lines as isize * direction.sign());
        }
    }

    /// Scroll one page without moving the caret
    pub fn scroll_page(&mut self, direction: Direction) {
        self.scroll_lines(self.visible_lines() as isize * direction.sign());
    }

    /// New (top line, horizontal offset) if either changed since the last call
    pub fn take_viewport_change(&mut self) -> Option<ScrollOffsets> {
        self.viewport.take_change()
    }

    // ----- caret and selection -----

    pub fn insertion_position(&self) -> usize {
        self.selection.caret()
    }

    /// Place the caret without touching the selection
    pub fn set_insertion_position(&mut self, pos: usize) {
        let pos = self.buffer.clamp_position(pos);
        self.selection.set_caret(pos);
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.selection().range()
    }

    pub fn selection_model(&self) -> &SelectionModel {
        &self.selection
    }

    /// Bytes of the current selection (empty when nothing is selected)
    pub fn selected_text(&self) -> &[u8] {
        match self.selection() {
            Some(range) => self.buffer.slice(range),
            None => &[],
        }
    }

    /// Clamp both ends and widen the range outward to codepoint boundaries
    fn align_range(&self, start: usize, end: usize) -> (usize, usize) {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let text = self.buffer.bytes();
        let len = text.len();
        (
            utf8::align_backward(text, start.min(len)),
            utf8::align_forward(text, end.min(len)),
        )
    }

    /// Select `[start, end)` with the caret at the end. The anchor used by
    /// extending moves is left alone.
    pub fn select_range(&mut self, start: usize, end: usize) {
        let (start, end) = self.align_range(start, end);
        self.selection.select(start, end, false);
    }

    /// Like `select_range`, but also anchors at `start` and reveals the caret
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let (start, end) = self.align_range(start, end);
        self.selection.select(start, end, true);
        self.show_position(end);
    }

    pub fn select_all(&mut self) {
        self.selection.select(0, self.buffer.len(), true);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn word_bounds_at(&self, pos: usize) -> Range<usize> {
        word_navigation::word_bounds_at(self.buffer.bytes(), pos)
    }

    /// Select the word around `pos`; nothing is selected between words
    pub fn select_word_at(&mut self, pos: usize) {
        let bounds = self.word_bounds_at(pos);
        self.set_selection(bounds.start, bounds.end);
    }

    /// Move the caret to `pos`, extending or collapsing the selection, and
    /// reveal it.
    fn move_caret(&mut self, pos: usize, extend: bool) {
        self.selection.move_to(pos, extend);
        self.show_position(pos);
    }

    /// One codepoint left or right
    pub fn move_horizontal(&mut self, direction: Direction, extend: bool) {
        let caret = self.selection.caret();
        let pos = match direction {
            Direction::Backward => self.buffer.prev_position(caret),
            Direction::Forward => self.buffer.next_position(caret),
        };
        self.selection.reset_goal_x();
        tracing::trace!(from = caret, to = pos, extend, "move horizontal");
        self.move_caret(pos, extend);
    }

    /// `lines` up (negative) or down, keeping the x remembered since the
    /// last horizontal move.
    pub fn move_vertical(&mut self, lines: isize, extend: bool) {
        let caret = self.selection.caret();
        let at = self.position_to_pixel(caret, CoordMode::Absolute);
        let goal_x = match self.selection.goal_x() {
            Some(x) => x,
            None => {
                self.selection.set_goal_x(i64::from(at.x));
                i64::from(at.x)
            }
        };

        let lh = self.layout.line_height();
        let last_y = self.layout.line_top(self.buffer.line_count().saturating_sub(1));
        let dy = to_px(lines.unsigned_abs()).saturating_mul(lh);
        let dy = if lines < 0 { -dy } else { dy };
        let y = at.y.saturating_add(dy).clamp(0, last_y);
        let x = goal_x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let pos = self
            .layout
            .xy_to_pos(&self.buffer, x, y, CoordMode::Absolute, ScrollOffsets::default());

        tracing::trace!(from = caret, to = pos, lines, extend, "move vertical");
        self.move_caret(pos, extend);
    }

    /// Line start/end, or buffer start/end with `whole_buffer`
    pub fn move_home_end(&mut self, to_end: bool, whole_buffer: bool, extend: bool) {
        let pos = if whole_buffer {
            if to_end {
                self.buffer.len()
            } else {
                0
            }
        } else {
            let index = self.buffer.line_index();
            let range = index.line_range(index.line_of(self.selection.caret()));
            if to_end {
                range.end
            } else {
                range.start
            }
        };
        self.selection.reset_goal_x();
        self.move_caret(pos, extend);
    }

    /// Move the caret one page of visible lines
    pub fn page_caret(&mut self, direction: Direction, extend: bool) {
        let lines = self.visible_lines() as isize * direction.sign();
        self.move_vertical(lines, extend);
    }

    // ----- pointer -----

    fn hit(&self, x: i32, y: i32) -> usize {
        self.pixel_to_position(x, y, CoordMode::Viewport)
    }

    /// Primary button pressed at viewport pixel `(x, y)`
    pub fn button_press(&mut self, x: i32, y: i32) {
        let hit = self.hit(x, y);
        self.selection.press(hit);
        tracing::trace!(x, y, hit, "button press");
    }

    /// Pointer moved; extends the selection while dragging. Returns whether
    /// anything changed.
    pub fn pointer_motion(&mut self, x: i32, y: i32) -> bool {
        if !self.selection.is_dragging() {
            return false;
        }
        let hit = self.hit(x, y);
        let changed = self.selection.motion(hit);
        self.show_position(hit);
        changed
    }

    /// Primary button released: the caret follows the pointer and the drag
    /// selection is kept.
    pub fn button_release(&mut self, x: i32, y: i32) {
        if !self.selection.is_dragging() {
            return;
        }
        let hit = self.hit(x, y);
        self.selection.motion(hit);
        self.selection.release(Some(hit));
        tracing::trace!(x, y, hit, selection = ?self.selection(), "button release");
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    // ----- painting -----

    /// What to draw inside `clip` (viewport pixels)
    pub fn paint_plan(&self, clip: Rect) -> PaintPlan {
        let input = PaintInput {
            buffer: &self.buffer,
            tokens: &self.tokens,
            layout: &self.layout,
            palette: &self.palette,
            scroll: self.viewport.offsets(),
            width: self.viewport.width,
            height: self.viewport.height,
            selection: self.selection(),
            caret: self.selection.caret(),
        };
        paint::paint_plan(&input, clip)
    }

    /// Paint plan for the whole viewport
    pub fn paint_viewport(&self) -> PaintPlan {
        self.paint_plan(Rect::new(0, 0, self.viewport.width, self.viewport.height))
    }
}
