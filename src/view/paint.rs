//! Paint plan: what to draw for the visible part of the content
//!
//! The plan is a plain data description in viewport pixels. A renderer
//! draws, per line, the selection rectangle, then the text runs, then the
//! gutter (which covers horizontally scrolled text), and finally the caret.

use crate::model::buffer::Buffer;
use crate::overlay::TokenList;
use crate::primitives::token::{ColorClass, TokenStyle};
use crate::view::layout::{columns_between, CoordMode, LayoutEngine, ScrollOffsets};
use crate::view::palette::{Palette, Rgb};
use serde::Serialize;
use std::ops::Range;

/// Axis-aligned rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Consecutive bytes drawn with one color and style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub range: Range<usize>,
    pub x: i32,
    pub width: i32,
    pub class: ColorClass,
    pub style: TokenStyle,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintLine {
    pub line: usize,
    /// Top of the line in viewport pixels
    pub y: i32,
    /// 1-based line number, when the gutter is shown
    pub number_label: Option<String>,
    pub gutter: Option<Rect>,
    pub selection: Option<Rect>,
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PaintPlan {
    pub lines: Vec<PaintLine>,
    pub caret: Option<Rect>,
}

/// Everything the plan is computed from
pub struct PaintInput<'a> {
    pub buffer: &'a Buffer,
    pub tokens: &'a TokenList,
    pub layout: &'a LayoutEngine,
    pub palette: &'a Palette,
    pub scroll: ScrollOffsets,
    /// Viewport size in pixels
    pub width: i32,
    pub height: i32,
    pub selection: Option<Range<usize>>,
    pub caret: usize,
}

/// Build the paint plan for the part of the viewport inside `clip`.
pub fn paint_plan(input: &PaintInput<'_>, clip: Rect) -> PaintPlan {
    let layout = input.layout;
    let lh = layout.line_height();
    let line_count = input.buffer.line_count();
    let gutter_width = layout.gutter_width(line_count);

    let first = input.scroll.top_line;
    // One extra line for a partially visible bottom row
    let last = first
        .saturating_add(layout.visible_lines(input.height) + 1)
        .min(line_count);

    let mut lines = Vec::new();
    for line in first..last {
        let y = layout.line_top(line - first);
        let row = Rect::new(0, y, input.width, lh);
        if !row.intersects(&clip) {
            continue;
        }

        let range = input.buffer.line_index().line_range(line);
        let (number_label, gutter) = if gutter_width > 0 {
            (
                Some((line + 1).to_string()),
                Some(Rect::new(0, y, gutter_width, lh)),
            )
        } else {
            (None, None)
        };

        lines.push(PaintLine {
            line,
            y,
            number_label,
            gutter,
            selection: selection_rect(input, line, &range, y),
            runs: line_runs(input, &range, &clip),
        });
    }

    let caret = caret_rect(input).filter(|rect| rect.intersects(&clip));
    tracing::trace!(lines = lines.len(), first, caret = ?caret, "paint plan");
    PaintPlan { lines, caret }
}

fn x_of(input: &PaintInput<'_>, pos: usize) -> i32 {
    input
        .layout
        .pos_to_xy(input.buffer, pos, CoordMode::Viewport, input.scroll)
        .x
}

/// Text runs of one line, split at token boundaries. Gaps between tokens
/// are drawn in the default class.
///
/// The line is measured once, left to right: each run starts where the
/// previous one ended.
fn line_runs(input: &PaintInput<'_>, range: &Range<usize>, clip: &Rect) -> Vec<TextRun> {
    let text = input.buffer.bytes();
    let layout = input.layout;
    let mut x = x_of(input, range.start);
    let mut runs = Vec::new();
    let mut push = |start: usize, end: usize, class: ColorClass, style: TokenStyle| {
        if end <= start {
            return;
        }
        let run_x = x;
        let width = layout.columns_px(columns_between(text, start, end));
        x = x.saturating_add(width);
        if x <= clip.x || run_x >= clip.right() {
            return;
        }
        runs.push(TextRun {
            range: start..end,
            x: run_x,
            width,
            class,
            style,
            color: input.palette.color(class),
        });
    };

    let mut pos = range.start;
    for token in input.tokens.in_range(range.clone()) {
        let start = token.start.max(range.start);
        let end = token.end().min(range.end);
        push(pos, start, ColorClass::Default, TokenStyle::empty());
        push(start, end, token.class, token.style);
        pos = end;
    }
    push(pos, range.end, ColorClass::Default, TokenStyle::empty());
    runs
}

/// Part of the selection on `line`. A selection continuing past the line
/// end covers one extra cell for the newline.
fn selection_rect(
    input: &PaintInput<'_>,
    line: usize,
    range: &Range<usize>,
    y: i32,
) -> Option<Rect> {
    let sel = input.selection.as_ref()?;
    let has_newline = line + 1 < input.buffer.line_count();
    if sel.end <= range.start || sel.start > range.end {
        return None;
    }
    let start = sel.start.max(range.start);
    let end = sel.end.min(range.end);
    let crosses_newline = has_newline && sel.end > range.end;
    if end <= start && !crosses_newline {
        return None;
    }

    let x0 = x_of(input, start);
    let mut x1 = x_of(input, end);
    if crosses_newline {
        x1 += input.layout.cell_width();
    }
    Some(Rect::new(x0, y, x1 - x0, input.layout.line_height()))
}

/// Caret bar: 2 px wide, inset 2 px from the line's top and bottom
fn caret_rect(input: &PaintInput<'_>) -> Option<Rect> {
    let lh = input.layout.line_height();
    let p = input
        .layout
        .pos_to_xy(input.buffer, input.caret, CoordMode::Viewport, input.scroll);
    if p.y + lh <= 0 || p.y >= input.height {
        return None;
    }
    Some(Rect::new(p.x, p.y + 2, 2, (lh - 4).max(1)))
}
