//! Caret and selection state machine
//!
//! The model only stores byte offsets; callers hand it positions that are
//! already clamped and aligned to codepoint boundaries. Two states exist:
//!
//! - `Idle`: keyboard moves either collapse the selection onto the caret or,
//!   when extending, grow it from the anchor.
//! - `Dragging`: started by a primary-button press. Pointer motion selects
//!   `[min(anchor, hit), max(anchor, hit))` and release returns to `Idle`.

use std::ops::Range;

/// Current selection.
///
/// `start <= end` always holds; `active` is false when the range is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Fixed end of an extending selection
    pub anchor: usize,
    pub start: usize,
    pub end: usize,
    pub active: bool,
}

impl Selection {
    fn collapsed(at: usize) -> Self {
        Self {
            anchor: at,
            start: at,
            end: at,
            active: false,
        }
    }

    fn spanning(anchor: usize, to: usize) -> Self {
        let (start, end) = if to < anchor { (to, anchor) } else { (anchor, to) };
        Self {
            anchor,
            start,
            end,
            active: end > start,
        }
    }

    pub fn range(&self) -> Option<Range<usize>> {
        self.active.then_some(self.start..self.end)
    }
}

/// Pointer drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    caret: usize,
    selection: Selection,
    drag: DragState,
    /// Remembered x (absolute pixels) for consecutive vertical moves
    goal_x: Option<i64>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn goal_x(&self) -> Option<i64> {
        self.goal_x
    }

    pub fn set_goal_x(&mut self, x: i64) {
        self.goal_x = Some(x);
    }

    pub fn reset_goal_x(&mut self) {
        self.goal_x = None;
    }

    /// Forget everything: caret and selection back to 0
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move the caret to `pos`, either collapsing the selection or extending
    /// it from the anchor.
    pub fn move_to(&mut self, pos: usize, extend: bool) {
        if !extend {
            self.caret = pos;
            self.selection = Selection::collapsed(pos);
            return;
        }
        let anchor = if self.selection.active {
            self.selection.anchor
        } else {
            self.caret
        };
        self.caret = pos;
        self.selection = Selection::spanning(anchor, pos);
    }

    /// Primary button pressed at `hit`.
    pub fn press(&mut self, hit: usize) {
        self.caret = hit;
        self.selection = Selection::collapsed(hit);
        self.drag = DragState::Dragging { anchor: hit };
        self.goal_x = None;
    }

    /// Pointer moved to `hit`; ignored unless dragging. Returns whether the
    /// state changed.
    pub fn motion(&mut self, hit: usize) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };
        self.caret = hit;
        self.selection = Selection::spanning(anchor, hit);
        true
    }

    /// Primary button released. The caret follows the pointer when the
    /// release position is known; the selection is kept as dragged.
    pub fn release(&mut self, hit: Option<usize>) {
        if let Some(hit) = hit {
            self.caret = hit;
        }
        self.drag = DragState::Idle;
    }

    /// Select `[start, end)` with the caret at `end`. The anchor is kept
    /// unless `set_anchor` is true.
    pub fn select(&mut self, start: usize, end: usize, set_anchor: bool) {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let anchor = if set_anchor { start } else { self.selection.anchor };
        self.selection = Selection {
            anchor,
            start,
            end,
            active: end > start,
        };
        self.caret = end;
    }

    /// Collapse the selection onto the caret
    pub fn clear(&mut self) {
        self.selection = Selection::collapsed(self.caret);
    }

    /// Place the caret without touching the selection
    pub fn set_caret(&mut self, pos: usize) {
        self.caret = pos;
    }
}
