// ViewTestHarness - a view engine with fixed metrics for E2E testing

use srcview::input::keys::{Key, Modifiers};
use srcview::primitives::token::TokenStyle;
use srcview::state::{ContentKind, ViewState};
use srcview::view::layout::FontMetrics;
use std::io;
use std::ops::Range;
use std::path::Path;

/// Cell width used by every harness
pub const CELL_WIDTH: i32 = 8;

/// Line height used by every harness
pub const LINE_HEIGHT: i32 = 16;

/// Install a test subscriber once; honours RUST_LOG.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct ViewTestHarness {
    state: ViewState,
}

impl ViewTestHarness {
    /// Viewport of `columns` x `rows` cells (gutter included in the width)
    pub fn new(columns: i32, rows: i32) -> Self {
        init_tracing();
        let mut state = ViewState::default();
        state.set_metrics(FontMetrics::new(CELL_WIDTH as u32, LINE_HEIGHT as u32));
        state.resize(columns * CELL_WIDTH, rows * LINE_HEIGHT);
        Self { state }
    }

    pub fn with_text(columns: i32, rows: i32, text: &str, kind: ContentKind) -> Self {
        let mut harness = Self::new(columns, rows);
        harness.load_text(text, kind);
        harness
    }

    pub fn load_text(&mut self, text: &str, kind: ContentKind) {
        self.state.set_content(text.as_bytes().to_vec(), kind);
    }

    /// Load a file, choosing the tokenizer from its extension
    pub fn open_file(&mut self, path: &Path) -> io::Result<()> {
        let content = std::fs::read(path)?;
        self.state.set_content(content, ContentKind::from_path(path));
        Ok(())
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn gutter_width(&self) -> i32 {
        self.state
            .layout()
            .gutter_width(self.state.buffer().line_count())
    }

    pub fn send_key(&mut self, key: Key, modifiers: Modifiers) {
        self.state.handle_key(key, modifiers);
    }

    pub fn send_keys(&mut self, key: Key, modifiers: Modifiers, times: usize) {
        for _ in 0..times {
            self.send_key(key, modifiers);
        }
    }

    /// Viewport pixel inside text cell (`column`, `row`)
    fn cell_point(&self, column: i32, row: i32) -> (i32, i32) {
        (
            self.gutter_width() + column * CELL_WIDTH + 1,
            row * LINE_HEIGHT + 1,
        )
    }

    /// Press, drag and release over text cells in viewport rows
    pub fn drag(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (x0, y0) = self.cell_point(from.0, from.1);
        let (x1, y1) = self.cell_point(to.0, to.1);
        self.state.button_press(x0, y0);
        self.state.pointer_motion(x1, y1);
        self.state.button_release(x1, y1);
    }

    pub fn click(&mut self, column: i32, row: i32) {
        let (x, y) = self.cell_point(column, row);
        self.state.button_press(x, y);
        self.state.button_release(x, y);
    }

    pub fn caret(&self) -> usize {
        self.state.insertion_position()
    }

    pub fn assert_caret(&self, expected: usize) {
        assert_eq!(
            self.caret(),
            expected,
            "caret mismatch; selection is {:?}",
            self.state.selection()
        );
    }

    pub fn assert_selection(&self, expected: Option<Range<usize>>) {
        assert_eq!(self.state.selection(), expected);
    }

    pub fn selected_text(&self) -> String {
        String::from_utf8_lossy(self.state.selected_text()).into_owned()
    }

    /// One line per token: `start..end class style text`
    pub fn token_dump(&self) -> String {
        let mut out = String::new();
        for token in self.state.tokens() {
            let style = if token.style.contains(TokenStyle::BOLD) {
                "bold"
            } else if token.style.contains(TokenStyle::ITALIC) {
                "italic"
            } else {
                "-"
            };
            out.push_str(&format!(
                "{}..{} {} {} {}\n",
                token.start,
                token.end(),
                token.class.name(),
                style,
                self.state.buffer().text_lossy(token.range())
            ));
        }
        out
    }

    /// Line numbers of the rows the paint plan draws
    pub fn painted_lines(&self) -> Vec<usize> {
        self.state
            .paint_viewport()
            .lines
            .iter()
            .map(|l| l.line)
            .collect()
    }
}
