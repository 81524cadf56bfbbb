//! Key-bound viewer actions
//!
//! The viewer is read-only, so every action either moves the caret (with or
//! without extending the selection) or scrolls.

use crate::input::keys::{Key, Modifiers};
use crate::state::{Direction, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    MoveLineStart { extend: bool },
    MoveLineEnd { extend: bool },
    MoveBufferStart { extend: bool },
    MoveBufferEnd { extend: bool },
    /// Caret up one page of visible lines
    PageUp { extend: bool },
    PageDown { extend: bool },
    /// Scroll one page back without moving the caret
    ScrollPageUp,
    ScrollPageDown,
    SelectAll,
}

impl Action {
    /// Default binding for a key press. Shift extends the selection; Ctrl
    /// turns Home/End into buffer start/end and PageUp/PageDown into
    /// caret-less page scrolls.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        let extend = modifiers.shift();
        let ctrl = modifiers.ctrl();
        let action = match key {
            Key::Left => Action::MoveLeft { extend },
            Key::Right => Action::MoveRight { extend },
            Key::Up => Action::MoveUp { extend },
            Key::Down => Action::MoveDown { extend },
            Key::Home if ctrl => Action::MoveBufferStart { extend },
            Key::End if ctrl => Action::MoveBufferEnd { extend },
            Key::Home => Action::MoveLineStart { extend },
            Key::End => Action::MoveLineEnd { extend },
            Key::PageUp if ctrl => Action::ScrollPageUp,
            Key::PageDown if ctrl => Action::ScrollPageDown,
            Key::PageUp => Action::PageUp { extend },
            Key::PageDown => Action::PageDown { extend },
            Key::Char('a') | Key::Char('A') if ctrl => Action::SelectAll,
            Key::Char(_) => return None,
        };
        Some(action)
    }
}

impl ViewState {
    /// Execute a key-bound action
    pub fn apply_action(&mut self, action: Action) {
        tracing::trace!(?action, "apply action");
        match action {
            Action::MoveLeft { extend } => self.move_horizontal(Direction::Backward, extend),
            Action::MoveRight { extend } => self.move_horizontal(Direction::Forward, extend),
            Action::MoveUp { extend } => self.move_vertical(-1, extend),
            Action::MoveDown { extend } => self.move_vertical(1, extend),
            Action::MoveLineStart { extend } => self.move_home_end(false, false, extend),
            Action::MoveLineEnd { extend } => self.move_home_end(true, false, extend),
            Action::MoveBufferStart { extend } => self.move_home_end(false, true, extend),
            Action::MoveBufferEnd { extend } => self.move_home_end(true, true, extend),
            Action::PageUp { extend } => self.page_caret(Direction::Backward, extend),
            Action::PageDown { extend } => self.page_caret(Direction::Forward, extend),
            Action::ScrollPageUp => self.scroll_page(Direction::Backward),
            Action::ScrollPageDown => self.scroll_page(Direction::Forward),
            Action::SelectAll => self.select_all(),
        }
    }

    /// Map a key press to an action and run it. Returns whether the key was
    /// bound.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        match Action::from_key(key, modifiers) {
            Some(action) => {
                self.apply_action(action);
                true
            }
            None => false,
        }
    }
}
