// End-to-end tests for caret movement and selection

use crate::common::harness::ViewTestHarness;
use srcview::input::keys::{Key, Modifiers};
use srcview::state::ContentKind;
use srcview::view::layout::CoordMode;

/// Horizontal steps across wide codepoints move one codepoint at a time
#[test]
fn test_caret_steps_over_cjk() {
    let mut harness = ViewTestHarness::with_text(40, 10, "a中文b", ContentKind::Plain);
    let mut carets = vec![harness.caret()];
    let mut xs = vec![harness
        .state()
        .position_to_pixel(harness.caret(), CoordMode::Absolute)
        .x];
    for _ in 0..5 {
        harness.send_key(Key::Right, Modifiers::empty());
        carets.push(harness.caret());
        xs.push(
            harness
                .state()
                .position_to_pixel(harness.caret(), CoordMode::Absolute)
                .x,
        );
    }
    // The last step is clamped at the end of the buffer
    assert_eq!(carets, vec![0, 1, 4, 7, 8, 8]);
    let gutter = harness.gutter_width();
    assert_eq!(
        xs,
        vec![gutter, gutter + 8, gutter + 24, gutter + 40, gutter + 48, gutter + 48]
    );

    harness.send_keys(Key::Left, Modifiers::SHIFT, 2);
    harness.assert_caret(4);
    harness.assert_selection(Some(4..8));
    assert_eq!(harness.selected_text(), "文b");
}

#[test]
fn test_drag_selects_across_lines() {
    let text = "first line\nsecond line\nthird";
    let mut harness = ViewTestHarness::with_text(40, 10, text, ContentKind::Plain);
    harness.drag((6, 0), (3, 2));
    assert!(!harness.state().is_dragging());
    harness.assert_selection(Some(6..26));
    harness.assert_caret(26);
    assert_eq!(harness.selected_text(), "line\nsecond line\nthi");

    // Dragging upward keeps the press point as the end of the selection
    harness.drag((4, 1), (1, 0));
    harness.assert_selection(Some(1..15));
    harness.assert_caret(1);

    // A click collapses it
    harness.click(0, 0);
    harness.assert_selection(None);
    harness.assert_caret(0);
}

#[test]
fn test_shift_vertical_extends_from_anchor() {
    let mut harness = ViewTestHarness::with_text(40, 10, "abc\ndef\nghi", ContentKind::Plain);
    harness.send_keys(Key::Right, Modifiers::empty(), 2);
    harness.send_key(Key::Down, Modifiers::SHIFT);
    harness.assert_selection(Some(2..6));
    harness.send_key(Key::Down, Modifiers::SHIFT);
    harness.assert_selection(Some(2..10));
    harness.send_key(Key::Up, Modifiers::SHIFT);
    harness.assert_selection(Some(2..6));
    // Returning to the anchor empties the selection; the next extend
    // starts from the caret
    harness.send_key(Key::Up, Modifiers::SHIFT);
    harness.assert_selection(None);
    harness.send_key(Key::Left, Modifiers::SHIFT);
    harness.assert_selection(Some(1..2));
}

#[test]
fn test_goal_column_survives_short_lines() {
    let text = "0123456789\nab\n0123456789";
    let mut harness = ViewTestHarness::with_text(40, 10, text, ContentKind::Plain);
    harness.send_key(Key::End, Modifiers::empty());
    harness.assert_caret(10);
    harness.send_key(Key::Down, Modifiers::empty());
    harness.assert_caret(13);
    harness.send_key(Key::Down, Modifiers::empty());
    harness.assert_caret(24);
}

#[test]
fn test_select_all_and_word() {
    let mut harness = ViewTestHarness::with_text(40, 10, "call foo_bar(1)", ContentKind::Source);
    harness.send_key(Key::Char('a'), Modifiers::CTRL);
    assert_eq!(harness.selected_text(), "call foo_bar(1)");
    harness.assert_caret(15);

    harness.state_mut().select_word_at(7);
    assert_eq!(harness.selected_text(), "foo_bar");
    harness.assert_caret(12);
}

#[test]
fn test_set_selection_reveals_caret() {
    let text: String = (0..100).map(|i| format!("row {i}\n")).collect();
    let mut harness = ViewTestHarness::with_text(40, 10, &text, ContentKind::Plain);
    let target = harness.state().buffer().line_index().line_start(50);
    harness.state_mut().set_selection(0, target);
    assert_eq!(harness.state().top_line(), 41);

    // select_range does not scroll
    harness.state_mut().set_top_line(0);
    harness.state_mut().select_range(0, target);
    assert_eq!(harness.state().top_line(), 0);
    harness.assert_caret(target);
}

#[test]
fn test_insertion_position_keeps_selection() {
    let mut harness = ViewTestHarness::with_text(40, 10, "hello world", ContentKind::Plain);
    harness.state_mut().select_range(0, 5);
    harness.state_mut().set_insertion_position(99);
    harness.assert_caret(11);
    harness.assert_selection(Some(0..5));
}
