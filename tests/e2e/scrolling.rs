// End-to-end tests for scrolling and scrollbar mapping

use crate::common::harness::ViewTestHarness;
use srcview::input::keys::{Key, Modifiers};
use srcview::state::{ContentKind, Direction};
use srcview::view::scroll::ScrollMode;

fn numbered(n: usize) -> String {
    (0..n).map(|i| format!("line {i}\n")).collect()
}

#[test]
fn test_caret_down_scrolls_minimally() {
    let mut harness = ViewTestHarness::with_text(40, 10, &numbered(100), ContentKind::Plain);
    harness.send_keys(Key::Down, Modifiers::empty(), 9);
    assert_eq!(harness.state().top_line(), 0);
    harness.send_keys(Key::Down, Modifiers::empty(), 16);
    assert_eq!(harness.state().top_line(), 16);
    assert_eq!(harness.painted_lines().first(), Some(&16));

    harness.send_keys(Key::Up, Modifiers::empty(), 12);
    assert_eq!(harness.state().top_line(), 13);
}

#[test]
fn test_page_keys() {
    let mut harness = ViewTestHarness::with_text(40, 10, &numbered(100), ContentKind::Plain);

    // Ctrl+PageDown scrolls without moving the caret
    harness.send_key(Key::PageDown, Modifiers::CTRL);
    assert_eq!(harness.state().top_line(), 10);
    harness.assert_caret(0);

    // PageDown moves the caret by the visible line count and reveals it
    harness.state_mut().set_top_line(0);
    harness.send_key(Key::PageDown, Modifiers::empty());
    let line_ten = harness.state().buffer().line_index().line_start(10);
    harness.assert_caret(line_ten);
    assert_eq!(harness.state().top_line(), 1);

    harness.send_key(Key::PageUp, Modifiers::SHIFT);
    harness.assert_caret(0);
    assert_eq!(harness.state().selection(), Some(0..line_ten));
}

#[test]
fn test_compressed_scrollbar_for_long_listing() {
    let mut harness = ViewTestHarness::with_text(40, 20, &numbered(10_000), ContentKind::Plain);
    let spec = harness.state().vertical_scrollbar();
    assert_eq!(spec.mode, ScrollMode::Compressed);
    assert_eq!((spec.maximum, spec.slider_size), (2000, 100));

    harness.state_mut().set_vertical_scroll_value(1900);
    let last_top = 10_001 - 20;
    assert_eq!(harness.state().top_line(), last_top);
    assert_eq!(harness.state().vertical_scrollbar().value, 1900);

    // Dragging the slider back and forth never drifts
    for value in [0u32, 1, 17, 950, 1333, 1899] {
        harness.state_mut().set_vertical_scroll_value(value);
        let top = harness.state().top_line();
        assert_eq!(harness.state().vertical_scrollbar().value, value);
        harness.state_mut().set_vertical_scroll_value(value);
        assert_eq!(harness.state().top_line(), top);
    }
}

#[test]
fn test_direct_scrollbar_for_short_file() {
    let mut harness = ViewTestHarness::with_text(40, 10, &numbered(50), ContentKind::Plain);
    let spec = harness.state().vertical_scrollbar();
    assert_eq!(spec.mode, ScrollMode::Direct);
    assert_eq!((spec.maximum, spec.slider_size, spec.page_increment), (51, 10, 10));

    harness.state_mut().set_vertical_scroll_value(7);
    assert_eq!(harness.state().top_line(), 7);

    let mut fits = ViewTestHarness::with_text(40, 10, &numbered(3), ContentKind::Plain);
    assert_eq!(fits.state().vertical_scrollbar().mode, ScrollMode::Hidden);
    fits.state_mut().set_vertical_scroll_value(5);
    assert_eq!(fits.state().top_line(), 0);
}

#[test]
fn test_horizontal_reveal_keeps_margin() {
    let long = "x".repeat(100);
    let text = format!("{long}\nshort");
    let mut harness = ViewTestHarness::with_text(40, 10, &text, ContentKind::Plain);
    let gutter = harness.gutter_width();

    harness.state_mut().set_insertion_position(50);
    harness.state_mut().show_position(50);
    // Caret x = gutter + 400; it ends up 40 px inside the right edge
    assert_eq!(harness.state().horizontal_offset(), gutter + 400 - (320 - 40));

    harness.send_key(Key::Home, Modifiers::empty());
    assert_eq!(harness.state().horizontal_offset(), 0);

    // End of the long line: clamped to the scrollbar maximum
    harness.send_key(Key::End, Modifiers::empty());
    let spec = harness.state().horizontal_scrollbar();
    assert_eq!(harness.state().horizontal_offset() as u32, spec.maximum - spec.slider_size);
    assert_eq!(spec.value, spec.maximum - spec.slider_size);
}

#[test]
fn test_wheel_and_viewport_notifications() {
    let mut harness = ViewTestHarness::with_text(40, 10, &numbered(100), ContentKind::Plain);
    assert_eq!(harness.state_mut().take_viewport_change(), None);

    harness.state_mut().wheel(Direction::Forward, Modifiers::empty());
    harness.state_mut().wheel(Direction::Forward, Modifiers::CTRL);
    assert_eq!(harness.state().top_line(), 13);
    let change = harness.state_mut().take_viewport_change();
    assert_eq!(change.map(|c| c.top_line), Some(13));
    assert_eq!(harness.state_mut().take_viewport_change(), None);

    // Nothing to scroll horizontally: no change reported
    harness.state_mut().wheel(Direction::Forward, Modifiers::SHIFT);
    assert_eq!(harness.state_mut().take_viewport_change(), None);
}

#[test]
fn test_resize_changes_visible_lines() {
    let mut harness = ViewTestHarness::with_text(40, 10, &numbered(30), ContentKind::Plain);
    harness.state_mut().set_top_line(25);
    assert_eq!(harness.state().top_line(), 21);

    harness.state_mut().resize(320, 40 * 16);
    assert_eq!(harness.state().visible_lines(), 40);
    assert_eq!(harness.state().top_line(), 0);
    assert_eq!(harness.painted_lines().len(), 31);
}
