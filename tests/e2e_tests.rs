// End-to-end tests - complete viewer workflows through ViewState

mod common;
mod e2e;

use common::harness::ViewTestHarness;
use srcview::input::keys::{Key, Modifiers};
use srcview::primitives::token::ColorClass;
use srcview::state::ContentKind;
use tempfile::TempDir;

/// Open a listing from disk, page through it and select a line
#[test]
fn test_open_listing_page_and_select() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("main.dis");

    let mut content = String::new();
    for i in 0..200 {
        content.push_str(&format!(
            "   0x{:06x} <main+{}>:\tmov    %eax,%ebx\n",
            0x401000 + i * 4,
            i * 4
        ));
    }
    std::fs::write(&file_path, &content).unwrap();

    let mut harness = ViewTestHarness::new(80, 20);
    harness.open_file(&file_path).unwrap();

    // Tokenized as disassembly because of the extension
    assert_eq!(harness.state().tokens()[0].class, ColorClass::Address);

    harness.send_key(Key::PageDown, Modifiers::empty());
    let line = harness
        .state()
        .buffer()
        .line_index()
        .line_of(harness.caret());
    assert_eq!(line, 20);
    assert!(harness.state().top_line() > 0);

    // Select the whole current line
    harness.send_key(Key::Home, Modifiers::empty());
    harness.send_key(Key::End, Modifiers::SHIFT);
    assert!(harness.selected_text().starts_with("   0x401050 <main+80>:"));
}

/// Loading new content resets the caret, selection and scroll position
#[test]
fn test_reload_resets_view() {
    let text: String = (0..100).map(|i| format!("int v{i} = {i};\n")).collect();
    let mut harness = ViewTestHarness::with_text(60, 10, &text, ContentKind::Source);
    harness.state_mut().scroll_lines(30);
    harness.state_mut().select_all();
    let change = harness.state_mut().take_viewport_change();
    assert_eq!(change.map(|c| c.top_line), Some(30));

    harness.load_text("short", ContentKind::Plain);
    assert_eq!(harness.state().top_line(), 0);
    harness.assert_caret(0);
    harness.assert_selection(None);
    assert!(harness.state().tokens().is_empty());
    // The scroll back to the top is reported once
    let change = harness.state_mut().take_viewport_change();
    assert_eq!(change.map(|c| c.top_line), Some(0));
    assert_eq!(harness.state_mut().take_viewport_change(), None);
}
