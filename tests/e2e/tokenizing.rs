// End-to-end tests for tokenizing content and overlaying tokens

use crate::common::harness::ViewTestHarness;
use srcview::primitives::token::{ColorClass, Token, TokenStyle};
use srcview::state::ContentKind;
use tempfile::TempDir;

fn classes(harness: &ViewTestHarness) -> Vec<(usize, usize, ColorClass)> {
    harness
        .state()
        .tokens()
        .iter()
        .map(|t| (t.start, t.end(), t.class))
        .collect()
}

#[test]
fn test_simple_declaration() {
    let harness = ViewTestHarness::with_text(80, 10, "int x = 1;", ContentKind::Source);
    assert_eq!(
        classes(&harness),
        vec![
            (0, 3, ColorClass::Keyword),
            (6, 7, ColorClass::Operator),
            (8, 9, ColorClass::Number),
            (9, 10, ColorClass::Delimiter),
        ]
    );
}

#[test]
fn test_raw_string_is_one_token() {
    let harness = ViewTestHarness::with_text(80, 10, "R\"(a)b)\"", ContentKind::Source);
    assert_eq!(classes(&harness), vec![(0, 8, ColorClass::String)]);
}

#[test]
fn test_disassembly_line() {
    let text = "  0x401000 <main>: mov %eax,%ebx # comment";
    let harness = ViewTestHarness::with_text(80, 10, text, ContentKind::Disassembly);
    let spans: Vec<(&str, ColorClass)> = harness
        .state()
        .tokens()
        .iter()
        .map(|t| (&text[t.range()], t.class))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("0x401000", ColorClass::Address),
            ("main", ColorClass::Label),
            ("mov", ColorClass::Instruction),
            ("%eax", ColorClass::Register),
            ("%ebx", ColorClass::Register),
            ("# comment", ColorClass::Comment),
        ]
    );
}

#[test]
fn test_disassembly_listing_snapshot() {
    let text = "=> 0x401136 <main+4>:\tsub    $0x10,%rsp\n   0x40113a <main+8>:\tmov    %edi,-0x4(%rbp)  # x";
    let harness = ViewTestHarness::with_text(80, 10, text, ContentKind::Disassembly);
    insta::assert_snapshot!(harness.token_dump().trim_end(), @r"
0..2 operator - =>
3..11 address - 0x401136
13..17 label - main
22..25 instruction bold sub
29..34 number - $0x10
35..39 register - %rsp
43..51 address - 0x40113a
53..57 label - main
62..65 instruction bold mov
69..73 register - %edi
75..78 number - 0x4
79..83 register - %rbp
86..89 comment italic # x
");
}

#[test]
fn test_source_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("hello.cpp");
    std::fs::write(
        &file_path,
        "#include <cstdio>\n// @brief entry\nint main() { return 0; }\n",
    )
    .unwrap();

    let mut harness = ViewTestHarness::new(80, 10);
    harness.open_file(&file_path).unwrap();
    assert_eq!(harness.state().kind(), ContentKind::Source);

    let text = harness.state().text().to_vec();
    let find = |class: ColorClass| -> Vec<String> {
        harness
            .state()
            .tokens()
            .iter()
            .filter(|t| t.class == class)
            .map(|t| String::from_utf8_lossy(&text[t.range()]).into_owned())
            .collect()
    };
    assert_eq!(find(ColorClass::Preprocessor), vec!["#include"]);
    assert_eq!(find(ColorClass::IncludePath), vec!["<cstdio>"]);
    assert_eq!(find(ColorClass::DocAnnotation), vec!["@brief"]);
    assert_eq!(find(ColorClass::Keyword), vec!["int", "return"]);
}

#[test]
fn test_overlay_marks_current_line() {
    let text = "0x1 <f>: mov %eax,%ebx\n";
    let mut harness = ViewTestHarness::with_text(80, 10, text, ContentKind::Disassembly);
    let before = harness.state().tokens().len();

    // Recolor the instruction and its first operand, as a debugger would
    // for the current instruction
    harness
        .state_mut()
        .merge_tokens(&[Token::styled(9..17, ColorClass::SpecialVariable, TokenStyle::BOLD)]);

    let tokens = harness.state().tokens();
    assert!(tokens.windows(2).all(|w| w[0].end() <= w[1].start));
    assert!(tokens
        .iter()
        .any(|t| t.range() == (9..17) && t.class == ColorClass::SpecialVariable));
    // mov and %eax were replaced by the overlay; %ebx survives
    assert_eq!(tokens.len(), before - 1);
    assert_eq!(tokens.last().map(|t| t.class), Some(ColorClass::Register));
}

#[test]
fn test_plain_content_has_no_tokens() {
    let harness = ViewTestHarness::with_text(80, 10, "int x = 1;", ContentKind::Plain);
    assert!(harness.state().tokens().is_empty());
    // Plain text still paints as default-colored runs
    let plan = harness.state().paint_viewport();
    assert_eq!(plan.lines[0].runs.len(), 1);
    assert_eq!(plan.lines[0].runs[0].class, ColorClass::Default);
}
