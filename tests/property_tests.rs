// Property-based tests using proptest
// These tests generate random buffers, tokens and scroll states and verify invariants

use proptest::prelude::*;
use srcview::config::{GutterConfig, ScrollConfig};
use srcview::model::buffer::Buffer;
use srcview::overlay::merge_tokens;
use srcview::primitives::token::{ColorClass, Token};
use srcview::state::{ContentKind, Direction, ViewState};
use srcview::view::layout::{CoordMode, FontMetrics, LayoutEngine, ScrollOffsets};
use srcview::view::scroll::{ScrollMapper, ScrollMode};
use srcview::{tokenize_disassembly, tokenize_source};

/// Tokens are non-empty, inside the buffer, sorted and non-overlapping
fn assert_well_formed(tokens: &[Token], len: usize) -> Result<(), TestCaseError> {
    for t in tokens {
        prop_assert!(t.len > 0, "empty token {:?}", t);
        prop_assert!(t.end() <= len, "token {:?} past end {}", t, len);
    }
    for w in tokens.windows(2) {
        prop_assert!(w[0].end() <= w[1].start, "overlap {:?} {:?}", w[0], w[1]);
    }
    Ok(())
}

/// Source-like text, heavy on the characters the lexer cares about
fn source_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ \t\n#<>\"'/*@\\\\()\\[\\]{};,.=+\\-:&|!%R]{0,200}"
}

fn disassembly_text() -> impl Strategy<Value = String> {
    "[0-9a-fx $%#<>+:=,()\t\nraxbspdimov]{0,200}"
}

fn token_strategy(max_pos: usize) -> impl Strategy<Value = Token> {
    (0..max_pos, 0..max_pos / 2, 0..ColorClass::ALL.len()).prop_map(|(start, len, class)| {
        Token::new(start, len, ColorClass::from_index(class).unwrap_or(ColorClass::Default))
    })
}

fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[a-z ]{1,8}",
            1 => Just("\n".to_string()),
            1 => Just("中".to_string()),
            1 => Just("e\u{301}".to_string()),
            1 => Just("\t".to_string()),
        ],
        0..30,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_source_tokens_well_formed(text in source_text()) {
        let tokens = tokenize_source(text.as_bytes());
        assert_well_formed(&tokens, text.len())?;
    }

    #[test]
    fn prop_source_tokens_well_formed_on_raw_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let tokens = tokenize_source(&bytes);
        assert_well_formed(&tokens, bytes.len())?;
    }

    #[test]
    fn prop_disassembly_tokens_well_formed(text in disassembly_text()) {
        let tokens = tokenize_disassembly(text.as_bytes());
        assert_well_formed(&tokens, text.len())?;
    }

    #[test]
    fn prop_merge_is_idempotent_and_well_formed(
        existing in prop::collection::vec(token_strategy(200), 0..20),
        incoming in prop::collection::vec(token_strategy(200), 0..20),
        len in 0usize..200,
    ) {
        let base = merge_tokens(&[], &existing, len);
        assert_well_formed(&base, len)?;

        let once = merge_tokens(&base, &incoming, len);
        assert_well_formed(&once, len)?;
        let twice = merge_tokens(&once, &incoming, len);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_merge_incoming_wins(
        existing in prop::collection::vec(token_strategy(100), 0..10),
        token in token_strategy(100),
    ) {
        let base = merge_tokens(&[], &existing, 100);
        let merged = merge_tokens(&base, &[token], 100);
        let end = token.end().min(100);
        if end > token.start {
            // Every byte of the incoming token carries its class
            for pos in token.start..end {
                let covering = merged.iter().find(|t| t.range().contains(&pos));
                prop_assert_eq!(covering.map(|t| t.class), Some(token.class));
            }
        }
    }

    #[test]
    fn prop_scroll_round_trips(
        total in 1usize..3_000_000,
        visible in 1usize..300,
        top_seed in any::<usize>(),
        value_seed in any::<u32>(),
    ) {
        let mapper = ScrollMapper::new(&ScrollConfig::default());
        let scrollable = total.saturating_sub(visible);
        let spec = mapper.to_scrollbar(0, total, visible);

        match spec.mode {
            ScrollMode::Hidden => {
                prop_assert_eq!(mapper.to_top_line(&spec, total, visible), 0);
            }
            ScrollMode::Direct => {
                let top = top_seed % (scrollable + 1);
                let spec = mapper.to_scrollbar(top, total, visible);
                prop_assert_eq!(mapper.to_top_line(&spec, total, visible), top);
            }
            ScrollMode::Compressed => {
                let range = mapper.compressed_range() as usize;
                if scrollable <= range {
                    let top = top_seed % (scrollable + 1);
                    let spec = mapper.to_scrollbar(top, total, visible);
                    prop_assert_eq!(mapper.to_top_line(&spec, total, visible), top);
                } else {
                    let value = value_seed % (range as u32 + 1);
                    let spec = spec.with_value(value);
                    let top = mapper.to_top_line(&spec, total, visible);
                    prop_assert!(top <= scrollable);
                    prop_assert_eq!(mapper.to_scrollbar(top, total, visible).value, value);
                }
            }
        }
    }

    #[test]
    fn prop_pixel_mapping_keeps_line(text in mixed_text(), pos_seed in any::<usize>()) {
        let buffer = Buffer::from_bytes(text.clone().into_bytes());
        let layout = LayoutEngine::new(FontMetrics::new(8, 16), GutterConfig::default());
        let pos = pos_seed % (buffer.len() + 1);
        let none = ScrollOffsets::default();

        let point = layout.pos_to_xy(&buffer, pos, CoordMode::Absolute, none);
        let back = layout.xy_to_pos(&buffer, point.x, point.y, CoordMode::Absolute, none);
        let index = buffer.line_index();
        prop_assert_eq!(index.line_of(back), index.line_of(pos));
    }

    #[test]
    fn prop_caret_visits_every_codepoint(text in mixed_text()) {
        let mut state = ViewState::default();
        state.set_content(text.clone().into_bytes(), ContentKind::Plain);
        state.resize(400, 160);

        let expected: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(text.len()))
            .filter(|&i| i > 0)
            .collect();
        let mut visited = Vec::new();
        for _ in 0..expected.len() {
            state.move_horizontal(Direction::Forward, false);
            visited.push(state.insertion_position());
        }
        prop_assert_eq!(visited, expected);
    }
}
