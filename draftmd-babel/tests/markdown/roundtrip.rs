//! Round-trip and idempotence properties for the supported Markdown subset.

use draftmd_babel::model::{Block, BlockType, Entity, EntityMap};
use draftmd_babel::{md_to_model, model_to_md, MarkdownDict, Model, StyleConfig};
use proptest::prelude::*;

fn round_trip(md: &str) -> String {
    let model = md_to_model(md, &StyleConfig::default());
    model_to_md(&model, &MarkdownDict::default()).expect("parsed model should render")
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn words(range: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(word(), range).prop_map(|words| words.join(" "))
}

/// One inline segment written in the canonical marker style.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => words(1..4),
        1 => words(1..3).prop_map(|w| format!("__{w}__")),
        1 => words(1..3).prop_map(|w| format!("*{w}*")),
        1 => (word(), word(), word()).prop_map(|(a, b, c)| format!("__{a} *{b}* {c}__")),
        1 => (word(), word()).prop_map(|(label, host)| format!("[{label}](http://{host}/)")),
    ]
}

fn line() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![Just(""), Just("- "), Just("# "), Just("### "), Just("> ")];
    (prefix, prop::collection::vec(segment(), 1..5))
        .prop_map(|(prefix, segments)| format!("{prefix}{}", segments.join(" ")))
}

/// A block of plain words with a bold range over some of them and an italic
/// range nested inside the bold one.
fn styled_block() -> impl Strategy<Value = Block> {
    prop::collection::vec(word(), 1..8).prop_flat_map(|words| {
        let count = words.len();
        (Just(words), 0..count)
            .prop_flat_map(move |(words, start)| (Just(words), Just(start), start..count))
            .prop_flat_map(|(words, start, end)| {
                (Just(words), Just(start), Just(end), start..=end)
            })
            .prop_flat_map(|(words, start, end, inner_start)| {
                (
                    Just(words),
                    Just(start),
                    Just(end),
                    Just(inner_start),
                    inner_start..=end,
                )
            })
            .prop_map(|(words, start, end, inner_start, inner_end)| {
                let text = words.join(" ");
                let span = |from: usize, to: usize| {
                    let offset: usize = words[..from].iter().map(|w| w.len() + 1).sum();
                    let length: usize =
                        words[from..=to].iter().map(|w| w.len()).sum::<usize>() + (to - from);
                    (offset, length)
                };
                let (bold_offset, bold_length) = span(start, end);
                let (italic_offset, italic_length) = span(inner_start, inner_end);
                Block::new(text)
                    .with_style(bold_offset, bold_length, "BOLD")
                    .with_style(italic_offset, italic_length, "ITALIC")
            })
    })
}

fn block_type() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::Unstyled),
        Just(BlockType::UnorderedListItem),
        Just(BlockType::OrderedListItem),
        Just(BlockType::Blockquote),
        (1u8..=6).prop_map(BlockType::Header),
    ]
}

#[test]
fn test_empty_input_round_trips() {
    assert_eq!(round_trip(""), "");
}

#[test]
fn test_kitchen_sink_round_trips() {
    let md = "# Title\n\
              Some __bold__ and *italic* text.\n\
              - First\n\
              - Second\n\
              1. One\n\
              2. Two\n\
              > Quoted *words*\n\
              ```js\n\
              let x = 1;\n\
              \n\
              let y = *x*;\n\
              ```\n\
              ![Cat](//img/cat.jpg)\n\
              [[ embed url=//youtu.be/abc ]]\n\
              A [link](http://x/) and a ![dog](//img/dog.jpg) inline.";
    assert_eq!(round_trip(md), md);
}

#[test]
fn test_unclosed_fence_round_trip_adds_closing_fence() {
    assert_eq!(
        round_trip("```\nOh no, I only opened a code block"),
        "```\n\n```\nOh no, I only opened a code block"
    );
}

#[test]
fn test_blank_lines_survive() {
    assert_eq!(round_trip("one\n\ntwo\n"), "one\n\ntwo\n");
}

#[test]
fn test_plain_text_that_looks_like_block_syntax_survives() {
    let texts = [
        "5. not a list",
        "2) nor this",
        "- no bullet",
        "+ no bullet either",
        "# no header",
        "> no quote",
        "```no fence",
        "---",
    ];
    let model = Model::new(
        texts.iter().map(|text| Block::new(*text)).collect(),
        EntityMap::new(),
    );

    let first = model_to_md(&model, &MarkdownDict::default()).unwrap();
    let reparsed = md_to_model(&first, &StyleConfig::default());
    let summary: Vec<(BlockType, &str)> = reparsed
        .blocks
        .iter()
        .map(|block| (block.block_type.clone(), block.text.as_str()))
        .collect();
    let expected: Vec<(BlockType, &str)> = texts
        .iter()
        .map(|text| (BlockType::Unstyled, *text))
        .collect();
    assert_eq!(summary, expected);
    assert_eq!(round_trip(&first), first);
}

proptest! {
    #[test]
    fn prop_supported_subset_round_trips(lines in prop::collection::vec(line(), 1..6)) {
        let md = lines.join("\n");
        prop_assert_eq!(round_trip(&md), md);
    }

    #[test]
    fn prop_rendering_is_idempotent(
        blocks in prop::collection::vec((styled_block(), block_type()), 1..6)
    ) {
        let blocks: Vec<Block> = blocks
            .into_iter()
            .map(|(block, block_type)| block.with_type(block_type))
            .collect();
        let model = Model::new(blocks, EntityMap::new());
        let first = model_to_md(&model, &MarkdownDict::default()).unwrap();
        prop_assert_eq!(round_trip(&first), first);
    }

    #[test]
    fn prop_link_keys_are_dense(labels in prop::collection::vec(word(), 1..6)) {
        let md = labels
            .iter()
            .map(|label| format!("[{label}](http://{label}/)"))
            .collect::<Vec<_>>()
            .join("\n");
        let model = md_to_model(&md, &StyleConfig::default());
        let keys: Vec<u32> = model.entity_map.iter().map(|(key, _)| key).collect();
        prop_assert_eq!(keys, (0..labels.len() as u32).collect::<Vec<_>>());
        for (key, label) in labels.iter().enumerate() {
            let url = format!("http://{label}/");
            prop_assert_eq!(model.entity_map.get(key as u32), Some(&Entity::link(&url)));
        }
    }
}
