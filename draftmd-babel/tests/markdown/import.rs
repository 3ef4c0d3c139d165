//! Import tests for Markdown format (Markdown → Model)
//!
//! These tests check the blocks, ranges and entities produced from Markdown.

use draftmd_babel::model::{Block, BlockType, Entity, EntityRange, EntityType, StyleRange};
use draftmd_babel::{md_to_model, Model, StyleConfig};

fn import(md: &str) -> Model {
    md_to_model(md, &StyleConfig::default())
}

fn only_block(md: &str) -> Block {
    let mut model = import(md);
    assert_eq!(model.blocks.len(), 1, "expected a single block for {md:?}");
    model.blocks.remove(0)
}

#[test]
fn test_empty_input() {
    let model = import("");
    assert_eq!(model.blocks, vec![Block::new("")]);
    assert!(model.entity_map.is_empty());
}

#[test]
fn test_unstyled_text() {
    let block = only_block("There is no styling anywhere in this text.");
    assert_eq!(block.text, "There is no styling anywhere in this text.");
    assert_eq!(block.block_type, BlockType::Unstyled);
    assert_eq!(block.depth, 0);
    assert!(block.inline_style_ranges.is_empty());
    assert!(block.entity_ranges.is_empty());
}

#[test]
fn test_bold() {
    let block = only_block("No style __bold__ no style.");
    assert_eq!(block.text, "No style bold no style.");
    assert_eq!(block.inline_style_ranges, vec![StyleRange::new(9, 4, "BOLD")]);
}

#[test]
fn test_alternate_markers() {
    let block = only_block("**strong** and _soft_");
    assert_eq!(block.text, "strong and soft");
    assert_eq!(
        block.inline_style_ranges,
        vec![StyleRange::new(0, 6, "BOLD"), StyleRange::new(11, 4, "ITALIC")]
    );
}

#[test]
fn test_several_italics() {
    let block = only_block("No style *italic* no style *more italic*.");
    assert_eq!(block.text, "No style italic no style more italic.");
    assert_eq!(
        block.inline_style_ranges,
        vec![StyleRange::new(9, 6, "ITALIC"), StyleRange::new(25, 11, "ITALIC")]
    );
}

#[test]
fn test_nested_styles() {
    let block = only_block("I am a __text *with* nested__ styles.");
    assert_eq!(block.text, "I am a text with nested styles.");
    assert_eq!(
        block.inline_style_ranges,
        vec![StyleRange::new(7, 16, "BOLD"), StyleRange::new(12, 4, "ITALIC")]
    );
}

#[test]
fn test_two_styles_on_one_word() {
    let block = only_block("__*Potato*__");
    assert_eq!(block.text, "Potato");
    assert_eq!(
        block.inline_style_ranges,
        vec![StyleRange::new(0, 6, "BOLD"), StyleRange::new(0, 6, "ITALIC")]
    );
}

#[test]
fn test_styled_link() {
    let model = import("__*[label](http://example.com/here)*__");
    let block = &model.blocks[0];
    assert_eq!(block.text, "label");
    assert_eq!(
        block.inline_style_ranges,
        vec![StyleRange::new(0, 5, "BOLD"), StyleRange::new(0, 5, "ITALIC")]
    );
    assert_eq!(
        block.entity_ranges,
        vec![EntityRange {
            key: 0,
            offset: 0,
            length: 5
        }]
    );
    assert_eq!(
        model.entity_map.get(0),
        Some(&Entity::link("http://example.com/here"))
    );
}

#[test]
fn test_several_paragraphs() {
    let model = import("*First __content__* block.\n*Second __content__* block.");
    let texts: Vec<&str> = model.blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["First content block.", "Second content block."]);
    assert_eq!(
        model.blocks[1].inline_style_ranges,
        vec![StyleRange::new(0, 14, "ITALIC"), StyleRange::new(7, 7, "BOLD")]
    );
}

#[test]
fn test_lists() {
    let model = import("- First\n- Second\n1. One\n2. Two");
    let types: Vec<BlockType> = model.blocks.iter().map(|b| b.block_type.clone()).collect();
    assert_eq!(
        types,
        vec![
            BlockType::UnorderedListItem,
            BlockType::UnorderedListItem,
            BlockType::OrderedListItem,
            BlockType::OrderedListItem,
        ]
    );
    assert_eq!(model.blocks[3].text, "Two");
}

#[test]
fn test_headers() {
    let model = import("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6");
    for (index, block) in model.blocks.iter().enumerate() {
        assert_eq!(block.block_type, BlockType::Header(index as u8 + 1));
        assert_eq!(block.text, format!("H{}", index + 1));
    }
}

#[test]
fn test_block_quote() {
    let block = only_block("> Here is a block quote.");
    assert_eq!(block.block_type, BlockType::Blockquote);
    assert_eq!(block.text, "Here is a block quote.");
}

#[test]
fn test_code_block_is_literal() {
    let block = only_block("```\nconst *country* = Estonia;\n```");
    assert_eq!(block.block_type, BlockType::CodeBlock);
    assert_eq!(block.text, "const *country* = Estonia;");
    assert!(block.inline_style_ranges.is_empty());
    assert_eq!(block.language(), None);
}

#[test]
fn test_multiple_code_blocks() {
    let model = import("Cats are cool\n```\nPurr Purr 🐱\n```\nBut birds are too!\n```\nCaw-cawwww! 🐦\n```");
    let summary: Vec<(&str, &str)> = model
        .blocks
        .iter()
        .map(|b| (b.block_type.as_str(), b.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("unstyled", "Cats are cool"),
            ("code-block", "Purr Purr 🐱"),
            ("unstyled", "But birds are too!"),
            ("code-block", "Caw-cawwww! 🐦"),
        ]
    );
}

#[test]
fn test_code_block_spanning_blank_lines() {
    let block = only_block("```python\ndef f():\n\n    return 1\n```");
    assert_eq!(block.text, "def f():\n\n    return 1");
    assert_eq!(block.language(), Some("python"));
}

#[test]
fn test_unclosed_code_block() {
    let model = import("```\nOh no, I only opened a code block");
    assert_eq!(
        model.blocks,
        vec![
            Block::new("").with_type(BlockType::CodeBlock),
            Block::new("Oh no, I only opened a code block"),
        ]
    );
}

#[test]
fn test_link() {
    let model = import("This is a [link](http://red-badger.com/) in text.");
    let block = &model.blocks[0];
    assert_eq!(block.text, "This is a link in text.");
    assert_eq!(
        block.entity_ranges,
        vec![EntityRange {
            key: 0,
            offset: 10,
            length: 4
        }]
    );
    let entity = model.entity_map.get(0).unwrap();
    assert_eq!(entity.entity_type, EntityType::Link);
    assert_eq!(entity.url(), Some("http://red-badger.com/"));
}

#[test]
fn test_entity_keys_are_shared_across_blocks() {
    let model = import("[one](http://1/) and [two](http://2/)\nthen [three](http://3/)");
    let keys: Vec<u32> = model
        .blocks
        .iter()
        .flat_map(|b| b.entity_ranges.iter().map(|r| r.key))
        .collect();
    assert_eq!(keys, vec![0, 1, 2]);
    assert_eq!(model.entity_map.get(2).and_then(Entity::url), Some("http://3/"));
}

#[test]
fn test_bold_link() {
    let model = import("I am a __[bold](http://red-badger.com/)__ link.");
    let block = &model.blocks[0];
    assert_eq!(block.text, "I am a bold link.");
    assert_eq!(block.inline_style_ranges, vec![StyleRange::new(7, 4, "BOLD")]);
    assert_eq!(
        block.entity_ranges,
        vec![EntityRange {
            key: 0,
            offset: 7,
            length: 4
        }]
    );
}

#[test]
fn test_image() {
    let model = import("![My Image Name](//images.mine.com/myImage.jpg)");
    let block = &model.blocks[0];
    assert_eq!(block.block_type, BlockType::Atomic);
    assert_eq!(block.text, " ");
    assert_eq!(
        model.entity_map.get(0),
        Some(&Entity::image("//images.mine.com/myImage.jpg", "My Image Name"))
    );
}

#[test]
fn test_inline_image_keeps_paragraph() {
    let model = import("A ![cat](//c.jpg) here");
    let block = &model.blocks[0];
    assert_eq!(block.block_type, BlockType::Unstyled);
    assert_eq!(block.text, "A   here");
    assert_eq!(
        block.entity_ranges,
        vec![EntityRange {
            key: 0,
            offset: 2,
            length: 1
        }]
    );
}

#[test]
fn test_video() {
    let model = import("[[ embed url=//youtu.be/wfWIs2gFTAM ]]");
    let block = &model.blocks[0];
    assert_eq!(block.block_type, BlockType::Atomic);
    assert_eq!(block.text, " ");
    let entity = model.entity_map.get(0).unwrap();
    assert_eq!(entity.entity_type, EntityType::Video);
    assert_eq!(entity.src(), Some("//youtu.be/wfWIs2gFTAM"));
}

#[test]
fn test_malformed_shortcode_stays_text() {
    let model = import("[[ embed ]]");
    assert_eq!(model.blocks[0].block_type, BlockType::Unstyled);
    assert_eq!(model.blocks[0].text, "[[ embed ]]");
    assert!(model.entity_map.is_empty());
}

#[test]
fn test_extra_styles() {
    let styles = StyleConfig::default()
        .with_inline_style("Delete", "STRIKETHROUGH", "~~")
        .with_inline_style("Code", "CODE", "`");
    let model = md_to_model("~~old~~ `new`", &styles);
    assert_eq!(
        model.blocks[0].inline_style_ranges,
        vec![
            StyleRange::new(0, 3, "STRIKETHROUGH"),
            StyleRange::new(4, 3, "CODE")
        ]
    );
}

#[test]
fn test_unknown_inline_nodes_keep_text() {
    let block = only_block("~~old~~ and `code`");
    assert_eq!(block.text, "old and code");
    assert!(block.inline_style_ranges.is_empty());
}
