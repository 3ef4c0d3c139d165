//! Markdown parsing (Markdown → Model import)
//!
//! Pipeline: Markdown string → source blocks → comrak AST per block → flat
//! block (text, style ranges, entity ranges) plus a shared entity table.
//!
//! Every source line is its own block, except fenced code: an opening fence
//! line and the next closing fence are joined, with the lines between them,
//! into one block. An opening fence that is never closed stays a block of its
//! own and parses to an empty code block.

use super::ast::{self, MdNode, NodeKind};
use crate::common::nested_to_flat::FlatBlockBuilder;
use crate::model::{Block, BlockData, BlockType, Entity, EntityMap, Model, LANGUAGE_KEY};
use crate::styles::StyleConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const FENCE: &str = "```";

/// `[[ embed url=<token> ]]`
static VIDEO_SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\[\s(?:embed)\s(?:url=(\S+))\s\]\]").expect("video shortcode pattern is valid")
});

/// Parse Markdown into the flat model.
pub fn parse_markdown(source: &str, styles: &StyleConfig) -> Model {
    let mut entity_map = EntityMap::new();
    let blocks: Vec<Block> = split_blocks(source)
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let block = parse_block(chunk, styles, &mut entity_map);
            tracing::trace!(
                index,
                block_type = block.block_type.as_str(),
                chars = block.char_len(),
                "parsed block"
            );
            block
        })
        .collect();

    tracing::debug!(
        blocks = blocks.len(),
        entities = entity_map.len(),
        "parsed markdown document"
    );
    Model::new(blocks, entity_map)
}

/// Split the source into per-block chunks, joining fenced code.
pub fn split_blocks(source: &str) -> Vec<String> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut chunks = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let closing = if is_fence_opener(line) {
            lines[index + 1..]
                .iter()
                .position(|candidate| *candidate == FENCE)
                .map(|offset| index + 1 + offset)
        } else {
            None
        };

        match closing {
            Some(end) => {
                chunks.push(lines[index..=end].join("\n"));
                index = end + 1;
            }
            None => {
                chunks.push(line.to_string());
                index += 1;
            }
        }
    }
    chunks
}

fn is_fence_opener(line: &str) -> bool {
    line.strip_prefix(FENCE)
        .is_some_and(|info| !info.contains('`'))
}

/// URL captured by the video shortcode, if `text` is one.
pub fn video_url(text: &str) -> Option<&str> {
    VIDEO_SHORTCODE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|url| url.as_str())
}

/// The shortcode URL of a paragraph. The raw source is checked first; the
/// flattened text covers paragraphs whose source position was not recorded.
fn paragraph_video_url(node: &MdNode) -> Option<String> {
    if node.kind != NodeKind::Paragraph {
        return None;
    }
    video_url(&node.raw)
        .map(str::to_string)
        .or_else(|| video_url(&node.flat_text()).map(str::to_string))
}

fn parse_block(chunk: &str, styles: &StyleConfig, entity_map: &mut EntityMap) -> Block {
    let document = ast::parse(chunk);
    let block_type = document
        .first_child()
        .map(|node| block_type_for(node, styles))
        .unwrap_or_default();

    let mut builder = FlatBlockBuilder::new();
    let mut data = BlockData::new();
    for node in &document.children {
        if node.kind == NodeKind::CodeBlock {
            if let Some(lang) = &node.lang {
                data.insert(LANGUAGE_KEY.to_string(), Value::from(lang.as_str()));
            }
        }
        walk(node, styles, entity_map, &mut builder);
    }

    builder.finish(block_type, data)
}

fn block_type_for(node: &MdNode, styles: &StyleConfig) -> BlockType {
    let mapped = match node.kind {
        NodeKind::List if node.ordered => Some(BlockType::OrderedListItem),
        NodeKind::Header => styles.block_style(&format!("Header{}", node.depth)).cloned(),
        NodeKind::Paragraph if node.is_lone_image() || paragraph_video_url(node).is_some() => {
            Some(BlockType::Atomic)
        }
        kind => styles.block_style(kind.type_name()).cloned(),
    };
    mapped.unwrap_or_default()
}

fn walk(node: &MdNode, styles: &StyleConfig, entity_map: &mut EntityMap, builder: &mut FlatBlockBuilder) {
    match node.kind {
        NodeKind::Image => {
            let url = node.url.as_deref().unwrap_or_default();
            let alt = node.alt.as_deref().unwrap_or_default();
            let key = entity_map.insert(Entity::image(url, alt));
            builder.push_entity(key, builder.cursor(), 1);
            builder.push_text(" ");
            return;
        }
        NodeKind::Paragraph => {
            if let Some(src) = paragraph_video_url(node) {
                let key = entity_map.insert(Entity::video(&src));
                builder.push_entity(key, builder.cursor(), 1);
                builder.push_text(" ");
                return;
            }
        }
        NodeKind::Link => {
            let length = node.flat_text().chars().count();
            if length > 0 {
                let url = node.url.as_deref().unwrap_or_default();
                let key = entity_map.insert(Entity::link(url));
                builder.push_entity(key, builder.cursor(), length);
            }
        }
        _ => {}
    }

    if let Some(inline) = styles.inline_style(node.kind.type_name()) {
        let length = node.flat_text().chars().count();
        builder.push_style(builder.cursor(), length, &inline.style);
    }

    match &node.value {
        Some(value) => builder.push_text(value),
        None => {
            for child in &node.children {
                walk(child, styles, entity_map, builder);
            }
        }
    }
}
