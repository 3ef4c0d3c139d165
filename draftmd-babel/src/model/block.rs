//! Blocks and the ranges that annotate their text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Block-scoped metadata (e.g. the language of a code block).
pub type BlockData = BTreeMap<String, Value>;

/// Key under which a code block stores its fence info string.
pub const LANGUAGE_KEY: &str = "language";

/// One paragraph-level unit of the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Editor-assigned block key, kept when a raw document carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub inline_style_ranges: Vec<StyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BlockData,
}

impl Block {
    /// Create an unstyled block holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Block {
            text: text.into(),
            ..Block::default()
        }
    }

    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    pub fn with_style(mut self, offset: usize, length: usize, style: &str) -> Self {
        self.inline_style_ranges
            .push(StyleRange::new(offset, length, style));
        self
    }

    pub fn with_entity(mut self, key: u32, offset: usize, length: usize) -> Self {
        self.entity_ranges.push(EntityRange {
            key,
            offset,
            length,
        });
        self
    }

    /// Length of the flattened text in characters, the unit all ranges use.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Language recorded for a code block, if any.
    pub fn language(&self) -> Option<&str> {
        self.data.get(LANGUAGE_KEY).and_then(Value::as_str)
    }
}

/// Block-level type tag.
///
/// Serialized as the kebab-case strings used by the raw editor format. Any
/// other string survives as [`BlockType::Custom`] and renders without a
/// prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    UnorderedListItem,
    OrderedListItem,
    /// Header level 1 to 6.
    Header(u8),
    Blockquote,
    CodeBlock,
    Atomic,
    Custom(String),
}

const HEADER_NAMES: [&str; 6] = [
    "header-one",
    "header-two",
    "header-three",
    "header-four",
    "header-five",
    "header-six",
];

impl BlockType {
    /// Header block for `level`, clamped to 1..=6.
    pub fn header(level: u8) -> Self {
        BlockType::Header(level.clamp(1, 6))
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::Header(level) => HEADER_NAMES[usize::from((*level).clamp(1, 6)) - 1],
            BlockType::Blockquote => "blockquote",
            BlockType::CodeBlock => "code-block",
            BlockType::Atomic => "atomic",
            BlockType::Custom(name) => name,
        }
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "unstyled" => BlockType::Unstyled,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "blockquote" => BlockType::Blockquote,
            "code-block" => BlockType::CodeBlock,
            "atomic" => BlockType::Atomic,
            other => match HEADER_NAMES.iter().position(|h| *h == other) {
                Some(index) => BlockType::Header(index as u8 + 1),
                None => BlockType::Custom(other.to_string()),
            },
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        BlockType::from(name.as_str())
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// An inline style applied to a character span of a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

impl StyleRange {
    pub fn new(offset: usize, length: usize, style: &str) -> Self {
        StyleRange {
            offset,
            length,
            style: style.to_string(),
        }
    }
}

/// A character span that references an entity by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub key: u32,
    pub offset: usize,
    pub length: usize,
}
