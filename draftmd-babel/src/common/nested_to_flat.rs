//! Flattens nested inline content into text plus ranges.
//!
//! # The High-Level Concept
//!
//! Inline Markdown is a tree: a strong node may hold text, an emphasis node
//! and a link, which in turn hold text. The flat model keeps only the
//! concatenated text and describes the tree as ranges over it. Walking the
//! tree depth-first while appending leaf text to a single buffer gives every
//! node a start offset (the buffer length when the node is entered) and a
//! length (the characters its leaves contribute).
//!
//! # The Algorithm
//!
//! 1. **Entering a styled node:**
//!    - Record a style range at the current offset spanning the node's whole
//!      leaf text, before descending. Outer nodes are entered first, so a
//!      containing style always precedes the styles nested inside it.
//!
//! 2. **Entering an entity node:**
//!    - Register the entity in the shared table and record an entity range
//!      the same way.
//!
//! 3. **Leaves:**
//!    - Append their text and advance the offset by its character count.
//!
//! The [`FlatBlockBuilder`] below holds the buffer and the ranges; the
//! format-specific walk decides which nodes are styled or carry entities.

use crate::model::{Block, BlockData, BlockType, EntityRange, StyleRange};

/// Accumulates one block's flattened text and ranges.
#[derive(Debug, Default)]
pub struct FlatBlockBuilder {
    text: String,
    char_len: usize,
    style_ranges: Vec<StyleRange>,
    entity_ranges: Vec<EntityRange>,
}

impl FlatBlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset, in characters, at which the next text will land.
    pub fn cursor(&self) -> usize {
        self.char_len
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.char_len += text.chars().count();
    }

    /// Record a style over `length` characters from `offset`. Empty ranges
    /// carry no information and are dropped.
    pub fn push_style(&mut self, offset: usize, length: usize, style: &str) {
        if length > 0 {
            self.style_ranges
                .push(StyleRange::new(offset, length, style));
        }
    }

    pub fn push_entity(&mut self, key: u32, offset: usize, length: usize) {
        self.entity_ranges.push(EntityRange {
            key,
            offset,
            length,
        });
    }

    pub fn finish(self, block_type: BlockType, data: BlockData) -> Block {
        Block {
            key: None,
            text: self.text,
            block_type,
            depth: 0,
            inline_style_ranges: self.style_ranges,
            entity_ranges: self.entity_ranges,
            data,
        }
    }
}
