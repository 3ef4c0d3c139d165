//! The flat rich-text model.
//!
//!     A document is a list of blocks. Each block holds plain text plus two
//!     side tables: style ranges (a style tag over a character span) and entity
//!     ranges (a character span pointing at an entry of the document-wide
//!     entity map). All offsets and lengths count Unicode scalar values of the
//!     block's text.
//!
//!     This is the serialized "raw" shape of the editor content state, so every
//!     type here derives serde and matches the field names of that format.

pub mod block;
pub mod entity;

pub use block::{Block, BlockData, BlockType, EntityRange, StyleRange, LANGUAGE_KEY};
pub use entity::{Entity, EntityData, EntityMap, EntityType, Mutability, VIDEO_ENTITY_TYPE};

use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// A whole document: blocks plus the entity table they reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub entity_map: EntityMap,
}

impl Model {
    pub fn new(blocks: Vec<Block>, entity_map: EntityMap) -> Self {
        Model { blocks, entity_map }
    }

    /// Check that every entity range points at an existing entity.
    pub fn validate(&self) -> Result<(), FormatError> {
        for (index, block) in self.blocks.iter().enumerate() {
            for range in &block.entity_ranges {
                if !self.entity_map.contains_key(range.key) {
                    return Err(FormatError::MissingEntity {
                        block: index,
                        key: range.key,
                    });
                }
            }
        }
        Ok(())
    }
}
