//! Raw editor JSON format
//!
//! Reads and writes the serialized content state of the rich-text editor:
//! `{"blocks": [...], "entityMap": {...}}`. This is a thin serde layer over
//! [`Model`]; the only format-specific behavior is the entity map written for
//! documents without entities.
//!
//! # Empty entity maps
//!
//! Some editor versions refuse a raw document whose `entityMap` is `{}`. With
//! `placeholder_entity_map` on (the default) an empty map is written as
//! `{"type": "", "mutability": "", "data": ""}`. Both shapes are accepted
//! when reading.
//!
//! # Extra Parameters
//!
//! - `pretty` (bool, default on): indent the output.
//! - `placeholder-entity-map` (bool, default on): see above.

use crate::error::FormatError;
use crate::format::{parse_bool_flag, Format};
use crate::model::{Block, EntityMap, Model};
use serde::Serialize;
use std::collections::HashMap;

/// Output shape of a raw document, keeping the editor's field order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument<'a> {
    blocks: &'a [Block],
    entity_map: RawEntityMap<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RawEntityMap<'a> {
    Entities(&'a EntityMap),
    Placeholder(PlaceholderEntity),
}

/// Written in place of an empty entity map; see [`EntityMap::placeholder`].
#[derive(Serialize)]
struct PlaceholderEntity {
    #[serde(rename = "type")]
    entity_type: &'static str,
    mutability: &'static str,
    data: &'static str,
}

const PLACEHOLDER: PlaceholderEntity = PlaceholderEntity {
    entity_type: "",
    mutability: "",
    data: "",
};

/// Format implementation for raw editor JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftJsFormat {
    pub pretty: bool,
    pub placeholder_entity_map: bool,
}

impl Default for DraftJsFormat {
    fn default() -> Self {
        DraftJsFormat {
            pretty: true,
            placeholder_entity_map: true,
        }
    }
}

impl DraftJsFormat {
    pub fn new(pretty: bool, placeholder_entity_map: bool) -> Self {
        DraftJsFormat {
            pretty,
            placeholder_entity_map,
        }
    }

    fn to_json(&self, model: &Model) -> Result<String, FormatError> {
        model.validate()?;

        let entity_map = if self.placeholder_entity_map && model.entity_map.is_empty() {
            RawEntityMap::Placeholder(PLACEHOLDER)
        } else {
            RawEntityMap::Entities(&model.entity_map)
        };
        let document = RawDocument {
            blocks: &model.blocks,
            entity_map,
        };

        let mut json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

impl Format for DraftJsFormat {
    fn name(&self) -> &str {
        "draftjs"
    }

    fn description(&self) -> &str {
        "Raw Draft.js content state (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Model, FormatError> {
        let model: Model =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        tracing::debug!(
            blocks = model.blocks.len(),
            entities = model.entity_map.len(),
            "parsed raw document"
        );
        Ok(model)
    }

    fn serialize(&self, model: &Model) -> Result<String, FormatError> {
        self.to_json(model)
    }

    fn serialize_with_options(
        &self,
        model: &Model,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(key) = options
            .keys()
            .find(|key| !matches!(key.as_str(), "pretty" | "placeholder-entity-map"))
        {
            return Err(FormatError::NotSupported(format!(
                "Format 'draftjs' does not support parameter '{key}'"
            )));
        }

        let format = DraftJsFormat {
            pretty: parse_bool_flag(options, "pretty", self.pretty)?,
            placeholder_entity_map: parse_bool_flag(
                options,
                "placeholder-entity-map",
                self.placeholder_entity_map,
            )?,
        };
        format.to_json(model)
    }
}
