//! Markdown format implementation
//!
//! This module implements bidirectional conversion between Markdown and the flat model.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing. The AST is copied into an owned
//! tree ([`ast::MdNode`]) so the conversion code never touches the arena. Serialization is
//! done by hand: comrak's formatter would normalize the markers the style dictionary picks.
//!
//! # Element Mapping Table
//!
//! | Markdown                  | Model                                   | Notes                                   |
//! |---------------------------|-----------------------------------------|-----------------------------------------|
//! | Paragraph                 | `unstyled` block                        |                                         |
//! | `#`..`######` heading     | `header-one`..`header-six`              | via `Header<n>` block styles            |
//! | `- item`                  | `unordered-list-item`                   | one block per line                      |
//! | `1. item`                 | `ordered-list-item`                     | numbers regenerated on export           |
//! | `> quote`                 | `blockquote`                            |                                         |
//! | fenced code               | `code-block`                            | info string kept in `data.language`     |
//! | `__bold__` / `*italic*`   | `BOLD` / `ITALIC` style ranges          | symbols come from the dictionary        |
//! | `[text](url)`             | `LINK` entity over the text             |                                         |
//! | `![alt](url)`             | `IMAGE` entity over a placeholder space | a lone image makes an `atomic` block    |
//! | `[[ embed url=... ]]`     | video entity over a placeholder space   | always an `atomic` block at top level   |
//!
//! # Lossy Conversions
//!
//! - Markers are normalized: `**bold**` comes back as `__bold__` with the default dictionary.
//! - Ordered list start numbers are not kept.
//! - Nested lists, tables and other constructs spanning lines are read one line at a time.
//! - Styles with no dictionary symbol are written as plain text.
//!
//! # Extra Parameters
//!
//! `marker-<style>=<symbol>` overrides the symbol written for a style tag, e.g.
//! `--extra-marker-bold '**'`. The style name is upper-cased.

pub mod ast;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Model;
use crate::styles::{MarkdownDict, StyleConfig};
use std::collections::HashMap;

const MARKER_PREFIX: &str = "marker-";

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    styles: StyleConfig,
    dict: MarkdownDict,
}

impl MarkdownFormat {
    pub fn new(styles: StyleConfig, dict: MarkdownDict) -> Self {
        MarkdownFormat { styles, dict }
    }

    pub fn styles(&self) -> &StyleConfig {
        &self.styles
    }

    pub fn dict(&self) -> &MarkdownDict {
        &self.dict
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with the embed shortcode"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Model, FormatError> {
        Ok(parser::parse_markdown(source, &self.styles))
    }

    fn serialize(&self, model: &Model) -> Result<String, FormatError> {
        serializer::serialize_markdown(model, &self.dict)
    }

    fn serialize_with_options(
        &self,
        model: &Model,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut dict = self.dict.clone();
        for (key, value) in options {
            match key.strip_prefix(MARKER_PREFIX) {
                Some(style) if !style.is_empty() => dict.set(&style.to_uppercase(), value),
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'markdown' does not support parameter '{key}'"
                    )))
                }
            }
        }
        serializer::serialize_markdown(model, &dict)
    }
}
