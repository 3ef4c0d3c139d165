//! Style dictionaries for both conversion directions.
//!
//! The parse side ([`StyleConfig`]) maps AST node type names to inline style
//! tags and block types. The render side ([`MarkdownDict`]) maps style tags to
//! Markdown symbols. The two are configured independently and do not need to
//! agree: a style the renderer has no symbol for is written as plain text.

use crate::model::BlockType;
use std::collections::BTreeMap;

pub const BOLD: &str = "BOLD";
pub const ITALIC: &str = "ITALIC";

/// An inline style produced for a given AST node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineStyle {
    /// Style tag stored in the model (e.g. `BOLD`).
    pub style: String,
    /// Markdown symbol for the style. Informational on the parse side.
    pub symbol: String,
}

impl InlineStyle {
    pub fn new(style: &str, symbol: &str) -> Self {
        InlineStyle {
            style: style.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Parse-side configuration: defaults merged with caller extras.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    inline_styles: BTreeMap<String, InlineStyle>,
    block_styles: BTreeMap<String, BlockType>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let inline_styles = BTreeMap::from([
            ("Strong".to_string(), InlineStyle::new(BOLD, "__")),
            ("Emphasis".to_string(), InlineStyle::new(ITALIC, "*")),
        ]);

        let mut block_styles = BTreeMap::from([
            ("List".to_string(), BlockType::UnorderedListItem),
            ("CodeBlock".to_string(), BlockType::CodeBlock),
            ("BlockQuote".to_string(), BlockType::Blockquote),
        ]);
        for level in 1..=6u8 {
            block_styles.insert(format!("Header{level}"), BlockType::header(level));
        }

        StyleConfig {
            inline_styles,
            block_styles,
        }
    }
}

impl StyleConfig {
    /// Add or replace the inline style produced for `node` (an AST type name
    /// such as `Delete` or `Code`).
    pub fn with_inline_style(mut self, node: &str, style: &str, symbol: &str) -> Self {
        self.inline_styles
            .insert(node.to_string(), InlineStyle::new(style, symbol));
        self
    }

    /// Add or replace the block type produced for `node` (an AST type name,
    /// or `Header<n>` for headers).
    pub fn with_block_style(mut self, node: &str, block_type: impl Into<BlockType>) -> Self {
        self.block_styles
            .insert(node.to_string(), block_type.into());
        self
    }

    pub fn inline_style(&self, node: &str) -> Option<&InlineStyle> {
        self.inline_styles.get(node)
    }

    pub fn block_style(&self, node: &str) -> Option<&BlockType> {
        self.block_styles.get(node)
    }
}

/// Render-side dictionary from style tag to Markdown symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDict {
    symbols: BTreeMap<String, String>,
}

impl Default for MarkdownDict {
    fn default() -> Self {
        MarkdownDict {
            symbols: BTreeMap::from([
                (BOLD.to_string(), "__".to_string()),
                (ITALIC.to_string(), "*".to_string()),
            ]),
        }
    }
}

impl MarkdownDict {
    /// Add or replace the symbol written around `style`.
    pub fn with(mut self, style: &str, symbol: &str) -> Self {
        self.set(style, symbol);
        self
    }

    pub fn set(&mut self, style: &str, symbol: &str) {
        self.symbols.insert(style.to_string(), symbol.to_string());
    }

    /// Symbol for `style`; `None` (or an empty symbol) means the run is
    /// written without markers.
    pub fn symbol(&self, style: &str) -> Option<&str> {
        self.symbols
            .get(style)
            .map(String::as_str)
            .filter(|symbol| !symbol.is_empty())
    }
}

impl<S: Into<String>, T: Into<String>> Extend<(S, T)> for MarkdownDict {
    fn extend<I: IntoIterator<Item = (S, T)>>(&mut self, iter: I) {
        for (style, symbol) in iter {
            self.symbols.insert(style.into(), symbol.into());
        }
    }
}
