//! Shared configuration loader for draftmd.
//!
//! `defaults/draftmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DraftmdConfig`].
//!
//! Style mappings are arrays of tables (`[[parse.inline_styles]]`) rather than
//! tables keyed by node or style name: the config crate folds keys to lower
//! case, while node names (`Delete`) and style tags (`STRIKETHROUGH`) are case
//! sensitive.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use draftmd_babel::formats::{DraftJsFormat, MarkdownFormat};
use draftmd_babel::{MarkdownDict, StyleConfig};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/draftmd.default.toml");

/// Top-level configuration consumed by draftmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftmdConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
    pub json: JsonConfig,
}

impl DraftmdConfig {
    /// Markdown format using the configured style mappings in both directions.
    pub fn markdown_format(&self) -> MarkdownFormat {
        MarkdownFormat::new(StyleConfig::from(&self.parse), MarkdownDict::from(&self.render))
    }

    pub fn draftjs_format(&self) -> DraftJsFormat {
        DraftJsFormat::from(&self.json)
    }
}

/// Markdown → model mappings added to the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseConfig {
    #[serde(default)]
    pub inline_styles: Vec<InlineStyleConfig>,
    #[serde(default)]
    pub block_styles: Vec<BlockStyleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InlineStyleConfig {
    pub node: String,
    pub style: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockStyleConfig {
    pub node: String,
    pub block: String,
}

impl From<&ParseConfig> for StyleConfig {
    fn from(config: &ParseConfig) -> Self {
        let styles = config
            .inline_styles
            .iter()
            .fold(StyleConfig::default(), |styles, extra| {
                styles.with_inline_style(&extra.node, &extra.style, &extra.symbol)
            });
        config
            .block_styles
            .iter()
            .fold(styles, |styles, extra| {
                styles.with_block_style(&extra.node, extra.block.as_str())
            })
    }
}

/// Model → Markdown symbols added to the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerConfig {
    pub style: String,
    pub symbol: String,
}

impl From<&RenderConfig> for MarkdownDict {
    fn from(config: &RenderConfig) -> Self {
        let mut dict = MarkdownDict::default();
        dict.extend(
            config
                .markers
                .iter()
                .map(|marker| (marker.style.as_str(), marker.symbol.as_str())),
        );
        dict
    }
}

/// Raw JSON output knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
    pub placeholder_entity_map: bool,
}

impl From<&JsonConfig> for DraftJsFormat {
    fn from(config: &JsonConfig) -> Self {
        DraftJsFormat::new(config.pretty, config.placeholder_entity_map)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DraftmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DraftmdConfig, ConfigError> {
    Loader::new().build()
}
