//! Lookup of the formats a conversion can read from or write to.
//!
//! A conversion is always `source format → Model → target format`. The
//! registry owns one instance of each format, keyed by [`Format::name`], so
//! callers (the CLI, config-driven setups) can swap in configured instances
//! and then pick formats by name or by file extension.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{DraftJsFormat, MarkdownFormat};
use crate::model::Model;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Formats available for conversion, iterated in name order.
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry with no formats.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Markdown and raw JSON with their default settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat::default());
        registry.register(DraftJsFormat::default());
        registry
    }

    /// Add `format`, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Registered formats in name order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.values().map(Box::as_ref)
    }

    /// Name of the format claiming the extension of `filename`.
    ///
    /// Extensions compare case-insensitively, so `NOTES.MD` is Markdown.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        self.formats()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Model, FormatError> {
        let reader = self.get(format)?;
        if !reader.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' cannot be read"
            )));
        }
        reader.parse(source)
    }

    pub fn serialize(&self, model: &Model, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(model, format, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        model: &Model,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let writer = self.get(format)?;
        if !writer.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' cannot be written"
            )));
        }
        writer.serialize_with_options(model, options)
    }

    /// Read `source` as `from` and write it as `to`.
    ///
    /// Both formats are resolved before anything is parsed, so an unknown
    /// target fails without doing the work.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.get(from)?;
        self.get(to)?;
        let model = self.parse(source, from)?;
        tracing::debug!(
            from,
            to,
            blocks = model.blocks.len(),
            entities = model.entity_map.len(),
            "converting document"
        );
        self.serialize_with_options(&model, to, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
