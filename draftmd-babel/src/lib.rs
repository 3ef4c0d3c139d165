//! Conversion between Markdown and the flat rich-text model
//!
//!     This crate converts Markdown to the raw content shape of a block-based rich-text editor
//!     (blocks of plain text annotated with style and entity ranges) and back.
//!
//!     TLDR: For format authors:
//!         - Markdown is parsed by comrak; we only adapt its AST (see formats/markdown/ast.rs).
//!         - Flattening and re-nesting are shared code in ./common, format modules decide which
//!           nodes become styles, entities or block types.
//!         - The raw JSON format is plain serde over ./model.
//!
//! Architecture
//!
//!     The model (./model) is the pivot: every format parses into it and serializes from it.
//!     The two hard directions are:
//!
//!     - nested → flat: a depth-first walk that appends leaf text to one buffer and records a
//!       range for each styled or entity node as it is entered (./common/nested_to_flat.rs).
//!     - flat → nested: a left-to-right walk over the characters with a stack of open spans so
//!       markers close in the reverse order they opened (./common/flat_to_nested.rs), plus the
//!       whitespace rule that keeps markers against non-space text (./common/whitespace.rs).
//!
//!     This is a pure lib, that is, it powers draftmd-cli but is shell agnostic: no code here
//!     prints, reads env vars or touches the filesystem. Diagnostics go through `tracing`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── styles.rs               # Style dictionaries (parse side and render side)
//!     ├── model                   # Blocks, ranges, entities
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── ast.rs          # Owned view of the comrak AST
//!     │   │   ├── parser.rs       # Markdown → Model
//!     │   │   ├── serializer.rs   # Model → Markdown
//!     │   │   └── mod.rs
//!     │   └── draftjs             # Raw editor JSON
//!     ├── common                  # Shared flatten / re-nest code
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;
pub mod styles;

pub use error::FormatError;
pub use format::Format;
pub use formats::{DraftJsFormat, MarkdownFormat};
pub use model::{Block, BlockType, Entity, EntityMap, EntityType, Model};
pub use registry::FormatRegistry;
pub use styles::{MarkdownDict, StyleConfig};

/// Converts Markdown to the flat model.
///
/// Never fails: constructs with no model representation contribute their
/// text unstyled.
pub fn md_to_model(markdown: &str, styles: &StyleConfig) -> Model {
    formats::markdown::parser::parse_markdown(markdown, styles)
}

/// Converts the flat model back to Markdown.
///
/// # Errors
///
/// [`FormatError::MissingEntity`] if a block references a key that is not in
/// the entity map, [`FormatError::AtomicWithoutEntity`] for an atomic block
/// with no entity range. Both are detected before any output is produced.
pub fn model_to_md(model: &Model, dict: &MarkdownDict) -> Result<String, FormatError> {
    formats::markdown::serializer::serialize_markdown(model, dict)
}
