//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the flat model and text representations.

pub mod draftjs;
pub mod markdown;

pub use draftjs::DraftJsFormat;
pub use markdown::MarkdownFormat;
