//! Markdown serialization (Model → Markdown export)
//!
//! Each block is rendered on its own and the results are joined with a
//! newline. Inline markup comes from [`render_spans`]; this module decides
//! which spans a block has, then adds the block prefix or wrapper.
//!
//! Ordered list numbers count the current run of `ordered-list-item` blocks,
//! starting at 1. Any other block ends the run.
//!
//! Text that begins with block syntax (`#`, `-`, `>`, `1.`, fences, rules) gets
//! a backslash before the marker so it re-imports as the same block type.
//! Other Markdown in block text is written verbatim: inline markup characters,
//! backslashes, raw HTML, a trailing `#` run in a header and the embed
//! shortcode in plain text all change meaning when the output is read back.

use crate::common::flat_to_nested::{render_spans, Span};
use crate::error::FormatError;
use crate::model::{Block, BlockType, Entity, EntityMap, EntityType, Model};
use crate::styles::MarkdownDict;
use std::borrow::Cow;

const FENCE: &str = "```";

/// Serialize the model to Markdown using `dict` for style symbols.
///
/// Entity references are checked before anything is rendered.
pub fn serialize_markdown(model: &Model, dict: &MarkdownDict) -> Result<String, FormatError> {
    model.validate()?;

    let mut ordered_run = 0usize;
    let mut lines = Vec::with_capacity(model.blocks.len());
    for (index, block) in model.blocks.iter().enumerate() {
        ordered_run = match block.block_type {
            BlockType::OrderedListItem => ordered_run + 1,
            _ => 0,
        };
        let line = serialize_block(index, block, &model.entity_map, dict, ordered_run)?;
        tracing::trace!(index, block_type = block.block_type.as_str(), "rendered block");
        lines.push(line);
    }

    tracing::debug!(blocks = lines.len(), "serialized markdown document");
    Ok(lines.join("\n"))
}

fn serialize_block(
    index: usize,
    block: &Block,
    entity_map: &EntityMap,
    dict: &MarkdownDict,
    ordered_number: usize,
) -> Result<String, FormatError> {
    if block.block_type == BlockType::Atomic {
        return render_atomic(index, block, entity_map);
    }

    let content = render_spans(&block.text, block_spans(block, entity_map, dict));

    Ok(match &block.block_type {
        BlockType::CodeBlock => {
            let language = block.language().unwrap_or_default();
            format!("{FENCE}{language}\n{content}\n{FENCE}")
        }
        block_type => format!(
            "{}{}",
            prefix(block_type, ordered_number),
            escape_block_start(&content)
        ),
    })
}

/// Backslash-escape a leading marker that Markdown would read as block
/// syntax, so text such as `5. not a list` comes back as plain text.
fn escape_block_start(content: &str) -> Cow<'_, str> {
    let indent = content.len() - content.trim_start_matches(' ').len();
    let line = &content[indent..];
    let escape_at = if starts_with_block_marker(line) {
        Some(indent)
    } else {
        ordered_marker_len(line).map(|digits| indent + digits)
    };
    match escape_at {
        Some(at) => Cow::Owned(format!("{}\\{}", &content[..at], &content[at..])),
        None => Cow::Borrowed(content),
    }
}

fn ends_marker(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(&[' ', '\t'][..])
}

fn starts_with_block_marker(line: &str) -> bool {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if (1..=6).contains(&hashes) && ends_marker(&line[hashes..]) {
        return true;
    }
    if line
        .strip_prefix(&['-', '+', '*'][..])
        .is_some_and(ends_marker)
    {
        return true;
    }
    line.starts_with('>')
        || line.starts_with(FENCE)
        || line.starts_with("~~~")
        || is_thematic_break(line)
}

fn is_thematic_break(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !matches!(c, ' ' | '\t'));
    let Some(first) = marks.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && marks.clone().count() >= 2 && marks.all(|c| c == first)
}

/// Digit count of a leading ordered-list marker (`12.` or `3)`).
fn ordered_marker_len(line: &str) -> Option<usize> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if !(1..=9).contains(&digits) {
        return None;
    }
    let after = line[digits..].strip_prefix(&['.', ')'][..])?;
    ends_marker(after).then_some(digits)
}

fn prefix(block_type: &BlockType, ordered_number: usize) -> Cow<'static, str> {
    match block_type {
        BlockType::UnorderedListItem => Cow::Borrowed("- "),
        BlockType::OrderedListItem => Cow::Owned(format!("{ordered_number}. ")),
        BlockType::Header(level) => Cow::Owned(format!("{} ", "#".repeat(usize::from(*level)))),
        BlockType::Blockquote => Cow::Borrowed("> "),
        _ => Cow::Borrowed(""),
    }
}

fn block_spans<'a>(block: &'a Block, entity_map: &'a EntityMap, dict: &'a MarkdownDict) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(block.inline_style_ranges.len() + block.entity_ranges.len());

    for range in &block.inline_style_ranges {
        match dict.symbol(&range.style) {
            Some(symbol) => spans.push(Span::style(range.offset, range.length, symbol)),
            None => tracing::debug!(style = %range.style, "no markdown symbol for style"),
        }
    }

    for range in &block.entity_ranges {
        let Some(entity) = entity_map.get(range.key) else {
            continue;
        };
        let span = match entity.entity_type {
            EntityType::Link => Span::entity(
                range.offset,
                range.length,
                Cow::Borrowed("["),
                Cow::Owned(format!("]({})", entity.url().unwrap_or_default())),
            ),
            EntityType::Image | EntityType::Video => {
                Span::replace(range.offset, range.length, Cow::Owned(media_markup(entity)))
            }
            EntityType::Other(_) => continue,
        };
        spans.push(span);
    }

    spans
}

/// Atomic blocks are their first entity; the placeholder text is dropped.
fn render_atomic(index: usize, block: &Block, entity_map: &EntityMap) -> Result<String, FormatError> {
    let range = block
        .entity_ranges
        .first()
        .ok_or(FormatError::AtomicWithoutEntity { block: index })?;
    let entity = entity_map.get(range.key).ok_or(FormatError::MissingEntity {
        block: index,
        key: range.key,
    })?;
    Ok(media_markup(entity))
}

fn media_markup(entity: &Entity) -> String {
    match entity.entity_type {
        EntityType::Video => format!("[[ embed url={} ]]", entity.location()),
        _ => format!("![{}]({})", entity.label(), entity.location()),
    }
}
