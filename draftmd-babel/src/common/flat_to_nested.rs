//! Rebuilds nested markup from flat ranges.
//!
//! # The High-Level Concept
//!
//! The flat model describes formatting as ranges over a block's text. Markup
//! languages need the opposite: properly nested open/close markers written in
//! line with the text. Ranges produced by parsing never partially overlap,
//! so they form a tree, and a stack of currently-open spans is enough to emit
//! markers in a nesting-correct order. Ranges from an editor can overlap
//! partially; the inner span is then split around the outer one's end.
//!
//! # The Algorithm
//!
//! 1. **Ordering:**
//!    - Sort spans by start offset, then longest first, so at any index outer
//!      spans open before the spans they contain. Styles open before entities
//!      covering exactly the same characters. Remaining ties keep input order.
//!
//! 2. **Walking the text** (one character index at a time):
//!    - Open every span starting here: write its opening markup and push
//!      `{end, markup, body start}` on the stack.
//!    - Write the character, unless an open embed span replaces it.
//!    - Close every span ending at this index. Spans stacked above it are
//!      closed first and reopened after it. Style runs are closed through the
//!      whitespace normaliser so their markers hug non-space content.
//!
//! 3. **Completion:**
//!    - Spans still open when the text runs out (ranges past the end of the
//!      text, however long) are closed innermost first so the output stays
//!      balanced.

use crate::common::whitespace;
use std::borrow::Cow;

/// Whether a span is an inline style or an entity reference.
///
/// The order of the variants is the tie-break order for spans covering the
/// same characters: styles wrap entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpanKind {
    Style,
    Entity,
    /// An embed whose markup stands in for the characters it covers.
    Replace,
}

/// A range of characters together with the markup written around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<'a> {
    pub offset: usize,
    pub length: usize,
    pub open: Cow<'a, str>,
    pub close: Cow<'a, str>,
    pub kind: SpanKind,
}

impl<'a> Span<'a> {
    /// A style run delimited by the same symbol on both sides.
    pub fn style(offset: usize, length: usize, symbol: &'a str) -> Self {
        Span {
            offset,
            length,
            open: Cow::Borrowed(symbol),
            close: Cow::Borrowed(symbol),
            kind: SpanKind::Style,
        }
    }

    pub fn entity(offset: usize, length: usize, open: Cow<'a, str>, close: Cow<'a, str>) -> Self {
        Span {
            offset,
            length,
            open,
            close,
            kind: SpanKind::Entity,
        }
    }

    /// Markup written instead of the covered characters.
    pub fn replace(offset: usize, length: usize, markup: Cow<'a, str>) -> Self {
        Span {
            offset,
            length,
            open: markup,
            close: Cow::Borrowed(""),
            kind: SpanKind::Replace,
        }
    }
}

struct OpenSpan<'s> {
    end: usize,
    open: &'s str,
    close: &'s str,
    body_start: usize,
    kind: SpanKind,
}

/// Write `text` with the markup of every span inserted around its range.
pub fn render_spans(text: &str, mut spans: Vec<Span<'_>>) -> String {
    spans.retain(|span| span.length > 0);
    spans.sort_by(|a, b| {
        a.offset
            .cmp(&b.offset)
            .then(b.length.cmp(&a.length))
            .then(a.kind.cmp(&b.kind))
    });

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<OpenSpan<'_>> = Vec::new();
    let mut pending = spans.iter().peekable();

    for (index, ch) in text.chars().enumerate() {
        while let Some(span) = pending.next_if(|span| span.offset == index) {
            out.push_str(&span.open);
            stack.push(OpenSpan {
                end: span.offset.saturating_add(span.length - 1),
                open: &span.open,
                close: &span.close,
                body_start: out.len(),
                kind: span.kind,
            });
        }

        if !stack.iter().any(|open| open.kind == SpanKind::Replace) {
            out.push(ch);
        }

        close_ending_at(&mut out, &mut stack, index);
    }

    while let Some(top) = stack.pop() {
        close_span(&mut out, &top);
    }

    out
}

/// Close every open span whose last character is `index`.
///
/// A span ending below the top of the stack partially overlaps the spans
/// above it. Those are closed first and reopened right after it, so each
/// span's markup covers exactly its own characters.
fn close_ending_at<'s>(out: &mut String, stack: &mut Vec<OpenSpan<'s>>, index: usize) {
    while let Some(depth) = stack.iter().rposition(|open| open.end == index) {
        let inner = stack.split_off(depth + 1);
        for span in inner.iter().rev() {
            close_span(out, span);
        }
        if let Some(ending) = stack.pop() {
            close_span(out, &ending);
        }
        for mut span in inner {
            if span.kind != SpanKind::Replace {
                out.push_str(span.open);
            }
            span.body_start = out.len();
            stack.push(span);
        }
    }
}

fn close_span(out: &mut String, span: &OpenSpan<'_>) {
    match span.kind {
        SpanKind::Style => whitespace::close_run(out, span.body_start, span.open, span.close),
        SpanKind::Entity | SpanKind::Replace => out.push_str(span.close),
    }
}
