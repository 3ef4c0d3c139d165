//! Keeps emphasis markers adjacent to non-space content.
//!
//! Markdown does not recognise `__ bold __` as strong emphasis: a delimiter
//! run may not be followed (opening) or preceded (closing) by whitespace. When
//! a styled run starts or ends with spaces, the markers move inward to hug the
//! trimmed content and the spaces end up outside them. The characters of the
//! line are unchanged; only marker positions move.

/// Wrap `body` in `open` and `close`, placing leading and trailing whitespace
/// outside the markers. A body made only of whitespace is returned unmarked.
pub fn wrap_trimmed(body: &str, open: &str, close: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return body.to_string();
    }
    let leading = &body[..body.len() - body.trim_start().len()];
    let trailing = &body[body.trim_end().len()..];
    let mut wrapped =
        String::with_capacity(body.len() + open.len() + close.len());
    wrapped.push_str(leading);
    wrapped.push_str(open);
    wrapped.push_str(trimmed);
    wrapped.push_str(close);
    wrapped.push_str(trailing);
    wrapped
}

/// Close the run whose body starts at byte `body_start` of `out`.
///
/// `out` is split into the text before the opening marker, the marker, and
/// the body; the body is re-wrapped with [`wrap_trimmed`] so the run's
/// whitespace lands outside its markers.
pub fn close_run(out: &mut String, body_start: usize, open: &str, close: &str) {
    let body = out.split_off(body_start);
    if body.trim().len() == body.len() {
        out.push_str(&body);
        out.push_str(close);
        return;
    }
    debug_assert!(out.ends_with(open), "opening marker must precede the body");
    out.truncate(body_start - open.len());
    out.push_str(&wrap_trimmed(&body, open, close));
}
