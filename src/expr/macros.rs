//! Locating `{{expr}}` spans inside configuration text
//!
//! Only double braces open a macro. Single braces are ordinary text, since
//! `rtconfig.txt` uses them for its own purposes.

use crate::error::ExprError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of host text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Copied verbatim
    Text(&'a str),
    /// Source of one expression, without the braces
    Macro(&'a str),
}

/// A `{{` that does not open a valid macro
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedMacro<'a> {
    /// Host text from the offending `{{`, cut at the closing `}}` or the end of the line
    pub span: &'a str,
    pub error: ExprError,
}

/// Split `text` into literal text and macro sources, left to right
pub fn split_macros(text: &str) -> Result<Vec<Segment<'_>>, MalformedMacro<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }
        let opened = &rest[start..];
        let body = &opened[OPEN.len()..];
        let Some(end) = body.find(CLOSE) else {
            let line_end = opened.find('\n').unwrap_or(opened.len());
            return Err(MalformedMacro {
                span: opened[..line_end].trim_end_matches('\r'),
                error: ExprError::UnterminatedMacro,
            });
        };
        let source = &body[..end];
        if source.trim().is_empty() {
            return Err(MalformedMacro {
                span: &opened[..OPEN.len() + end + CLOSE.len()],
                error: ExprError::EmptyMacro,
            });
        }
        segments.push(Segment::Macro(source));
        rest = &body[end + CLOSE.len()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}
