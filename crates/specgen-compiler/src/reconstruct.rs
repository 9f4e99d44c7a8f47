//! Token-stream reconstruction.
//!
//! Output text is the token stream with edits spliced in. Tokens outside any
//! edit are copied verbatim, except comments, which go through the
//! [`CommentRewriter`].

use specgen_core::{SpecializeError, TokenRange};
use specgen_parser::{Channel, Token};

use crate::comments::CommentRewriter;
use crate::edit::Edit;

/// Rebuild the text of `range`, applying `edits`.
///
/// Every edit must lie inside `range` and no two edits may share a token.
/// Either violation means the rewriter produced a bad edit set and is
/// reported as an internal error.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn reconstruct(
    tokens: &[Token<'_>],
    range: TokenRange,
    mut edits: Vec<Edit>,
    comments: &CommentRewriter<'_>,
) -> Result<String, SpecializeError> {
    edits.sort_by_key(|e| (e.range.start, e.range.end));
    check_edits(&edits, range)?;

    let mut out = String::new();
    let mut cursor = range.start;
    for edit in &edits {
        copy_tokens(&mut out, tokens, TokenRange::new(cursor, edit.range.start), comments);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    copy_tokens(&mut out, tokens, TokenRange::new(cursor, range.end), comments);
    Ok(out)
}

fn check_edits(edits: &[Edit], range: TokenRange) -> Result<(), SpecializeError> {
    let mut previous: Option<&Edit> = None;
    for edit in edits {
        if !range.contains(edit.range) {
            return Err(SpecializeError::EditOutOfRange {
                edit: edit.range,
                range,
            });
        }
        if let Some(prev) = previous {
            if edit.range.start < prev.range.end {
                return Err(SpecializeError::OverlappingEdits {
                    first: prev.range,
                    second: edit.range,
                });
            }
        }
        previous = Some(edit);
    }
    Ok(())
}

fn copy_tokens(out: &mut String, tokens: &[Token<'_>], range: TokenRange, comments: &CommentRewriter<'_>) {
    let end = (range.end as usize).min(tokens.len());
    let start = (range.start as usize).min(end);
    for token in &tokens[start..end] {
        match token.channel() {
            Channel::Comment => out.push_str(&comments.rewrite(token.lexeme)),
            Channel::Code | Channel::Whitespace => out.push_str(token.lexeme),
        }
    }
}
