//! Replacement edits over a token stream.

use specgen_core::TokenRange;
use std::fmt;

/// Replace the tokens in `range` with `text`.
///
/// Ranges are half-open token intervals; an empty `text` deletes the tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: TokenRange,
    pub text: String,
}

impl Edit {
    pub fn replace(range: TokenRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn delete(range: TokenRange) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }

    #[inline]
    pub fn is_deletion(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_deletion() {
            write!(f, "delete {}", self.range)
        } else {
            write!(f, "replace {} with {:?}", self.range, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let edit = Edit::replace(TokenRange::new(2, 5), "int");
        assert_eq!(edit.to_string(), "replace tokens 2..5 with \"int\"");
        assert!(Edit::delete(TokenRange::single(3)).is_deletion());
    }
}
