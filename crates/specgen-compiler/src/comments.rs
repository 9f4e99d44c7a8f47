//! Placeholder substitution inside comments.
//!
//! Comments are not parsed, so the rewrite is textual: a placeholder directly
//! followed by an uppercase letter is part of a class name and becomes the
//! boxed name (`KTypeCursor` to `IntCursor`); any other occurrence names the
//! type itself and becomes its keyword, or `Object` for generic bindings.

use specgen_core::{Instantiation, Placeholder, TemplateSyntax};
use std::borrow::Cow;

pub struct CommentRewriter<'a> {
    syntax: &'a TemplateSyntax,
    instantiation: &'a Instantiation,
}

impl<'a> CommentRewriter<'a> {
    pub fn new(syntax: &'a TemplateSyntax, instantiation: &'a Instantiation) -> Self {
        Self {
            syntax,
            instantiation,
        }
    }

    /// Rewrite one comment token. Unbound placeholders are left as written.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !self.syntax.mentions_placeholder(text) {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        'scan: while let Some(ch) = rest.chars().next() {
            for placeholder in Placeholder::BOTH {
                let Some(ty) = self.instantiation.resolve(placeholder) else {
                    continue;
                };
                let name = self.syntax.name(placeholder);
                if let Some(after) = rest.strip_prefix(name) {
                    let joined = after.chars().next().is_some_and(char::is_uppercase);
                    out.push_str(if joined { ty.boxed_name() } else { ty.type_name() });
                    rest = after;
                    continue 'scan;
                }
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgen_core::ConcreteType;

    fn rewrite(text: &str, instantiation: &Instantiation) -> String {
        let syntax = TemplateSyntax::default();
        CommentRewriter::new(&syntax, instantiation)
            .rewrite(text)
            .into_owned()
    }

    #[test]
    fn keyword_and_class_name_forms() {
        let inst = Instantiation::with_secondary("t.java", ConcreteType::Int, ConcreteType::Long);
        assert_eq!(
            rewrite("/** Maps KType keys to VType values; see KTypeCursor. */", &inst),
            "/** Maps int keys to long values; see IntCursor. */"
        );
    }

    #[test]
    fn generic_becomes_object() {
        let inst = Instantiation::new("t.java", ConcreteType::Generic);
        assert_eq!(
            rewrite("// KType[] buffer of KTypeArrayList", &inst),
            "// Object[] buffer of ObjectArrayList"
        );
    }

    #[test]
    fn unbound_secondary_is_untouched() {
        let inst = Instantiation::new("t.java", ConcreteType::Double);
        assert_eq!(rewrite("// KType and VType", &inst), "// double and VType");
    }

    #[test]
    fn untouched_comments_are_borrowed() {
        let syntax = TemplateSyntax::default();
        let inst = Instantiation::new("t.java", ConcreteType::Byte);
        let rewriter = CommentRewriter::new(&syntax, &inst);
        assert!(matches!(rewriter.rewrite("/* plain text */"), Cow::Borrowed(_)));
        assert_eq!(rewriter.rewrite("/* é KType */"), "/* é byte */");
    }
}
