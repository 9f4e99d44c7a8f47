//! Names a template is written against.

/// One of the two placeholder slots a template may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    Primary,
    Secondary,
}

impl Placeholder {
    /// Both slots, primary first. Substitution always follows this order.
    pub const BOTH: [Placeholder; 2] = [Placeholder::Primary, Placeholder::Secondary];
}

/// The identifiers that carry meaning inside template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSyntax {
    /// Name of the primary placeholder type.
    pub primary: String,
    /// Name of the secondary placeholder type.
    pub secondary: String,
    /// Receiver class of intrinsic calls, as in `Intrinsics.equals(a, b)`.
    pub intrinsics_class: String,
    /// Fully qualified mixing function emitted by the `mix` intrinsic.
    pub mixer: String,
}

impl Default for TemplateSyntax {
    fn default() -> Self {
        Self {
            primary: "KType".to_string(),
            secondary: "VType".to_string(),
            intrinsics_class: "Intrinsics".to_string(),
            mixer: "BitMixer.mix".to_string(),
        }
    }
}

impl TemplateSyntax {
    /// The source name of a placeholder slot.
    pub fn name(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Primary => &self.primary,
            Placeholder::Secondary => &self.secondary,
        }
    }

    /// The slot an identifier names exactly, if any.
    pub fn placeholder(&self, ident: &str) -> Option<Placeholder> {
        Placeholder::BOTH
            .into_iter()
            .find(|&p| self.name(p) == ident)
    }

    /// Whether `text` contains any placeholder name as a substring.
    pub fn mentions_placeholder(&self, text: &str) -> bool {
        text.contains(self.primary.as_str()) || text.contains(self.secondary.as_str())
    }

    /// Whether `text` contains the given placeholder name as a substring.
    pub fn mentions(&self, text: &str, placeholder: Placeholder) -> bool {
        text.contains(self.name(placeholder))
    }
}
