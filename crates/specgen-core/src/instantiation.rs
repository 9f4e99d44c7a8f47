//! A single concrete binding of a template's placeholders.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::syntax::Placeholder;
use crate::types::ConcreteType;

/// One expansion of a template: the concrete types bound to its placeholders
/// and the template it came from.
///
/// A template declaring one placeholder always yields instantiations with no
/// secondary binding; a template declaring two always yields instantiations
/// with both bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instantiation {
    pub primary: ConcreteType,
    pub secondary: Option<ConcreteType>,
    /// Template path, relative to the template root.
    pub template: PathBuf,
}

impl Instantiation {
    pub fn new(template: impl Into<PathBuf>, primary: ConcreteType) -> Self {
        Self {
            primary,
            secondary: None,
            template: template.into(),
        }
    }

    pub fn with_secondary(
        template: impl Into<PathBuf>,
        primary: ConcreteType,
        secondary: ConcreteType,
    ) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            template: template.into(),
        }
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    /// The binding of a placeholder slot, if that slot is bound.
    #[inline]
    pub fn resolve(&self, placeholder: Placeholder) -> Option<ConcreteType> {
        match placeholder {
            Placeholder::Primary => Some(self.primary),
            Placeholder::Secondary => self.secondary,
        }
    }

    #[inline]
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    #[inline]
    pub fn primary_is_generic(&self) -> bool {
        self.primary.is_generic()
    }

    #[inline]
    pub fn secondary_is_generic(&self) -> bool {
        self.secondary.is_some_and(ConcreteType::is_generic)
    }

    /// Whether any bound placeholder is generic.
    pub fn any_generic(&self) -> bool {
        self.primary_is_generic() || self.secondary_is_generic()
    }

    /// Whether every bound placeholder is generic.
    pub fn all_generic(&self) -> bool {
        self.primary_is_generic() && self.secondary.is_none_or(ConcreteType::is_generic)
    }

    /// Short label for logs and diagnostics, e.g. `Int, Long`.
    pub fn label(&self) -> String {
        match self.secondary {
            Some(secondary) => format!("{}, {}", self.primary.boxed_name(), secondary.boxed_name()),
            None => self.primary.boxed_name().to_string(),
        }
    }
}

impl fmt::Display for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.template.display(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_placeholder_resolution() {
        let inst = Instantiation::new("KTypeArrayList.java", ConcreteType::Int);
        assert_eq!(inst.resolve(Placeholder::Primary), Some(ConcreteType::Int));
        assert_eq!(inst.resolve(Placeholder::Secondary), None);
        assert!(!inst.has_secondary());
        assert!(!inst.any_generic());
    }

    #[test]
    fn generic_predicates() {
        let inst = Instantiation::with_secondary(
            "KTypeVTypeHashMap.java",
            ConcreteType::Int,
            ConcreteType::Generic,
        );
        assert!(inst.any_generic());
        assert!(!inst.all_generic());
        assert!(inst.secondary_is_generic());
        assert!(!inst.primary_is_generic());

        let both = Instantiation::with_secondary(
            "KTypeVTypeHashMap.java",
            ConcreteType::Generic,
            ConcreteType::Generic,
        );
        assert!(both.all_generic());

        let single = Instantiation::new("KTypeArrayList.java", ConcreteType::Generic);
        assert!(single.all_generic());
    }

    #[test]
    fn display_includes_template_and_bindings() {
        let inst = Instantiation::with_secondary(
            "maps/KTypeVTypeHashMap.java",
            ConcreteType::Int,
            ConcreteType::Long,
        );
        assert_eq!(inst.to_string(), "maps/KTypeVTypeHashMap.java [Int, Long]");
    }
}
