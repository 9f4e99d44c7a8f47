//! The catalog of concrete types a template can be specialized for.
//!
//! The catalog is closed: one generic/reference marker plus the seven
//! primitive numeric kinds. Every name a rewrite needs (the primitive keyword,
//! the boxed name used in generated class names, the wrapper class used for
//! static helpers) is derived from the variant, so no string tables are
//! consulted at specialization time.

use std::fmt;

/// A concrete type binding for a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConcreteType {
    /// Reference types. The placeholder stays a type variable.
    Generic,
    Byte,
    Char,
    Short,
    Int,
    Float,
    Long,
    Double,
}

impl ConcreteType {
    /// The full catalog in expansion order.
    pub const ALL: [ConcreteType; 8] = [
        ConcreteType::Generic,
        ConcreteType::Byte,
        ConcreteType::Char,
        ConcreteType::Short,
        ConcreteType::Int,
        ConcreteType::Float,
        ConcreteType::Long,
        ConcreteType::Double,
    ];

    /// Whether this is the generic/reference marker.
    #[inline]
    pub fn is_generic(self) -> bool {
        matches!(self, ConcreteType::Generic)
    }

    /// Whether this is a floating-point kind.
    #[inline]
    pub fn is_floating(self) -> bool {
        matches!(self, ConcreteType::Float | ConcreteType::Double)
    }

    /// Whether arithmetic on this kind is promoted to `int` and must be
    /// narrowed back explicitly.
    #[inline]
    pub fn is_narrow(self) -> bool {
        matches!(
            self,
            ConcreteType::Byte | ConcreteType::Char | ConcreteType::Short
        )
    }

    /// The primitive keyword, or `None` for [`ConcreteType::Generic`].
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            ConcreteType::Generic => None,
            ConcreteType::Byte => Some("byte"),
            ConcreteType::Char => Some("char"),
            ConcreteType::Short => Some("short"),
            ConcreteType::Int => Some("int"),
            ConcreteType::Float => Some("float"),
            ConcreteType::Long => Some("long"),
            ConcreteType::Double => Some("double"),
        }
    }

    /// The keyword used where a type name must be spelled out in prose
    /// (comments): the primitive keyword, or `Object` for generic bindings.
    pub fn type_name(self) -> &'static str {
        self.keyword().unwrap_or("Object")
    }

    /// The capitalized name used inside generated identifiers, such as the
    /// `Int` in `IntArrayList`.
    pub fn boxed_name(self) -> &'static str {
        match self {
            ConcreteType::Generic => "Object",
            ConcreteType::Byte => "Byte",
            ConcreteType::Char => "Char",
            ConcreteType::Short => "Short",
            ConcreteType::Int => "Int",
            ConcreteType::Float => "Float",
            ConcreteType::Long => "Long",
            ConcreteType::Double => "Double",
        }
    }

    /// The `java.lang` wrapper class hosting static helpers such as
    /// `compare`.
    pub fn wrapper_class(self) -> &'static str {
        match self {
            ConcreteType::Generic => "Object",
            ConcreteType::Byte => "Byte",
            ConcreteType::Char => "Character",
            ConcreteType::Short => "Short",
            ConcreteType::Int => "Integer",
            ConcreteType::Float => "Float",
            ConcreteType::Long => "Long",
            ConcreteType::Double => "Double",
        }
    }

    /// Look up a catalog entry by boxed name or keyword, ignoring case.
    pub fn from_name(name: &str) -> Option<ConcreteType> {
        ConcreteType::ALL.into_iter().find(|ty| {
            name.eq_ignore_ascii_case(ty.boxed_name())
                || ty.keyword().is_some_and(|kw| name.eq_ignore_ascii_case(kw))
                || (ty.is_generic() && name.eq_ignore_ascii_case("generic"))
        })
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Generic => write!(f, "generic"),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eight_distinct_entries() {
        let mut names: Vec<_> = ConcreteType::ALL.iter().map(|t| t.boxed_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
        assert_eq!(ConcreteType::ALL[0], ConcreteType::Generic);
    }

    #[test]
    fn generic_has_no_keyword() {
        assert_eq!(ConcreteType::Generic.keyword(), None);
        assert_eq!(ConcreteType::Generic.type_name(), "Object");
        assert!(ConcreteType::Generic.is_generic());
        assert!(ConcreteType::ALL[1..].iter().all(|t| t.keyword().is_some()));
    }

    #[test]
    fn derived_names() {
        assert_eq!(ConcreteType::Int.keyword(), Some("int"));
        assert_eq!(ConcreteType::Int.boxed_name(), "Int");
        assert_eq!(ConcreteType::Int.wrapper_class(), "Integer");
        assert_eq!(ConcreteType::Char.boxed_name(), "Char");
        assert_eq!(ConcreteType::Char.wrapper_class(), "Character");
    }

    #[test]
    fn predicates() {
        assert!(ConcreteType::Float.is_floating());
        assert!(ConcreteType::Double.is_floating());
        assert!(!ConcreteType::Long.is_floating());
        assert!(ConcreteType::Byte.is_narrow());
        assert!(ConcreteType::Short.is_narrow());
        assert!(!ConcreteType::Int.is_narrow());
    }

    #[test]
    fn from_name_accepts_keywords_and_boxed_names() {
        assert_eq!(ConcreteType::from_name("int"), Some(ConcreteType::Int));
        assert_eq!(ConcreteType::from_name("Long"), Some(ConcreteType::Long));
        assert_eq!(ConcreteType::from_name("object"), Some(ConcreteType::Generic));
        assert_eq!(ConcreteType::from_name("generic"), Some(ConcreteType::Generic));
        assert_eq!(ConcreteType::from_name("boolean"), None);
    }
}
