//! Cartesian expansion of a template over the type catalog.

use specgen_compiler::Arity;
use specgen_core::{ConcreteType, Instantiation};
use std::path::Path;

/// Every instantiation of a template, in catalog order.
///
/// One placeholder yields one instantiation per catalog entry. Two yield the
/// full cross product, primary-major: all secondaries for `Generic` first,
/// then all secondaries for `Byte`, and so on.
pub fn expand(template: &Path, arity: Arity) -> Vec<Instantiation> {
    match arity {
        Arity::One => ConcreteType::ALL
            .into_iter()
            .map(|primary| Instantiation::new(template, primary))
            .collect(),
        Arity::Two => ConcreteType::ALL
            .into_iter()
            .flat_map(|primary| {
                ConcreteType::ALL
                    .into_iter()
                    .map(move |secondary| Instantiation::with_secondary(template, primary, secondary))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn one_placeholder_covers_the_catalog() {
        let insts = expand(Path::new("KTypeArrayList.java"), Arity::One);
        assert_eq!(insts.len(), 8);
        assert!(insts.iter().all(|i| i.secondary.is_none()));
        let primaries: Vec<_> = insts.iter().map(|i| i.primary).collect();
        assert_eq!(primaries, ConcreteType::ALL);
    }

    #[test]
    fn two_placeholders_cross_product() {
        let insts = expand(Path::new("KTypeVTypeHashMap.java"), Arity::Two);
        assert_eq!(insts.len(), 64);

        let distinct: FxHashSet<_> = insts.iter().map(|i| (i.primary, i.secondary)).collect();
        assert_eq!(distinct.len(), 64);

        assert_eq!(insts[0].label(), "Object, Object");
        assert_eq!(insts[1].label(), "Object, Byte");
        assert_eq!(insts[8].label(), "Byte, Object");
        assert_eq!(insts[63].label(), "Double, Double");
        assert!(insts.iter().all(|i| i.template() == Path::new("KTypeVTypeHashMap.java")));
    }
}
