use bumpalo::Bump;
use specgen::{ConcreteType, Instantiation, SpecializeError, Template, TemplateSyntax, expand, specialize};
use std::path::Path;

fn specialize_all(path: &str, source: &str) -> Vec<(Instantiation, Result<String, SpecializeError>)> {
    let arena = Bump::new();
    let template = Template::parse(path, source, &arena, &TemplateSyntax::default()).unwrap();
    expand(Path::new(path), template.arity())
        .into_iter()
        .map(|inst| {
            let out = specialize(&template, &inst);
            (inst, out)
        })
        .collect()
}

fn specialize_one(path: &str, source: &str, primary: ConcreteType, secondary: Option<ConcreteType>) -> String {
    specialize_all(path, source)
        .into_iter()
        .find(|(inst, _)| inst.primary == primary && inst.secondary == secondary)
        .map(|(_, out)| out.unwrap())
        .unwrap()
}

#[test]
fn test_primitive_map_has_no_type_parameters() {
    let source = "public class KTypeVTypeHashMap<KType, VType> implements KTypeVTypeMap<KType, VType> {\n}\n";
    let out = specialize_one(
        "KTypeVTypeHashMap.java",
        source,
        ConcreteType::Int,
        Some(ConcreteType::Long),
    );
    assert_eq!(out, "public class IntLongHashMap implements IntLongMap {\n}\n");
}

#[test]
fn test_empty_key_table() {
    let source = "class KTypeSet<KType> { boolean empty(KType x) { return Intrinsics.isEmptyKey(x); } }";
    let expected = [
        (ConcreteType::Generic, "(x == null)"),
        (ConcreteType::Int, "(x == 0)"),
        (ConcreteType::Double, "(Double.doubleToLongBits(x) == 0L)"),
        (ConcreteType::Float, "(Float.floatToIntBits(x) == 0)"),
    ];
    for (ty, expr) in expected {
        let out = specialize_one("KTypeSet.java", source, ty, None);
        assert!(
            out.contains(&format!("return {expr};")),
            "{ty}: {out}"
        );
    }
}

#[test]
fn test_wildcard_elision() {
    let source = "class KTypeVTypeBox<KType, VType> {
    void forEach(KTypeProcedure<? super KType> p) {}
    void putAll(Iterable<? extends KTypeVTypeCursor<? extends KType, ? extends VType>> it) {}
    java.util.List<?> raw;
}";
    let out = specialize_one("KTypeVTypeBox.java", source, ConcreteType::Int, Some(ConcreteType::Generic));
    assert!(out.contains("void forEach(IntProcedure p) {}"), "{out}");
    assert!(
        out.contains("void putAll(Iterable<? extends IntObjectCursor<? extends VType>> it) {}"),
        "{out}"
    );
    assert!(out.contains("java.util.List<?> raw;"), "{out}");

    let out = specialize_one("KTypeVTypeBox.java", source, ConcreteType::Generic, Some(ConcreteType::Generic));
    assert!(out.contains("void forEach(ObjectProcedure<? super KType> p) {}"), "{out}");
    assert!(
        out.contains("void putAll(Iterable<? extends ObjectObjectCursor<? extends KType, ? extends VType>> it) {}"),
        "{out}"
    );
}

#[test]
fn test_unbounded_wildcards_on_own_class_follow_the_instantiation() {
    let source = "public class KTypeArrayList<KType> {
    protected boolean equalElements(KTypeArrayList<?> other) { return other.size() == 0; }
    public boolean equals(Object o) { return o instanceof KTypeArrayList<?> && equalElements((KTypeArrayList<?>) o); }
}";
    let out = specialize_one("KTypeArrayList.java", source, ConcreteType::Int, None);
    assert!(out.contains("protected boolean equalElements(IntArrayList other)"), "{out}");
    assert!(
        out.contains("return o instanceof IntArrayList && equalElements((IntArrayList) o);"),
        "{out}"
    );

    let out = specialize_one("KTypeArrayList.java", source, ConcreteType::Generic, None);
    assert!(out.contains("protected boolean equalElements(ObjectArrayList<?> other)"), "{out}");
    assert!(out.contains("o instanceof ObjectArrayList<?>"), "{out}");
}

#[test]
fn test_comparisons_and_casts_inside_bodies() {
    let source = "class KTypeSorter<KType> {
    static int pivot(KType[] a, int lo, int hi) {
        int mid = (lo + hi) >>> 1;
        if (lo < hi && Intrinsics.compare(a[lo], a[mid]) > 0) { return lo; }
        return mid;
    }
}";
    let out = specialize_one("KTypeSorter.java", source, ConcreteType::Char, None);
    assert!(out.contains("static int pivot(char[] a, int lo, int hi) {"), "{out}");
    assert!(out.contains("int mid = (lo + hi) >>> 1;"), "{out}");
    assert!(out.contains("if (lo < hi && Character.compare(a[lo], a[mid]) > 0) { return lo; }"), "{out}");

    let out = specialize_one("KTypeSorter.java", source, ConcreteType::Generic, None);
    assert!(
        out.contains("((Comparable<? super KType>) a[lo]).compareTo(a[mid]) > 0"),
        "{out}"
    );
}

#[test]
fn test_unhinted_intrinsic_in_two_placeholder_template_fails_every_instantiation() {
    let source = "class KTypeVTypeT<KType, VType> { Object e() { return Intrinsics.empty(); } }";
    let results = specialize_all("KTypeVTypeT.java", source);
    assert_eq!(results.len(), 64);
    for (inst, result) in results {
        let err = result.unwrap_err();
        assert!(matches!(err, SpecializeError::AmbiguousIntrinsic { .. }), "{inst}");
        assert!(!err.is_internal());
        assert_eq!(err.span().map(|s| s.line), Some(1));
    }
}

#[test]
fn test_specialization_is_deterministic() {
    let source = include_str!("../test_templates/com/example/maps/KTypeVTypeHashMap.java");
    let first = specialize_all("KTypeVTypeHashMap.java", source);
    let second = specialize_all("KTypeVTypeHashMap.java", source);
    assert_eq!(first, second);
}

#[test]
fn test_unrelated_source_passes_through() {
    let source = "// KType in a comment of a template that declares it.\nclass KTypeT<KType> {\n    String name = \"KType\";\n    int size() { return 0; }\n}\n";
    let out = specialize_one("KTypeT.java", source, ConcreteType::Long, None);
    assert_eq!(
        out,
        "// long in a comment of a template that declares it.\nclass LongT {\n    String name = \"KType\";\n    int size() { return 0; }\n}\n"
    );
}

// ============================================================================
// Non-overlap fuzzing
// ============================================================================

/// Deterministic xorshift64 generator.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn gen_type(rng: &mut XorShift, depth: u32) -> String {
    const LEAVES: [&str; 4] = ["KType", "VType", "String", "Integer"];
    if depth == 0 || rng.below(3) == 0 {
        return LEAVES[rng.below(LEAVES.len())].to_string();
    }
    let d = depth - 1;
    match rng.below(6) {
        0 => format!("KTypeCursor<{}>", gen_arg(rng, d)),
        1 => format!("KTypeVTypeMap<{}, {}>", gen_arg(rng, d), gen_arg(rng, d)),
        2 => format!("java.util.List<{}>", gen_arg(rng, d)),
        3 => format!("Map<{}, {}>", gen_arg(rng, d), gen_arg(rng, d)),
        4 => format!("VTypeBox<{}>", gen_arg(rng, d)),
        _ => format!("KTypeVTypeHashMap<{}, {}>", gen_arg(rng, d), gen_arg(rng, d)),
    }
}

fn gen_arg(rng: &mut XorShift, depth: u32) -> String {
    match rng.below(6) {
        0 => format!("? extends {}", gen_type(rng, depth)),
        1 => format!("? super {}", gen_type(rng, depth)),
        2 => "?".to_string(),
        _ => gen_type(rng, depth),
    }
}

fn gen_template(rng: &mut XorShift) -> String {
    const CREATORS: [&str; 3] = ["KTypeArrayList", "ArrayList", "KTypeVTypeHashMap"];
    let mut source = String::from(
        "public class KTypeVTypeFuzz<KType, VType extends Comparable<? super VType>>\n    extends KTypeVTypeBase<KType, VType> {\n",
    );
    for i in 0..4 {
        source.push_str(&format!("    {} field{i};\n", gen_type(rng, 3)));
    }
    for i in 0..4 {
        let creator = CREATORS[rng.below(CREATORS.len())];
        source.push_str(&format!(
            "    <T extends {bound}> {ret} method{i}({param} a, T b) {{\n        {local} local = new {creator}<>();\n        if (Intrinsics.<KType>equals(a, Intrinsics.<KType>cast(b))) {{ return this.<{targ}>id(local); }}\n        return Intrinsics.<VType>empty();\n    }}\n",
            bound = gen_type(rng, 2),
            ret = gen_type(rng, 3),
            param = gen_type(rng, 3),
            local = gen_type(rng, 3),
            targ = gen_type(rng, 1),
        ));
    }
    source.push_str("}\n");
    source
}

#[test]
fn test_nested_generic_signatures_never_overlap() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    for round in 0..24 {
        let source = gen_template(&mut rng);
        for (inst, result) in specialize_all("KTypeVTypeFuzz.java", &source) {
            let out = match result {
                Ok(out) => out,
                Err(err) => panic!("round {round}, {inst}: {err}\n{source}"),
            };
            assert!(!out.contains("Intrinsics"), "round {round}, {inst}:\n{out}");
            if !inst.any_generic() {
                assert!(
                    !out.contains("KType") && !out.contains("VType"),
                    "round {round}, {inst}:\n{out}"
                );
            }
        }
    }
}
