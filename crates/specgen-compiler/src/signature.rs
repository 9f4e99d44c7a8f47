//! Placeholder rewriting in names, types and generic parameter lists.
//!
//! Rules, for a placeholder bound to a primitive:
//! - a type written as the bare placeholder becomes the primitive keyword;
//! - a type argument or wildcard bound naming the placeholder is dropped, and
//!   a list left empty disappears with its angle brackets;
//! - a type parameter named after the placeholder is dropped likewise;
//! - inside longer names the placeholder becomes the boxed name
//!   (`KTypeArrayList` to `IntArrayList`).
//!
//! A placeholder bound to `Generic` stays a type variable: parameters and
//! arguments naming it are kept, only name substrings change (to `Object`).

use specgen_core::{ConcreteType, Placeholder, TokenRange};
use specgen_parser::TokenKind;
use specgen_parser::ast::*;

use crate::specializer::{Result, Specializer};

/// Concrete types for the two placeholder slots, primary first.
type Bindings = [Option<ConcreteType>; 2];

impl<'a, 'ast> Specializer<'a, 'ast> {
    /// Rewrite an identifier in place.
    pub(crate) fn ident(&mut self, ident: &Ident<'ast>) {
        if let Some(text) = self.rewrite_ident(ident.name) {
            self.push(ident.range(), text);
        }
    }

    /// The replacement for an identifier, or `None` to keep it.
    ///
    /// An identifier that is exactly a placeholder becomes the keyword of a
    /// primitive binding. Anything else containing placeholders gets their
    /// boxed names substituted, primary first.
    pub fn rewrite_ident(&self, name: &str) -> Option<String> {
        if let Some(placeholder) = self.syntax.placeholder(name) {
            return self
                .instantiation
                .resolve(placeholder)
                .and_then(ConcreteType::keyword)
                .map(str::to_string);
        }
        if !self.syntax.mentions_placeholder(name) {
            return None;
        }
        let renamed = self.substitute(name, self.instance_bindings());
        (renamed != name).then_some(renamed)
    }

    pub(crate) fn qualified_name(&mut self, name: &QualifiedName<'ast>) {
        for segment in name.segments {
            self.ident(segment);
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn ty(&mut self, ty: &TypeRef<'ast>) -> Result<()> {
        self.annotations(ty.annotations)?;
        for segment in ty.segments() {
            self.class_segment(segment)?;
        }
        Ok(())
    }

    fn class_segment(&mut self, segment: &ClassSegment<'ast>) -> Result<()> {
        let name = segment.name.name;
        if self.syntax.placeholder(name).is_some() {
            self.ident(&segment.name);
        } else if self.syntax.mentions_placeholder(name) {
            let bindings = self.segment_bindings(name, segment.args.as_ref());
            let renamed = self.substitute(name, bindings);
            if renamed != name {
                self.push(segment.name.range(), renamed);
            }
        }

        if let Some(args) = &segment.args {
            self.type_args(args, Some(name))?;
        }
        Ok(())
    }

    /// Rewrite a type-argument list. `owner` is the class name the list
    /// belongs to; explicit method type arguments have none.
    pub(crate) fn type_args(&mut self, args: &TypeArgs<'ast>, owner: Option<&str>) -> Result<()> {
        if args.is_diamond() {
            if !self.keeps_diamond(owner) {
                self.push(args.range, "");
            }
            return Ok(());
        }

        let slots = self.owner_slots(owner);
        let dropped: Vec<bool> = args
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.is_dropped(arg, slots.get(i).copied()))
            .collect();

        if !dropped.contains(&true) {
            for arg in args.args {
                self.type_arg(arg)?;
            }
            return Ok(());
        }

        let mut kept = Vec::new();
        for (arg, _) in args.args.iter().zip(&dropped).filter(|(_, dropped)| !**dropped) {
            kept.push(self.render(arg.range(), |s| s.type_arg(arg))?);
        }
        self.push(args.range, angle_list(&kept));
        Ok(())
    }

    fn type_arg(&mut self, arg: &TypeArg<'ast>) -> Result<()> {
        match arg {
            TypeArg::Type(ty) => self.ty(ty),
            TypeArg::Wildcard(wildcard) => match &wildcard.bound {
                Some(bound) => self.ty(&bound.ty),
                None => Ok(()),
            },
        }
    }

    // ========================================================================
    // Type Parameters
    // ========================================================================

    pub(crate) fn type_params(&mut self, params: &TypeParams<'ast>) -> Result<()> {
        if !params.params.iter().any(|p| self.is_dropped_param(p)) {
            for param in params.params {
                self.type_param(param)?;
            }
            return Ok(());
        }

        let mut kept = Vec::new();
        for param in params.params.iter().filter(|p| !self.is_dropped_param(p)) {
            kept.push(self.render(param.range, |s| s.type_param(param))?);
        }
        let range = if kept.is_empty() {
            self.absorb_separator(params.range)
        } else {
            params.range
        };
        self.push(range, angle_list(&kept));
        Ok(())
    }

    /// Extend a range that is about to vanish over the whitespace after it
    /// when whitespace also precedes it, so `static <K> K` loses one gap.
    fn absorb_separator(&self, range: TokenRange) -> TokenRange {
        let tokens = self.unit.tokens;
        let is_space = |index: u32| {
            tokens
                .get(index as usize)
                .is_some_and(|t| t.kind == TokenKind::Whitespace)
        };
        if range.start > 0 && is_space(range.start - 1) && is_space(range.end) {
            TokenRange::new(range.start, range.end + 1)
        } else {
            range
        }
    }

    fn type_param(&mut self, param: &TypeParam<'ast>) -> Result<()> {
        self.annotations(param.annotations)?;
        self.ident(&param.name);
        for bound in param.bounds {
            self.ty(bound)?;
        }
        Ok(())
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    fn instance_bindings(&self) -> Bindings {
        Placeholder::BOTH.map(|p| self.instantiation.resolve(p))
    }

    /// Bindings for the placeholders inside a class name.
    ///
    /// With type arguments, the placeholders found in the name take the
    /// arguments in order, primary first: `KTypeVTypeMap<KType, Foo>` binds
    /// `KType` to the primary's type and `VType` to `Generic`. Placeholders
    /// left without an argument, or given a wildcard that names none, use
    /// the instantiation.
    fn segment_bindings(&self, name: &str, args: Option<&TypeArgs<'ast>>) -> Bindings {
        let args = args.map_or(&[][..], |a| a.args);
        let mut next = 0;
        Placeholder::BOTH.map(|p| {
            if !self.syntax.mentions(name, p) {
                return None;
            }
            let binding = match args.get(next) {
                Some(arg) => self.arg_binding(arg, p),
                None => self.instantiation.resolve(p),
            };
            next += 1;
            binding
        })
    }

    fn arg_binding(&self, arg: &TypeArg<'ast>, slot: Placeholder) -> Option<ConcreteType> {
        match self.arg_placeholder(arg) {
            Some(p) => Some(self.instantiation.resolve(p).unwrap_or(ConcreteType::Generic)),
            None if is_wildcard(arg) => self.instantiation.resolve(slot),
            None => Some(ConcreteType::Generic),
        }
    }

    /// Placeholders named by a class name, in argument order.
    fn owner_slots(&self, owner: Option<&str>) -> Vec<Placeholder> {
        owner.map_or_else(Vec::new, |name| {
            Placeholder::BOTH
                .into_iter()
                .filter(|&p| self.syntax.mentions(name, p))
                .collect()
        })
    }

    /// The placeholder a type argument names: `KType`, `? extends KType` or
    /// `? super KType`.
    fn arg_placeholder(&self, arg: &TypeArg<'ast>) -> Option<Placeholder> {
        let ty = match arg {
            TypeArg::Type(ty) => ty,
            TypeArg::Wildcard(wildcard) => &wildcard.bound.as_ref()?.ty,
        };
        self.syntax.placeholder(ty.as_simple_name()?.name)
    }

    fn is_primitive(&self, placeholder: Placeholder) -> bool {
        self.instantiation
            .resolve(placeholder)
            .is_some_and(|t| !t.is_generic())
    }

    /// An argument naming a primitive-bound placeholder is dropped, and so
    /// is a wildcard standing in a slot of the owner's name that is bound to
    /// a primitive (`KTypeList<?>` for `Int` is `IntList`).
    fn is_dropped(&self, arg: &TypeArg<'ast>, slot: Option<Placeholder>) -> bool {
        match self.arg_placeholder(arg) {
            Some(p) => self.is_primitive(p),
            None => is_wildcard(arg) && slot.is_some_and(|p| self.is_primitive(p)),
        }
    }

    fn is_dropped_param(&self, param: &TypeParam<'ast>) -> bool {
        self.syntax
            .placeholder(param.name.name)
            .is_some_and(|p| self.is_primitive(p))
    }

    /// A diamond survives unless every placeholder in its owner's name is
    /// bound to a primitive.
    fn keeps_diamond(&self, owner: Option<&str>) -> bool {
        let Some(owner) = owner else {
            return true;
        };
        let mut mentioned = Placeholder::BOTH
            .into_iter()
            .filter(|&p| self.syntax.mentions(owner, p))
            .peekable();
        if mentioned.peek().is_none() {
            return true;
        }
        !mentioned.all(|p| self.is_primitive(p))
    }

    /// Replace placeholder substrings with boxed names, primary first.
    fn substitute(&self, name: &str, bindings: Bindings) -> String {
        let mut out = name.to_string();
        for (placeholder, binding) in Placeholder::BOTH.into_iter().zip(bindings) {
            if let Some(ty) = binding {
                out = out.replace(self.syntax.name(placeholder), ty.boxed_name());
            }
        }
        out
    }
}

fn is_wildcard(arg: &TypeArg<'_>) -> bool {
    matches!(arg, TypeArg::Wildcard(_))
}

fn angle_list(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("<{}>", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Arity, Template};
    use bumpalo::Bump;
    use specgen_core::ConcreteType::*;
    use specgen_core::{Instantiation, TemplateSyntax};

    /// Specialize the type of the first field in `class KTypeVTypeT<KType, VType> { <ty> f; }`.
    fn field_type(ty: &str, primary: ConcreteType, secondary: ConcreteType) -> String {
        let source = format!("class KTypeVTypeT<KType, VType> {{ {ty} f; }}");
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeVTypeT.java", &source, &arena, &syntax).unwrap();
        let inst = Instantiation::with_secondary("KTypeVTypeT.java", primary, secondary);
        let spec = Specializer::new(template.unit(), &syntax, Arity::Two, &inst);
        let Member::Field(field) = template.unit().types[0].body.members[0] else {
            panic!("expected field");
        };
        spec.render(field.ty.range, |s| s.ty(&field.ty)).unwrap()
    }

    #[test]
    fn bare_placeholders() {
        assert_eq!(field_type("KType", Int, Long), "int");
        assert_eq!(field_type("VType[][]", Int, Long), "long[][]");
        assert_eq!(field_type("KType", Generic, Long), "KType");
    }

    #[test]
    fn class_names_map_onto_arguments() {
        assert_eq!(field_type("KTypeVTypeMap<KType, VType>", Int, Long), "IntLongMap");
        // Positional: VType in the name takes the first argument when
        // the name has no KType.
        assert_eq!(field_type("VTypeCursor<VType>", Int, Long), "LongCursor");
        assert_eq!(field_type("KTypeCursor<VType>", Int, Long), "LongCursor");
        assert_eq!(field_type("KTypeCursor<String>", Int, Long), "ObjectCursor<String>");
        assert_eq!(
            field_type("KTypeVTypeMap<KType, VType>", Generic, Double),
            "ObjectDoubleMap<KType>"
        );
    }

    #[test]
    fn names_without_arguments_use_the_instantiation() {
        assert_eq!(field_type("KTypeVTypeCursor", Byte, Short), "ByteShortCursor");
        assert_eq!(field_type("KTypeVTypeHashMap.Entry", Char, Float), "CharFloatHashMap.Entry");
    }

    #[test]
    fn wildcards() {
        assert_eq!(field_type("KTypeProcedure<? super KType>", Int, Long), "IntProcedure");
        assert_eq!(
            field_type("KTypeProcedure<? super KType>", Generic, Long),
            "ObjectProcedure<? super KType>"
        );
        assert_eq!(field_type("Iterator<? extends VType>", Generic, Double), "Iterator");
        assert_eq!(field_type("List<?>", Int, Long), "List<?>");
    }

    #[test]
    fn wildcards_in_placeholder_slots_follow_the_instantiation() {
        assert_eq!(field_type("KTypeArrayList<?>", Int, Long), "IntArrayList");
        assert_eq!(field_type("KTypeArrayList<?>", Generic, Long), "ObjectArrayList<?>");
        assert_eq!(field_type("KTypeCursor<? extends Number>", Short, Long), "ShortCursor");
        assert_eq!(field_type("KTypeVTypeMap<?, ?>", Int, Generic), "IntObjectMap<?>");
        assert_eq!(
            field_type("KTypeVTypeMap<?, ? extends VType>", Generic, Generic),
            "ObjectObjectMap<?, ? extends VType>"
        );
        assert_eq!(field_type("KTypeCursor<String>", Int, Long), "ObjectCursor<String>");
    }

    #[test]
    fn dropped_method_type_params_leave_one_space() {
        let source = "class KTypeT<KType> {\n    public static <KType> KTypeT<KType> of(KType v) { return null; }\n}";
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeT.java", source, &arena, &syntax).unwrap();
        let inst = Instantiation::new("KTypeT.java", Int);
        let out = crate::specialize(&template, &inst).unwrap();
        assert_eq!(
            out,
            "class IntT {\n    public static IntT of(int v) { return null; }\n}"
        );
    }

    #[test]
    fn nested_arguments() {
        assert_eq!(
            field_type("Map<String, KTypeCursor<KType>>", Int, Long),
            "Map<String, IntCursor>"
        );
        assert_eq!(
            field_type("Iterator<KTypeVTypeCursor<KType, VType>>", Float, Generic),
            "Iterator<FloatObjectCursor<VType>>"
        );
        assert_eq!(
            field_type("KTypeVTypeMap<KType, List<VType>>", Int, Long),
            "IntObjectMap<List>"
        );
    }

    #[test]
    fn diamonds() {
        let source = "class KTypeVTypeT<KType, VType> { void m() {
            a = new KTypeArrayList<>();
            b = new ArrayList<>();
            c = new KTypeVTypeHashMap<>();
        } }";
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeVTypeT.java", source, &arena, &syntax).unwrap();

        let inst = Instantiation::with_secondary("KTypeVTypeT.java", Int, Generic);
        let out = crate::specialize(&template, &inst).unwrap();
        assert!(out.contains("a = new IntArrayList();"));
        assert!(out.contains("b = new ArrayList<>();"));
        assert!(out.contains("c = new IntObjectHashMap<>();"));

        let inst = Instantiation::with_secondary("KTypeVTypeT.java", Int, Long);
        let out = crate::specialize(&template, &inst).unwrap();
        assert!(out.contains("c = new IntLongHashMap();"));
    }

    #[test]
    fn method_type_params_and_bounds() {
        let source = "class KTypeT<KType> {
    public <T extends KTypeProcedure<? super KType>> T forEach(T procedure) { return procedure; }
    static <KType> KType identity(KType v) { return this.<KType>id(v); }
}";
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeT.java", source, &arena, &syntax).unwrap();
        let inst = Instantiation::new("KTypeT.java", Long);
        let out = crate::specialize(&template, &inst).unwrap();
        assert_eq!(
            out,
            "class LongT {
    public <T extends LongProcedure> T forEach(T procedure) { return procedure; }
    static long identity(long v) { return this.id(v); }
}"
        );
    }

    #[test]
    fn partially_dropped_type_params_keep_bounds() {
        let source = "class KTypeVTypeT<KType, VType extends Comparable<? super VType>> {}";
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeVTypeT.java", source, &arena, &syntax).unwrap();
        let inst = Instantiation::with_secondary("KTypeVTypeT.java", Int, Generic);
        let out = crate::specialize(&template, &inst).unwrap();
        assert_eq!(out, "class IntObjectT<VType extends Comparable<? super VType>> {}");
    }

    #[test]
    fn identifiers() {
        let arena = Bump::new();
        let syntax = TemplateSyntax::default();
        let template = Template::parse("KTypeT.java", "class KTypeT<KType> {}", &arena, &syntax).unwrap();
        let inst = Instantiation::new("KTypeT.java", Double);
        let spec = Specializer::new(template.unit(), &syntax, Arity::One, &inst);
        assert_eq!(spec.rewrite_ident("KType").as_deref(), Some("double"));
        assert_eq!(spec.rewrite_ident("newKTypeBuffer").as_deref(), Some("newDoubleBuffer"));
        assert_eq!(spec.rewrite_ident("VType"), None);
        assert_eq!(spec.rewrite_ident("size"), None);
    }
}
