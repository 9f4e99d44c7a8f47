//! Intrinsic call resolution.
//!
//! Templates express type-dependent operations as calls on the intrinsics
//! class, `Intrinsics.equals(a, b)` or `Intrinsics.<VType>equals(a, b)`.
//! Each call is replaced by the expression that implements it for the bound
//! type without boxing:
//!
//! | Intrinsic                   | Generic                         | float / double                    | other primitives  |
//! |-----------------------------|---------------------------------|-----------------------------------|-------------------|
//! | `isEmpty(v)`, `isEmptyKey`  | `(v == null)`                   | bit pattern `== 0`                | `(v == 0)`        |
//! | `empty()`, `defaultValue()` | `null`                          | `0f`, `0d`                        | `((int) 0)`       |
//! | `equals(a, b)`              | `java.util.Objects.equals(a, b)`| bit patterns compared             | `(a == b)`        |
//! | `equals(c, a, b)`           | `c.equals(a, b)`                | as above, `c` ignored             | as above          |
//! | `compare(a, b)`             | `Comparable` cast               | `Float.compare`, `Double.compare` | wrapper `compare` |
//! | `mix(v[, seed])`            | mixer over `Objects.hashCode`   | mixer over the bit pattern        | mixer over `v`    |
//! | `newArray(n)`               | `((T[]) new Object[n])`         | `new float[n]`                    | `new int[n]`      |
//! | `cast(v)`                   | `((T) v)`                       | `v`                               | `v`               |
//! | `add(a, b)`                 | error                           | `(a + b)`                         | narrowed sum      |
//! | `numeric(v)`                | error                           | `v`                               | `v`               |

use specgen_core::{ConcreteType, Placeholder, SpecializeError, Span};
use specgen_parser::TokenKind;
use specgen_parser::ast::{BodyElem, Expr, IntrinsicCall, TypeArg};

use crate::specializer::{Result, Specializer};
use crate::template::Arity;

/// A rendered intrinsic argument.
struct Operand {
    text: String,
    atomic: bool,
}

impl Operand {
    /// The operand as it may appear next to an operator.
    fn wrapped(&self) -> String {
        if self.atomic {
            self.text.clone()
        } else {
            format!("({})", self.text)
        }
    }
}

/// What a call resolves against.
struct Target {
    ty: ConcreteType,
    /// How generic code names the type: the hint as written, or the
    /// placeholder name.
    type_text: String,
}

impl<'a, 'ast> Specializer<'a, 'ast> {
    pub(crate) fn intrinsic(&mut self, call: &IntrinsicCall<'ast>) -> Result<()> {
        let text = self.resolve_intrinsic(call)?;
        self.push(call.range, text);
        Ok(())
    }

    /// The replacement text of an intrinsic call.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve_intrinsic(&self, call: &IntrinsicCall<'ast>) -> Result<String> {
        let call_text = self.text(call.range);
        let span = call.receiver.span;
        let target = self.intrinsic_target(call, &call_text, span)?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in call.args {
            args.push(Operand {
                text: self.render(arg.range, |s| s.elems(arg.elems))?,
                atomic: self.is_atomic(arg),
            });
        }

        let check_count = |allowed: &[usize], expected: &'static str| {
            if allowed.contains(&args.len()) {
                Ok(())
            } else {
                Err(SpecializeError::ArgumentCount {
                    call: call_text.clone(),
                    expected,
                    got: args.len(),
                    span,
                })
            }
        };
        let unsupported = || SpecializeError::UnsupportedForType {
            call: call_text.clone(),
            ty: target.ty,
            span,
        };

        let ty = target.ty;
        let t = target.type_text.as_str();
        let text = match call.name.name {
            "isEmpty" | "isEmptyKey" => {
                check_count(&[1], "1")?;
                let v = &args[0];
                match ty {
                    ConcreteType::Generic => format!("({} == null)", v.wrapped()),
                    ConcreteType::Float => format!("(Float.floatToIntBits({}) == 0)", v.text),
                    ConcreteType::Double => format!("(Double.doubleToLongBits({}) == 0L)", v.text),
                    _ => format!("({} == 0)", v.wrapped()),
                }
            }
            "empty" | "defaultValue" => {
                check_count(&[0], "0")?;
                match ty {
                    ConcreteType::Generic => "null".to_string(),
                    ConcreteType::Float => "0f".to_string(),
                    ConcreteType::Double => "0d".to_string(),
                    _ => format!("(({}) 0)", ty.type_name()),
                }
            }
            "equals" => {
                check_count(&[2, 3], "2 or 3")?;
                let (comparer, a, b) = match args.as_slice() {
                    [c, a, b] => (Some(c), a, b),
                    _ => (None, &args[0], &args[1]),
                };
                match (ty, comparer) {
                    (ConcreteType::Generic, Some(c)) => {
                        format!("{}.equals({}, {})", c.wrapped(), a.text, b.text)
                    }
                    (ConcreteType::Generic, None) => {
                        format!("java.util.Objects.equals({}, {})", a.text, b.text)
                    }
                    (ConcreteType::Float, _) => format!(
                        "(Float.floatToIntBits({}) == Float.floatToIntBits({}))",
                        a.text, b.text
                    ),
                    (ConcreteType::Double, _) => format!(
                        "(Double.doubleToLongBits({}) == Double.doubleToLongBits({}))",
                        a.text, b.text
                    ),
                    _ => format!("({} == {})", a.wrapped(), b.wrapped()),
                }
            }
            "compare" => {
                check_count(&[2], "2")?;
                let (a, b) = (&args[0], &args[1]);
                match ty {
                    ConcreteType::Generic => format!(
                        "((Comparable<? super {t}>) {}).compareTo({})",
                        a.wrapped(),
                        b.text
                    ),
                    _ => format!("{}.compare({}, {})", ty.wrapper_class(), a.text, b.text),
                }
            }
            "mix" => {
                check_count(&[1, 2], "1 or 2")?;
                let mixer = &self.syntax.mixer;
                let v = &args[0];
                let seed = args
                    .get(1)
                    .map(|seed| format!(" ^ {}", seed.wrapped()))
                    .unwrap_or_default();
                match ty {
                    ConcreteType::Generic => {
                        format!("{mixer}(java.util.Objects.hashCode({}){seed})", v.text)
                    }
                    ConcreteType::Float => format!("{mixer}(Float.floatToIntBits({}){seed})", v.text),
                    ConcreteType::Double => {
                        format!("{mixer}(Double.doubleToLongBits({}){seed})", v.text)
                    }
                    _ if seed.is_empty() => format!("{mixer}({})", v.text),
                    _ => format!("{mixer}({}{seed})", v.wrapped()),
                }
            }
            "newArray" => {
                check_count(&[1], "1")?;
                let n = &args[0].text;
                match ty {
                    ConcreteType::Generic => format!("(({t}[]) new Object[{n}])"),
                    _ => format!("new {}[{n}]", ty.type_name()),
                }
            }
            "cast" => {
                check_count(&[1], "1")?;
                let v = &args[0];
                match ty {
                    ConcreteType::Generic => format!("(({t}) {})", v.wrapped()),
                    _ => v.wrapped(),
                }
            }
            "add" => {
                check_count(&[2], "2")?;
                let (a, b) = (&args[0], &args[1]);
                match ty {
                    ConcreteType::Generic => return Err(unsupported()),
                    _ if ty.is_narrow() => {
                        format!("(({}) ({} + {}))", ty.type_name(), a.wrapped(), b.wrapped())
                    }
                    _ => format!("({} + {})", a.wrapped(), b.wrapped()),
                }
            }
            "numeric" => {
                check_count(&[1], "1")?;
                match ty {
                    ConcreteType::Generic => return Err(unsupported()),
                    _ => args[0].wrapped(),
                }
            }
            name => {
                return Err(SpecializeError::UnknownIntrinsic {
                    name: name.to_string(),
                    call: call_text.clone(),
                    span,
                });
            }
        };
        Ok(text)
    }

    /// Work out which placeholder a call is about.
    ///
    /// A hint must name a placeholder the template declares, optionally with
    /// array dimensions. Without a hint the call needs a single-placeholder
    /// template.
    fn intrinsic_target(
        &self,
        call: &IntrinsicCall<'ast>,
        call_text: &str,
        span: Span,
    ) -> Result<Target> {
        let placeholder = match &call.hint {
            Some(hint) => {
                let named = match hint.args {
                    [TypeArg::Type(ty)] => match ty.segments() {
                        [segment] if segment.args.is_none() => {
                            self.syntax.placeholder(segment.name.name)
                        }
                        _ => None,
                    },
                    _ => None,
                };
                let declared = named.filter(|&p| self.arity.declares(p));
                let unresolved = || SpecializeError::UnresolvedHint {
                    call: call_text.to_string(),
                    hint: self.text(hint.range),
                    span,
                };
                let placeholder = declared.ok_or_else(unresolved)?;
                let ty = self
                    .instantiation
                    .resolve(placeholder)
                    .ok_or_else(unresolved)?;
                let type_text = match hint.args {
                    [arg] => self.text(arg.range()),
                    _ => self.syntax.name(placeholder).to_string(),
                };
                return Ok(Target { ty, type_text });
            }
            None => match self.arity {
                Arity::One => Placeholder::Primary,
                Arity::Two => {
                    return Err(SpecializeError::AmbiguousIntrinsic {
                        call: call_text.to_string(),
                        span,
                    });
                }
            },
        };

        let ty = self.instantiation.resolve(placeholder).ok_or_else(|| {
            SpecializeError::UnresolvedHint {
                call: call_text.to_string(),
                hint: self.syntax.name(placeholder).to_string(),
                span,
            }
        })?;
        Ok(Target {
            ty,
            type_text: self.syntax.name(placeholder).to_string(),
        })
    }

    /// An argument needs no parentheses next to an operator when it has no
    /// operator of its own at the top level and does not start with a group
    /// (a cast or a parenthesized expression).
    fn is_atomic(&self, expr: &Expr<'ast>) -> bool {
        if matches!(expr.elems.first(), Some(BodyElem::Group(_))) {
            return false;
        }
        expr.elems.iter().all(|elem| match elem {
            BodyElem::Token(index) => self
                .unit
                .tokens
                .get(*index as usize)
                .is_some_and(|token| !is_operator(token.kind)),
            _ => true,
        })
    }
}

fn is_operator(kind: TokenKind) -> bool {
    !(kind.is_literal()
        || kind.is_primitive_type()
        || matches!(
            kind,
            TokenKind::Identifier
                | TokenKind::Dot
                | TokenKind::ColonColon
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::New
                | TokenKind::Class
        ))
}
