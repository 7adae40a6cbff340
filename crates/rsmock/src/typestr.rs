//! Type-expression serializer.
//!
//! Reconstructs the canonical source text of any type node reachable
//! from an interface method signature. The dispatch is an exhaustive
//! match over the closed [`Type`] enum; kinds the generator cannot emit
//! faithfully abort the run with [`Error::UnsupportedType`].

use crate::model::{Params, Returns, Variable};
use crate::Error;
use goparse::ast::{ChanDir, Field, InterfaceElem, LenExpr, Signature, Type};

/// Serialize one type expression.
pub fn type_text(t: &Type) -> Result<String, Error> {
    match t {
        Type::Named { pkg, name, args } => {
            if !args.is_empty() {
                return Err(Error::UnsupportedType {
                    kind: "generic type arguments",
                });
            }
            Ok(match pkg {
                Some(p) => format!("{p}.{name}"),
                None => name.clone(),
            })
        }

        Type::Pointer { elem } => Ok(format!("*{}", type_text(elem)?)),

        Type::Slice { elem } => Ok(format!("[]{}", type_text(elem)?)),

        Type::Array { len, elem } => Ok(format!("[{}]{}", len_text(len)?, type_text(elem)?)),

        Type::Map { key, value } => Ok(format!(
            "map[{}]{}",
            type_text(key)?,
            type_text(value)?
        )),

        Type::Chan { dir, elem } => {
            let prefix = match dir {
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
                ChanDir::Both => "chan ",
            };
            Ok(format!("{prefix}{}", type_text(elem)?))
        }

        Type::Struct { fields } => {
            let mut s = String::from("struct {\n");
            for field in fields {
                s.push_str(&field_variable(field)?.to_string());
                s.push('\n');
            }
            s.push('}');
            Ok(s)
        }

        Type::Interface { elems } => {
            let mut s = String::from("interface {\n");
            for elem in elems {
                let InterfaceElem::Method(m) = elem else {
                    continue;
                };
                let (params, returns) = signature_vars(&m.sig)?;
                s.push_str(&format!("{}({}){}", m.name, params, returns));
                s.push('\n');
            }
            s.push('}');
            Ok(s)
        }

        Type::Func { sig } => {
            let (params, returns) = signature_vars(sig)?;
            Ok(format!("func ({params}){returns}"))
        }

        Type::Variadic { elem } => Ok(format!("...{}", type_text(elem)?)),

        Type::Paren { .. } => Err(Error::UnsupportedType {
            kind: "parenthesized type",
        }),
    }
}

/// Reconstruct an array-length constant expression, preserving operator
/// text and grouping exactly as written.
pub fn len_text(len: &LenExpr) -> Result<String, Error> {
    match len {
        LenExpr::Lit(s) => Ok(s.clone()),
        LenExpr::Named(_) => Err(Error::UnsupportedType {
            kind: "named array length",
        }),
        LenExpr::Binary { left, op, right } => {
            Ok(format!("{} {} {}", len_text(left)?, op, len_text(right)?))
        }
        LenExpr::Paren(inner) => Ok(format!("({})", len_text(inner)?)),
    }
}

/// One [`Variable`] per declared field; grouped names stay comma-joined.
pub fn field_variable(field: &Field) -> Result<Variable, Error> {
    Ok(Variable {
        name: field.names.join(","),
        typ: type_text(&field.typ)?,
    })
}

/// Parameter and return variable lists of a signature.
pub fn signature_vars(sig: &Signature) -> Result<(Params, Returns), Error> {
    let mut params = Vec::new();
    for f in &sig.params {
        params.push(field_variable(f)?);
    }
    let mut returns = Vec::new();
    for f in &sig.results {
        returns.push(field_variable(f)?);
    }
    Ok((Params(params), Returns(returns)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use goparse::parse_type_expr;

    fn text_of(src: &str) -> String {
        let t = parse_type_expr(src).expect("parse");
        type_text(&t).expect("serialize")
    }

    /// Serialize, reparse, reserialize: the reparsed tree must be
    /// structurally identical and print identically.
    fn round_trip(src: &str) {
        let first = parse_type_expr(src).expect("parse");
        let text = type_text(&first).expect("serialize");
        let second = parse_type_expr(&text)
            .unwrap_or_else(|f| panic!("reparse of {text:?} failed: {:?}", f.diags));
        assert_eq!(first, second, "round-trip changed the tree for {src:?}");
        assert_eq!(text, type_text(&second).expect("reserialize"));
    }

    #[test]
    fn simple_and_qualified_names() {
        assert_eq!(text_of("int"), "int");
        assert_eq!(text_of("model.User"), "model.User");
    }

    #[test]
    fn composite_kinds() {
        assert_eq!(text_of("*User"), "*User");
        assert_eq!(text_of("[]int"), "[]int");
        assert_eq!(text_of("[4]byte"), "[4]byte");
        assert_eq!(text_of("map[string][]int"), "map[string][]int");
        assert_eq!(text_of("chan int"), "chan int");
        assert_eq!(text_of("chan<- int"), "chan<- int");
        assert_eq!(text_of("<-chan int"), "<-chan int");
        assert_eq!(text_of("...string"), "...string");
    }

    #[test]
    fn array_length_expressions_survive() {
        assert_eq!(text_of("[3 + 2]byte"), "[3 + 2]byte");
        assert_eq!(text_of("[(4) * 2]byte"), "[(4) * 2]byte");
        assert_eq!(text_of("[1 << 8]byte"), "[1 << 8]byte");
    }

    #[test]
    fn function_types_reuse_signature_rules() {
        assert_eq!(text_of("func(a int) error"), "func (a int)error");
        assert_eq!(
            text_of("func(a int) (int, error)"),
            "func (a int)(int,error)"
        );
        assert_eq!(text_of("func()"), "func ()");
    }

    #[test]
    fn inline_struct_and_interface() {
        assert_eq!(text_of("struct {\na, b int\n}"), "struct {\na,b int\n}");
        assert_eq!(
            text_of("interface {\nM(a int) (int, error)\n}"),
            "interface {\nM(a int)(int,error)\n}"
        );
        assert_eq!(text_of("interface{}"), "interface {\n}");
    }

    #[test]
    fn round_trips_every_supported_kind() {
        for src in [
            "int",
            "model.User",
            "*User",
            "[]*User",
            "[4]byte",
            "[3 + 2]byte",
            "[(4) * 2]byte",
            "map[string][]int",
            "chan int",
            "chan<- int",
            "<-chan int",
            "...int",
            "struct {\na,b int\nc string\n}",
            "interface {\nM(a int)(int,error)\nN()\n}",
            "func (a int)error",
            // a function type whose parameter is a channel of pointers
            // to a map of slices
            "func (ch chan *map[string][]int)(<-chan int)",
        ] {
            round_trip(src);
        }
    }

    #[test]
    fn unsupported_kinds_are_fatal() {
        let t = parse_type_expr("(int)").expect("parse");
        assert!(matches!(
            type_text(&t),
            Err(Error::UnsupportedType {
                kind: "parenthesized type"
            })
        ));

        let t = parse_type_expr("List[int]").expect("parse");
        assert!(matches!(
            type_text(&t),
            Err(Error::UnsupportedType {
                kind: "generic type arguments"
            })
        ));

        let t = parse_type_expr("[N]byte").expect("parse");
        assert!(matches!(
            type_text(&t),
            Err(Error::UnsupportedType {
                kind: "named array length"
            })
        ));
    }
}
