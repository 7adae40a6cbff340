use goparse::ast::{ChanDir, ImportName, InterfaceElem, LenExpr, Type};
use goparse::{parse_file, parse_type_expr};

fn assert_parses(src: &str) -> goparse::ast::SourceFile {
    match parse_file(src) {
        Ok(f) => f,
        Err(f) => panic!("expected parse ok, got diagnostics: {:#?}", f.diags),
    }
}

fn parse_type(src: &str) -> Type {
    match parse_type_expr(src) {
        Ok(t) => t,
        Err(f) => panic!("expected type parse ok, got diagnostics: {:#?}", f.diags),
    }
}

#[test]
fn parses_package_and_imports() {
    let file = assert_parses(
        r#"
package repository

import "fmt"

import (
    "strings"
    m "github.com/example/app/model"
    . "math"
    _ "net/http/pprof"
)
"#,
    );

    assert_eq!(file.package, "repository");
    assert_eq!(file.imports.len(), 5);
    assert_eq!(file.imports[0].path, "\"fmt\"");
    assert_eq!(file.imports[0].name, None);
    assert_eq!(
        file.imports[2].name,
        Some(ImportName::Name("m".to_string()))
    );
    assert_eq!(file.imports[3].name, Some(ImportName::Dot));
    assert_eq!(file.imports[4].name, Some(ImportName::Blank));
    assert_eq!(
        file.imports[2].text(),
        "m \"github.com/example/app/model\""
    );
}

#[test]
fn parses_interface_methods_in_order() {
    let file = assert_parses(
        r#"
package repository

type UserRepository interface {
    FindByID(id int) *User
    FindByIDs(ids []int) []*User
    RemoveByID(id int)
    Create(user *User)
}
"#,
    );

    assert_eq!(file.types.len(), 1);
    let decl = &file.types[0];
    assert_eq!(decl.name, "UserRepository");
    let Type::Interface { elems } = &decl.typ else {
        panic!("expected interface type, got {:?}", decl.typ);
    };
    let names: Vec<&str> = elems
        .iter()
        .map(|e| match e {
            InterfaceElem::Method(m) => m.name.as_str(),
            InterfaceElem::Embedded(_) => panic!("unexpected embedded element"),
        })
        .collect();
    assert_eq!(names, ["FindByID", "FindByIDs", "RemoveByID", "Create"]);
}

#[test]
fn groups_shared_parameter_names() {
    let file = assert_parses(
        "package p\n\ntype Adder interface {\n\tAdd(a, b int) int\n}\n",
    );
    let Type::Interface { elems } = &file.types[0].typ else {
        panic!("not an interface");
    };
    let InterfaceElem::Method(m) = &elems[0] else {
        panic!("not a method");
    };
    assert_eq!(m.sig.params.len(), 1);
    assert_eq!(m.sig.params[0].names, ["a", "b"]);
    assert_eq!(m.sig.results.len(), 1);
    assert!(m.sig.results[0].names.is_empty());
}

#[test]
fn unnamed_parameters_resolve_to_types() {
    let file = assert_parses(
        "package p\n\ntype Codec interface {\n\tEncode(int, string) error\n}\n",
    );
    let Type::Interface { elems } = &file.types[0].typ else {
        panic!("not an interface");
    };
    let InterfaceElem::Method(m) = &elems[0] else {
        panic!("not a method");
    };
    assert_eq!(m.sig.params.len(), 2);
    assert!(m.sig.params[0].names.is_empty());
    assert_eq!(
        m.sig.params[0].typ,
        Type::Named {
            pkg: None,
            name: "int".to_string(),
            args: Vec::new()
        }
    );
}

#[test]
fn skips_funcs_vars_and_consts() {
    let file = assert_parses(
        r#"
package p

const answer = 42

var (
    a = []int{1, 2, 3}
    b = map[string]int{"x": 1}
)

func helper(x int) int {
    type local struct{ y int }
    if x > 0 {
        return x
    }
    return -x
}

type Wanted interface {
    Do()
}
"#,
    );

    // The local type inside helper's body must not surface.
    assert_eq!(file.types.len(), 1);
    assert_eq!(file.types[0].name, "Wanted");
}

#[test]
fn parses_grouped_type_declarations() {
    let file = assert_parses(
        "package p\n\ntype (\n\tA int\n\tB interface{ M() }\n\tC = A\n)\n",
    );
    let names: Vec<&str> = file.types.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn skips_generic_type_parameters() {
    let file = assert_parses(
        "package p\n\ntype List[T any] struct {\n\thead *T\n}\n\ntype M interface{ Get() int }\n",
    );
    assert_eq!(file.types.len(), 2);
    assert_eq!(file.types[0].name, "List");
}

#[test]
fn channel_directions() {
    assert_eq!(
        parse_type("chan int"),
        Type::Chan {
            dir: ChanDir::Both,
            elem: Box::new(named("int")),
        }
    );
    assert_eq!(
        parse_type("chan<- int"),
        Type::Chan {
            dir: ChanDir::Send,
            elem: Box::new(named("int")),
        }
    );
    assert_eq!(
        parse_type("<-chan int"),
        Type::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(named("int")),
        }
    );
}

fn named(name: &str) -> Type {
    Type::Named {
        pkg: None,
        name: name.to_string(),
        args: Vec::new(),
    }
}

#[test]
fn array_lengths_preserve_expressions() {
    let t = parse_type("[3 + 2]byte");
    let Type::Array { len, elem } = t else {
        panic!("not an array");
    };
    assert_eq!(*elem, named("byte"));
    assert_eq!(
        len,
        LenExpr::Binary {
            left: Box::new(LenExpr::Lit("3".to_string())),
            op: "+".to_string(),
            right: Box::new(LenExpr::Lit("2".to_string())),
        }
    );

    let t = parse_type("[(4) * 2]byte");
    let Type::Array { len, .. } = t else {
        panic!("not an array");
    };
    assert_eq!(
        len,
        LenExpr::Binary {
            left: Box::new(LenExpr::Paren(Box::new(LenExpr::Lit("4".to_string())))),
            op: "*".to_string(),
            right: Box::new(LenExpr::Lit("2".to_string())),
        }
    );
}

#[test]
fn binary_length_precedence() {
    // 1 + 2*3 groups the multiplication under the addition.
    let Type::Array { len, .. } = parse_type("[1 + 2*3]byte") else {
        panic!("not an array");
    };
    let LenExpr::Binary { left, op, right } = len else {
        panic!("not a binary length");
    };
    assert_eq!(op, "+");
    assert_eq!(*left, LenExpr::Lit("1".to_string()));
    assert!(matches!(*right, LenExpr::Binary { .. }));
}

#[test]
fn nested_type_expression() {
    // func(<-chan *map[string][]int)
    let t = parse_type("func(<-chan *map[string][]int)");
    let Type::Func { sig } = t else {
        panic!("not a func type");
    };
    assert_eq!(sig.params.len(), 1);
    let Type::Chan { dir, elem } = &sig.params[0].typ else {
        panic!("not a chan");
    };
    assert_eq!(*dir, ChanDir::Recv);
    let Type::Pointer { elem } = elem.as_ref() else {
        panic!("not a pointer");
    };
    let Type::Map { key, value } = elem.as_ref() else {
        panic!("not a map");
    };
    assert_eq!(**key, named("string"));
    assert!(matches!(value.as_ref(), Type::Slice { .. }));
}

#[test]
fn variadic_and_qualified_types() {
    let t = parse_type("...model.User");
    let Type::Variadic { elem } = t else {
        panic!("not variadic");
    };
    assert_eq!(
        *elem,
        Type::Named {
            pkg: Some("model".to_string()),
            name: "User".to_string(),
            args: Vec::new(),
        }
    );
}

#[test]
fn inline_struct_fields() {
    let t = parse_type("struct {\n\ta, b int\n\tEmbedded\n}");
    let Type::Struct { fields } = t else {
        panic!("not a struct");
    };
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].names, ["a", "b"]);
    assert!(fields[1].names.is_empty());
}

#[test]
fn inline_interface_with_method() {
    let t = parse_type("interface {\n\tM(a int) (int, error)\n}");
    let Type::Interface { elems } = t else {
        panic!("not an interface");
    };
    let InterfaceElem::Method(m) = &elems[0] else {
        panic!("not a method");
    };
    assert_eq!(m.name, "M");
    assert_eq!(m.sig.results.len(), 2);
}

#[test]
fn embedded_interface_elements() {
    let file = assert_parses(
        "package p\n\ntype R interface {\n\tio.Reader\n\tExtra() int\n}\n",
    );
    let Type::Interface { elems } = &file.types[0].typ else {
        panic!("not an interface");
    };
    assert_eq!(elems.len(), 2);
    assert!(matches!(elems[0], InterfaceElem::Embedded(_)));
    assert!(matches!(elems[1], InterfaceElem::Method(_)));
}

#[test]
fn malformed_source_fails() {
    assert!(parse_file("package\n").is_err());
    assert!(parse_file("type T interface {}\n").is_err());
    assert!(parse_type_expr("map[string").is_err());
    assert!(parse_type_expr("int int").is_err());
}
