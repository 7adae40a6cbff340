//! Structured mock model assembled from extracted interfaces.
//!
//! Built once per generation run and discarded after rendering; the
//! textual joining rules for parameter and return lists live here.

use std::fmt;

/// One parameter or result. `name` may be empty (unnamed) or a
/// comma-joined group (`"a,b"`) when several names share one declared
/// type — mirroring how the source groups them. `typ` is the fully
/// serialized type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub typ: String,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.typ)
        } else {
            write!(f, "{} {}", self.name, self.typ)
        }
    }
}

/// Ordered parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(pub Vec<Variable>);

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", a.join(","))
    }
}

impl Params {
    /// Name-only projection used to forward arguments in generated
    /// calls. A variadic parameter gets the spread suffix so the call
    /// expands the slice back into variadic arguments.
    pub fn names(&self) -> String {
        let names: Vec<String> = self
            .0
            .iter()
            .map(|v| {
                if !v.name.is_empty() && v.typ.starts_with("...") {
                    format!("{}...", v.name)
                } else {
                    v.name.clone()
                }
            })
            .collect();
        names.join(",")
    }
}

/// Ordered return list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Returns(pub Vec<Variable>);

impl Returns {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Returns {
    /// Parenthesized when there is more than one return value or any
    /// return value is named; a single unnamed return stays bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut brackets = self.0.len() > 1;
        let mut a = Vec::new();
        for r in &self.0 {
            a.push(r.to_string());
            if !brackets {
                brackets = !r.name.is_empty();
            }
        }
        let joined = a.join(",");
        if brackets {
            write!(f, "({joined})")
        } else {
            write!(f, "{joined}")
        }
    }
}

/// One interface method, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: Params,
    pub returns: Returns,
}

impl Method {
    pub fn args(&self) -> String {
        self.params.names()
    }
}

/// One mocked interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub name: String,
    pub methods: Vec<Method>,
}

/// Everything the renderer needs: destination package, verbatim import
/// specs, and the mocked interfaces in request order.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub package_name: String,
    pub imports: Vec<String>,
    pub structures: Vec<Structure>,
}
