//! Syntax tree for the Go subset this crate models.
//!
//! Only the constructs reachable from interface extraction are
//! represented: the package clause, import declarations, type
//! declarations, and the full type grammar that may appear in an
//! interface method signature. Everything else in a source file is
//! recognized and skipped by the parser.

/// A parsed source file.
///
/// Spec: `SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Package name from the package clause.
    pub package: String,
    /// Every import spec, in source order.
    pub imports: Vec<ImportSpec>,
    /// Every type declaration, in source order. Non-type declarations
    /// are skipped during parsing and do not appear here.
    pub types: Vec<TypeDecl>,
}

/// Import specification.
///
/// Spec: `ImportSpec = [ "." | PackageName ] ImportPath`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub name: Option<ImportName>,
    /// Path literal exactly as written, quotes included.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportName {
    /// Dot import: `import . "pkg"`
    Dot,
    /// Blank import: `import _ "pkg"`
    Blank,
    /// Named import: `import name "pkg"`
    Name(String),
}

impl ImportSpec {
    /// The import spec as it appeared in the source, suitable for
    /// re-emission inside an `import ( ... )` block.
    pub fn text(&self) -> String {
        match &self.name {
            None => self.path.clone(),
            Some(ImportName::Dot) => format!(". {}", self.path),
            Some(ImportName::Blank) => format!("_ {}", self.path),
            Some(ImportName::Name(n)) => format!("{} {}", n, self.path),
        }
    }
}

/// Type declaration: `type Name T` (aliases `type Name = T` are kept too;
/// declarations with type parameters are recorded with the parameter list
/// dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub typ: Type,
}

/// Type expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Named type: `Name`, `pkg.Name`, or an instantiation `Name[T]`.
    Named {
        pkg: Option<String>,
        name: String,
        /// Generic instantiation arguments; empty for plain names.
        args: Vec<Type>,
    },

    /// Pointer type: `*T`
    Pointer { elem: Box<Type> },

    /// Slice type: `[]T`
    Slice { elem: Box<Type> },

    /// Array type: `[N]T`
    Array { len: LenExpr, elem: Box<Type> },

    /// Map type: `map[K]V`
    Map { key: Box<Type>, value: Box<Type> },

    /// Channel type: `chan T`, `<-chan T`, or `chan<- T`
    Chan { dir: ChanDir, elem: Box<Type> },

    /// Struct type: `struct { ... }`
    Struct { fields: Vec<Field> },

    /// Interface type: `interface { ... }`
    Interface { elems: Vec<InterfaceElem> },

    /// Function type: `func(...) ...`
    Func { sig: Signature },

    /// Variadic parameter type: `...T`
    Variadic { elem: Box<Type> },

    /// Parenthesized type: `(T)`
    Paren { inner: Box<Type> },
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// Bidirectional: `chan T`
    Both,
    /// Send-only: `chan<- T`
    Send,
    /// Receive-only: `<-chan T`
    Recv,
}

/// Array-length constant expression.
///
/// Spec: `ArrayType = "[" ArrayLength "]" ElementType` where the length
/// is a constant expression. Literals, binary operations, and
/// parenthesized sub-expressions are modeled structurally; a named
/// constant is recorded as [`LenExpr::Named`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LenExpr {
    /// Integer or rune literal, exactly as written.
    Lit(String),
    /// Named constant (`N` or `pkg.N`).
    Named(String),
    /// Binary operation; `op` is the operator's source text.
    Binary {
        left: Box<LenExpr>,
        op: String,
        right: Box<LenExpr>,
    },
    /// Parenthesized sub-expression.
    Paren(Box<LenExpr>),
}

/// Function signature.
///
/// Spec: `Signature = Parameters [ Result ]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// Field in a parameter list, result list, or struct body.
///
/// Spec: `ParameterDecl = [ IdentifierList ] [ "..." ] Type`
///
/// Several names declared against one type (`a, b int`) stay grouped in
/// a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared names; empty for unnamed parameters/results and for
    /// embedded struct fields.
    pub names: Vec<String>,
    pub typ: Type,
    /// Struct tag, if any (struct fields only).
    pub tag: Option<String>,
}

/// Method specification inside an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub sig: Signature,
}

/// Interface element: a method or an embedded/constraint type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method(Method),
    /// Embedded interface or constraint term; not extractable as a
    /// method and skipped by consumers.
    Embedded(Type),
}
