//! The annotated syntax tree a program loader hands to the scanner.
//!
//! The shapes mirror Go's syntax: declarations, specs, statements and
//! expressions are closed, internally tagged enums so a loader can emit
//! them as JSON. Symbol and type facts live beside the tree in
//! [`TypeInfo`], keyed by the [`NodeId`] of the expression or identifier
//! they describe.
//!
//! Every category carries an `Unrecognized` variant. It only exists so a
//! loader that emits a node kind this crate does not know about still
//! deserializes; the walker rejects it.

use crate::ast::{NodeId, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set of compilation units belonging to one Go package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub path: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub errors: Vec<LoadError>,
}

/// A problem the loader hit while parsing or type-checking a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub position: Option<String>,
    pub message: String,
}

/// One source file: its declarations plus the loader's resolution tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub filename: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
    #[serde(default)]
    pub info: TypeInfo,
}

/// Symbol uses and expression types, keyed by node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub uses: HashMap<NodeId, Symbol>,
    #[serde(default)]
    pub types: HashMap<NodeId, TypeAndValue>,
}

impl TypeInfo {
    pub fn symbol(&self, id: NodeId) -> Option<&Symbol> {
        self.uses.get(&id)
    }

    pub fn type_of(&self, id: NodeId) -> Option<&TypeAndValue> {
        self.types.get(&id)
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decl")]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub span: Span,
    #[serde(default)]
    pub recv: Vec<Field>,
    pub name: Ident,
    pub ty: FuncType,
    #[serde(default)]
    pub body: Option<Block>,
}

/// An `import`, `const`, `type` or `var` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenDecl {
    pub span: Span,
    pub tok: DeclToken,
    #[serde(default)]
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclToken {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "spec")]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub span: Span,
    #[serde(default)]
    pub name: Option<Ident>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub span: Span,
    #[serde(default)]
    pub names: Vec<Ident>,
    #[serde(default)]
    pub ty: Option<Expr>,
    #[serde(default)]
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub span: Span,
    pub name: Ident,
    #[serde(default)]
    pub type_params: Vec<Field>,
    /// `type A = B` rather than `type A B`
    #[serde(default)]
    pub alias: bool,
    pub ty: Expr,
}

/// A parameter, result, struct field, interface element or type parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub names: Vec<Ident>,
    pub ty: Expr,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub span: Span,
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub span: Span,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { span, kind }
    }

    pub fn is_return(&self) -> bool {
        matches!(self.kind, StmtKind::Return { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt")]
pub enum StmtKind {
    Decl {
        decl: GenDecl,
    },
    Empty,
    Labeled {
        label: Ident,
        body: Box<Stmt>,
    },
    Expr {
        x: Expr,
    },
    Send {
        chan: Expr,
        value: Expr,
    },
    IncDec {
        x: Expr,
        #[serde(default)]
        inc: bool,
    },
    Assign {
        lhs: Vec<Expr>,
        op: AssignOp,
        rhs: Vec<Expr>,
    },
    Go {
        call: Expr,
    },
    Defer {
        call: Expr,
    },
    Return {
        #[serde(default)]
        results: Vec<Expr>,
    },
    Branch {
        tok: BranchToken,
        #[serde(default)]
        label: Option<Ident>,
    },
    Block(Block),
    If {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Block,
        #[serde(default)]
        els: Option<Box<Stmt>>,
    },
    /// A `case` or `default` clause of an expression or type switch.
    Case {
        #[serde(default)]
        list: Vec<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
    },
    Switch {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        #[serde(default)]
        tag: Option<Expr>,
        body: Block,
    },
    TypeSwitch {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        assign: Box<Stmt>,
        body: Block,
    },
    /// A `case` or `default` clause of a select statement.
    Comm {
        #[serde(default)]
        comm: Option<Box<Stmt>>,
        #[serde(default)]
        body: Vec<Stmt>,
    },
    Select {
        body: Block,
    },
    For {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        #[serde(default)]
        cond: Option<Expr>,
        #[serde(default)]
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        #[serde(default)]
        key: Option<Expr>,
        #[serde(default)]
        value: Option<Expr>,
        x: Expr,
        body: Block,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = ":=")]
    Define,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Sub,
    #[serde(rename = "*=")]
    Mul,
    #[serde(rename = "/=")]
    Quo,
    #[serde(rename = "%=")]
    Rem,
    #[serde(rename = "&=")]
    And,
    #[serde(rename = "|=")]
    Or,
    #[serde(rename = "^=")]
    Xor,
    #[serde(rename = "<<=")]
    Shl,
    #[serde(rename = ">>=")]
    Shr,
    #[serde(rename = "&^=")]
    AndNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchToken {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression with source location and unique ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, id: NodeId) -> Self {
        Self { id, span, kind }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren { x } = &expr.kind {
            expr = x;
        }
        expr
    }

    /// The name of a bare identifier, if this is one.
    pub fn ident_name(&self) -> Option<&str> {
        match &self.unparen().kind {
            ExprKind::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// Reports whether a bare identifier called `name` occurs anywhere in
    /// this expression. Selected member names do not count: `p.T`
    /// mentions `p`, not `T`.
    pub fn mentions(&self, name: &str) -> bool {
        let any = |exprs: &[Expr]| exprs.iter().any(|e| e.mentions(name));
        let opt = |expr: &Option<Box<Expr>>| expr.as_deref().is_some_and(|e| e.mentions(name));
        let fields = |fields: &[Field]| fields.iter().any(|f| f.ty.mentions(name));

        match &self.kind {
            ExprKind::Ident { name: ident } => ident == name,
            ExprKind::Ellipsis { elt } => opt(elt),
            ExprKind::BasicLit { .. } | ExprKind::Unrecognized => false,
            ExprKind::FuncLit { ty, .. } | ExprKind::FuncType(ty) => ty.mentions(name),
            ExprKind::CompositeLit { ty, elts } => opt(ty) || any(elts),
            ExprKind::Paren { x }
            | ExprKind::Selector { x, .. }
            | ExprKind::Star { x }
            | ExprKind::Unary { x, .. } => x.mentions(name),
            ExprKind::Index { x, index } => x.mentions(name) || index.mentions(name),
            ExprKind::IndexList { x, indices } => x.mentions(name) || any(indices),
            ExprKind::Slice {
                x, low, high, max, ..
            } => x.mentions(name) || opt(low) || opt(high) || opt(max),
            ExprKind::TypeAssert { x, ty } => x.mentions(name) || opt(ty),
            ExprKind::Call { fun, args, .. } => fun.mentions(name) || any(args),
            ExprKind::Binary { x, y, .. } => x.mentions(name) || y.mentions(name),
            ExprKind::KeyValue { key, value } => key.mentions(name) || value.mentions(name),
            ExprKind::ArrayType { len, elt } => opt(len) || elt.mentions(name),
            ExprKind::StructType { fields: fs } | ExprKind::InterfaceType { methods: fs } => {
                fields(fs)
            }
            ExprKind::MapType { key, value } => key.mentions(name) || value.mentions(name),
            ExprKind::ChanType { value, .. } => value.mentions(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr")]
pub enum ExprKind {
    Ident {
        name: String,
    },
    /// `...T` in a variadic parameter list or `[...]T` array length
    Ellipsis {
        #[serde(default)]
        elt: Option<Box<Expr>>,
    },
    BasicLit {
        kind: LitKind,
        value: String,
    },
    FuncLit {
        ty: FuncType,
        body: Block,
    },
    CompositeLit {
        #[serde(default)]
        ty: Option<Box<Expr>>,
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Paren {
        x: Box<Expr>,
    },
    Selector {
        x: Box<Expr>,
        sel: Ident,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
    IndexList {
        x: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        x: Box<Expr>,
        #[serde(default)]
        low: Option<Box<Expr>>,
        #[serde(default)]
        high: Option<Box<Expr>>,
        #[serde(default)]
        max: Option<Box<Expr>>,
        #[serde(default)]
        slice3: bool,
    },
    /// `x.(T)`; `ty` is absent in a type switch guard `x.(type)`
    TypeAssert {
        x: Box<Expr>,
        #[serde(default)]
        ty: Option<Box<Expr>>,
    },
    Call {
        fun: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        ellipsis: bool,
    },
    Star {
        x: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        x: Box<Expr>,
    },
    Binary {
        x: Box<Expr>,
        op: BinaryOp,
        y: Box<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ArrayType {
        #[serde(default)]
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },
    StructType {
        #[serde(default)]
        fields: Vec<Field>,
    },
    FuncType(FuncType),
    InterfaceType {
        #[serde(default)]
        methods: Vec<Field>,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType {
        dir: ChanDir,
        value: Box<Expr>,
    },
    #[serde(other)]
    Unrecognized,
}

/// The signature part shared by function declarations, literals and types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuncType {
    #[serde(default)]
    pub type_params: Vec<Field>,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub results: Vec<Field>,
}

impl FuncType {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    fn mentions(&self, name: &str) -> bool {
        self.type_params
            .iter()
            .chain(&self.params)
            .chain(&self.results)
            .any(|f| f.ty.mentions(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "^")]
    Xor,
    #[serde(rename = "*")]
    Deref,
    #[serde(rename = "&")]
    Addr,
    #[serde(rename = "<-")]
    Recv,
    #[serde(rename = "~")]
    Tilde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Quo,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "&")]
    And,
    #[serde(rename = "|")]
    Or,
    #[serde(rename = "^")]
    Xor,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = "&^")]
    AndNot,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "||")]
    LogicalOr,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl BinaryOp {
    pub fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Shl | BinaryOp::Shr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

// ---------------------------------------------------------------------------
// Symbols and types
// ---------------------------------------------------------------------------

/// The object an identifier resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Path of the declaring package; `None` for the universe scope.
    #[serde(default)]
    pub package: Option<String>,
    pub exported: bool,
    pub kind: SymbolKind,
    /// For methods and fields, the type whose scope declares the member.
    #[serde(default)]
    pub owner: Option<Type>,
}

impl Symbol {
    /// A package-level object; exportedness follows Go's capitalisation rule.
    pub fn package_level(package: &str, name: &str, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            package: Some(package.to_string()),
            exported: is_exported(name),
            kind,
            owner: None,
        }
    }

    /// A method or field declared in `owner`'s scope.
    pub fn member(package: &str, owner: Type, name: &str, kind: SymbolKind) -> Self {
        Self {
            owner: Some(owner),
            ..Self::package_level(package, name, kind)
        }
    }

    /// A predeclared object such as `any`, `len` or `nil`.
    pub fn universe(name: &str, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            package: None,
            exported: false,
            kind,
            owner: None,
        }
    }

    /// The import path this symbol names, if it is a package name.
    pub fn imported_path(&self) -> Option<&str> {
        match &self.kind {
            SymbolKind::PkgName { path } => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Const,
    Var,
    TypeName,
    Func,
    Method,
    Field,
    PkgName { path: String },
    Builtin,
    Label,
    Nil,
}

/// Go exports identifiers that begin with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Value,
    Type,
    Builtin,
    Void,
}

/// What the loader knows about one expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAndValue {
    pub mode: Mode,
    #[serde(default)]
    pub ty: Option<Type>,
}

impl TypeAndValue {
    pub fn value(ty: Type) -> Self {
        Self {
            mode: Mode::Value,
            ty: Some(ty),
        }
    }

    pub fn type_expr(ty: Type) -> Self {
        Self {
            mode: Mode::Type,
            ty: Some(ty),
        }
    }

    pub fn builtin() -> Self {
        Self {
            mode: Mode::Builtin,
            ty: None,
        }
    }

    pub fn is_type(&self) -> bool {
        self.mode == Mode::Type
    }

    pub fn is_builtin(&self) -> bool {
        self.mode == Mode::Builtin
    }

    pub fn underlying(&self) -> Option<&Type> {
        self.ty.as_ref().and_then(Type::underlying)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Type {
    Basic {
        kind: BasicKind,
    },
    /// A defined type. `underlying` may be left out where the loader had
    /// to cut a cycle.
    Named {
        #[serde(default)]
        package: Option<String>,
        name: String,
        #[serde(default)]
        underlying: Option<Box<Type>>,
    },
    Pointer {
        elem: Box<Type>,
    },
    Slice {
        elem: Box<Type>,
    },
    Array {
        len: u64,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        elem: Box<Type>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<StructField>,
    },
    Signature {
        #[serde(default)]
        receiver: Option<Box<Type>>,
        #[serde(default)]
        variadic: bool,
    },
    Interface {
        /// Methods declared directly in the interface literal
        #[serde(default)]
        methods: Vec<String>,
        /// Embedded elements: interfaces, plain types, unions
        #[serde(default)]
        embedded: Vec<Type>,
    },
    Union {
        terms: Vec<Term>,
    },
    TypeParam {
        name: String,
    },
    Tuple {
        #[serde(default)]
        elems: Vec<Type>,
    },
}

impl Type {
    pub fn basic(kind: BasicKind) -> Self {
        Type::Basic { kind }
    }

    pub fn named(package: Option<&str>, name: &str, underlying: Type) -> Self {
        Type::Named {
            package: package.map(str::to_string),
            name: name.to_string(),
            underlying: Some(Box::new(underlying)),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn signature() -> Self {
        Type::Signature {
            receiver: None,
            variadic: false,
        }
    }

    /// Follows defined types down to their underlying type. `None` when a
    /// defined type's underlying type was not supplied.
    pub fn underlying(&self) -> Option<&Type> {
        match self {
            Type::Named { underlying, .. } => underlying.as_deref().and_then(Type::underlying),
            other => Some(other),
        }
    }

    /// `*T` and `T` share a key: strips one level of pointer.
    pub fn deref(&self) -> &Type {
        match self {
            Type::Pointer { elem } => elem,
            other => other,
        }
    }

    /// The name a member owner is registered under in the history.
    pub fn owner_name(&self) -> Option<&str> {
        match self.deref() {
            Type::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Type::Basic { kind } if kind.is_integer() && !kind.is_unsigned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub embedded: bool,
}

/// One element of a union: `T` or `~T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub tilde: bool,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    pub fn is_integer(self) -> bool {
        use BasicKind::*;
        matches!(
            self,
            Int | Int8
                | Int16
                | Int32
                | Int64
                | Uint
                | Uint8
                | Uint16
                | Uint32
                | Uint64
                | Uintptr
                | UntypedInt
                | UntypedRune
        )
    }

    pub fn is_unsigned(self) -> bool {
        use BasicKind::*;
        matches!(self, Uint | Uint8 | Uint16 | Uint32 | Uint64 | Uintptr)
    }
}

/// Field-by-field comparison of two struct types that ignores tags.
/// True when the fields line up and at least one tag differs.
pub fn differ_only_in_tags(a: &[StructField], b: &[StructField]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let same_shape = a
        .iter()
        .zip(b)
        .all(|(x, y)| x.name == y.name && x.ty == y.ty && x.embedded == y.embedded);
    same_shape && a.iter().zip(b).any(|(x, y)| x.tag != y.tag)
}

/// Method names of an interface, including those of embedded interfaces.
pub fn interface_method_names(methods: &[String], embedded: &[Type]) -> Vec<String> {
    let mut names = methods.to_vec();
    for embed in embedded {
        if let Some(Type::Interface {
            methods: inner,
            embedded: nested,
        }) = embed.underlying()
        {
            names.extend(interface_method_names(inner, nested));
        }
    }
    names
}

/// False when any embedded element is a union or a non-interface type,
/// i.e. the interface describes a type set rather than a method set.
pub fn is_method_set(embedded: &[Type]) -> bool {
    embedded.iter().all(|embed| match embed.underlying() {
        Some(Type::Interface { embedded, .. }) => is_method_set(embedded),
        // Unresolved defined types are assumed to be plain interfaces.
        None => true,
        Some(_) => false,
    })
}
