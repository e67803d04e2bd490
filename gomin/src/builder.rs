//! Programmatic construction of annotated units.
//!
//! Loaders written in Rust, and tests, build trees through [`UnitBuilder`]:
//! it hands out node IDs and positions and records symbol and type facts
//! as nodes are created.

use crate::ast::{NodeIdGenerator, Span};
use crate::tree::{
    Block, Decl, DeclToken, Expr, ExprKind, Field, FuncDecl, FuncType, GenDecl, Ident, LitKind,
    Spec, Stmt, StmtKind, Symbol, TypeAndValue, TypeSpec, TypeInfo, Unit, ValueSpec,
};

/// Builds one [`Unit`]. Every node gets a fresh ID and its own line.
#[derive(Debug)]
pub struct UnitBuilder {
    filename: String,
    ids: NodeIdGenerator,
    line: usize,
    decls: Vec<Decl>,
    info: TypeInfo,
}

impl UnitBuilder {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ids: NodeIdGenerator::new(),
            line: 0,
            decls: Vec::new(),
            info: TypeInfo::default(),
        }
    }

    /// The position the next node will get.
    pub fn next_span(&self) -> Span {
        Span::at(self.line + 1, 1)
    }

    fn span(&mut self) -> Span {
        self.line += 1;
        Span::at(self.line, 1)
    }

    pub fn expr(&mut self, kind: ExprKind) -> Expr {
        let span = self.span();
        Expr::new(kind, span, self.ids.next_id())
    }

    /// An expression with its type fact recorded.
    pub fn typed(&mut self, kind: ExprKind, tv: TypeAndValue) -> Expr {
        let expr = self.expr(kind);
        self.info.types.insert(expr.id, tv);
        expr
    }

    pub fn name(&mut self, name: &str) -> Ident {
        let span = self.span();
        Ident {
            id: self.ids.next_id(),
            span,
            name: name.to_string(),
        }
    }

    pub fn ident(&mut self, name: &str) -> Expr {
        self.expr(ExprKind::Ident {
            name: name.to_string(),
        })
    }

    /// An identifier resolving to `symbol`.
    pub fn use_of(&mut self, name: &str, symbol: Symbol) -> Expr {
        let expr = self.ident(name);
        self.info.uses.insert(expr.id, symbol);
        expr
    }

    /// `x.sel`, with `sel` resolving to `symbol` if given.
    pub fn selector(&mut self, x: Expr, sel: &str, symbol: Option<Symbol>) -> Expr {
        let sel = self.name(sel);
        if let Some(symbol) = symbol {
            self.info.uses.insert(sel.id, symbol);
        }
        self.expr(ExprKind::Selector {
            x: Box::new(x),
            sel,
        })
    }

    pub fn lit(&mut self, kind: LitKind, value: &str) -> Expr {
        self.expr(ExprKind::BasicLit {
            kind,
            value: value.to_string(),
        })
    }

    pub fn call(&mut self, fun: Expr, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call {
            fun: Box::new(fun),
            args,
            ellipsis: false,
        })
    }

    /// Records a type fact for an existing node.
    pub fn set_type(&mut self, expr: &Expr, tv: TypeAndValue) {
        self.info.types.insert(expr.id, tv);
    }

    /// Records a symbol for an existing node.
    pub fn set_use(&mut self, expr: &Expr, symbol: Symbol) {
        self.info.uses.insert(expr.id, symbol);
    }

    pub fn field(&mut self, names: &[&str], ty: Expr) -> Field {
        let names = names.iter().map(|n| self.name(n)).collect();
        Field {
            names,
            ty,
            tag: None,
        }
    }

    pub fn stmt(&mut self, kind: StmtKind) -> Stmt {
        let span = self.span();
        Stmt::new(kind, span)
    }

    pub fn block(&mut self, stmts: Vec<Stmt>) -> Block {
        let span = self.span();
        Block { span, stmts }
    }

    /// A `return` with the given results.
    pub fn ret(&mut self, results: Vec<Expr>) -> Stmt {
        self.stmt(StmtKind::Return { results })
    }

    /// Adds `func name<ty> { body }`.
    pub fn func(&mut self, name: &str, ty: FuncType, body: Vec<Stmt>) -> &mut Self {
        let span = self.span();
        let name = self.name(name);
        let body = Some(self.block(body));
        self.decls.push(Decl::Func(FuncDecl {
            span,
            recv: Vec::new(),
            name,
            ty,
            body,
        }));
        self
    }

    /// Adds `type name[type_params] ty` (or `= ty` for an alias).
    pub fn type_decl(
        &mut self,
        name: &str,
        type_params: Vec<Field>,
        alias: bool,
        ty: Expr,
    ) -> &mut Self {
        let span = self.span();
        let name = self.name(name);
        let spec = Spec::Type(TypeSpec {
            span,
            name,
            type_params,
            alias,
            ty,
        });
        self.gen(DeclToken::Type, spec)
    }

    /// Adds `var name ty = values`.
    pub fn var(&mut self, name: &str, ty: Option<Expr>, values: Vec<Expr>) -> &mut Self {
        let span = self.span();
        let names = vec![self.name(name)];
        let spec = Spec::Value(ValueSpec {
            span,
            names,
            ty,
            values,
        });
        self.gen(DeclToken::Var, spec)
    }

    fn gen(&mut self, tok: DeclToken, spec: Spec) -> &mut Self {
        let span = self.span();
        self.decls.push(Decl::Gen(GenDecl {
            span,
            tok,
            specs: vec![spec],
        }));
        self
    }

    pub fn decl(&mut self, decl: Decl) -> &mut Self {
        self.decls.push(decl);
        self
    }

    pub fn build(self) -> Unit {
        Unit {
            filename: self.filename,
            decls: self.decls,
            info: self.info,
        }
    }
}
