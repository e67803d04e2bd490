use super::rules::is_extended_literal;
use super::{Construct, Step, Walker, CONTINUE};
use crate::ast::Span;
use crate::tree::{
    differ_only_in_tags, interface_method_names, is_method_set, Block, Expr, ExprKind, Field,
    FuncType, Ident, LitKind, Mode, SymbolKind, Type, TypeAndValue, UnaryOp,
};

impl Walker<'_, '_> {
    pub(super) fn expr(&mut self, expr: &Expr) -> Step {
        self.expr_in(expr, false)
    }

    pub(super) fn exprs(&mut self, exprs: &[Expr]) -> Step {
        for expr in exprs {
            descend!(self.expr(expr));
        }
        Ok(CONTINUE)
    }

    fn opt_expr(&mut self, expr: Option<&Expr>) -> Step {
        match expr {
            Some(expr) => self.expr(expr),
            None => Ok(CONTINUE),
        }
    }

    /// `call_target` is set while visiting the callee of a call, where a
    /// selector of function type is being called rather than used as a value.
    fn expr_in(&mut self, expr: &Expr, call_target: bool) -> Step {
        match &expr.kind {
            ExprKind::Ident { name } => self.ident(expr, name),
            ExprKind::Ellipsis { elt } => self.opt_expr(elt.as_deref()),
            ExprKind::BasicLit { kind, value } => {
                let numeric = !matches!(kind, LitKind::Char | LitKind::String);
                if numeric && is_extended_literal(value) {
                    return Ok(self.record(Construct::ExtendedLiteral, expr.span));
                }
                Ok(CONTINUE)
            }
            ExprKind::FuncLit { ty, body } => self.func_lit(expr.span, ty, body),
            ExprKind::CompositeLit { ty, elts } => {
                descend!(self.opt_expr(ty.as_deref()));
                self.composite_elts(elts)
            }
            ExprKind::Paren { x } => self.expr_in(x, call_target),
            ExprKind::Selector { x, sel } => self.selector(expr, x, sel, call_target),
            // `pkg.F[int](v)` calls the instantiated function
            ExprKind::Index { x, index } => {
                descend!(self.expr_in(x, call_target));
                if self.is_type_expr(index) {
                    halt!(self.record(Construct::GenericInstantiation, expr.span));
                }
                self.expr(index)
            }
            ExprKind::IndexList { x, indices } => {
                descend!(self.expr_in(x, call_target));
                if indices.iter().any(|index| self.is_type_expr(index)) {
                    halt!(self.record(Construct::GenericInstantiation, expr.span));
                }
                self.exprs(indices)
            }
            ExprKind::Slice {
                x,
                low,
                high,
                max,
                slice3,
            } => {
                if *slice3 {
                    halt!(self.record(Construct::FullSlice, expr.span));
                }
                descend!(self.expr(x));
                descend!(self.opt_expr(low.as_deref()));
                descend!(self.opt_expr(high.as_deref()));
                self.opt_expr(max.as_deref())
            }
            ExprKind::TypeAssert { x, ty } => {
                descend!(self.expr(x));
                self.opt_expr(ty.as_deref())
            }
            ExprKind::Call { fun, args, .. } => self.call(expr, fun, args),
            ExprKind::Star { x } => self.expr(x),
            ExprKind::Unary { op, x } => {
                if *op == UnaryOp::Tilde {
                    halt!(self.record(Construct::Tilde, expr.span));
                }
                self.expr(x)
            }
            ExprKind::Binary { x, op, y } => {
                if op.is_shift() && self.is_signed(y) {
                    halt!(self.record(Construct::SignedShift, expr.span));
                }
                descend!(self.expr(x));
                self.expr(y)
            }
            ExprKind::KeyValue { key, value } => {
                descend!(self.expr(key));
                self.expr(value)
            }
            ExprKind::ArrayType { len, elt } => {
                descend!(self.opt_expr(len.as_deref()));
                self.expr(elt)
            }
            ExprKind::StructType { fields } => self.fields(fields),
            ExprKind::FuncType(ty) => {
                if ty.is_generic() {
                    halt!(self.record(Construct::GenericFuncType, expr.span));
                }
                self.signature(ty)
            }
            ExprKind::InterfaceType { methods } => self.interface(expr, methods),
            ExprKind::MapType { key, value } => {
                descend!(self.expr(key));
                self.expr(value)
            }
            ExprKind::ChanType { value, .. } => self.expr(value),
            ExprKind::Unrecognized => Err(self.unknown("expression", Some(expr.span))),
        }
    }

    fn ident(&mut self, expr: &Expr, name: &str) -> Step {
        if name == "any" && self.is_type_expr(expr) {
            let predeclared = self
                .info()
                .symbol(expr.id)
                .map_or(true, |symbol| symbol.package.is_none());
            if predeclared {
                return Ok(self.record(Construct::AnyBuiltin, expr.span));
            }
        }
        Ok(self.use_of(expr.id, expr.span))
    }

    fn func_lit(&mut self, span: Span, ty: &FuncType, body: &Block) -> Step {
        if ty.is_generic() {
            halt!(self.record(Construct::GenericFuncLit, span));
        }
        descend!(self.signature(ty));
        self.func_body(body)
    }

    fn signature(&mut self, ty: &FuncType) -> Step {
        descend!(self.fields(&ty.type_params));
        descend!(self.fields(&ty.params));
        self.fields(&ty.results)
    }

    fn composite_elts(&mut self, elts: &[Expr]) -> Step {
        for elt in elts {
            descend!(self.expr(elt));

            if let ExprKind::KeyValue { key, .. } = &elt.kind {
                if matches!(key.kind, ExprKind::CompositeLit { ty: None, .. }) {
                    halt!(self.record(Construct::ElidedCompositeKey, key.span));
                }
            }
        }
        Ok(CONTINUE)
    }

    fn selector(&mut self, expr: &Expr, x: &Expr, sel: &Ident, call_target: bool) -> Step {
        descend!(self.expr(x));

        if !call_target && self.is_func_value(expr, sel) {
            halt!(self.record(Construct::MethodValue, expr.span));
        }
        Ok(self.use_of(sel.id, expr.span))
    }

    fn call(&mut self, expr: &Expr, fun: &Expr, args: &[Expr]) -> Step {
        let callee = self
            .info()
            .type_of(fun.id)
            .ok_or_else(|| self.missing("call target", fun.span))?;

        match args {
            [arg] if callee.is_type() => return self.conversion(expr, fun, callee, arg),
            _ if callee.is_builtin() => return self.builtin_call(expr, fun, args),
            _ => {}
        }

        descend!(self.expr_in(fun, true));
        self.exprs(args)
    }

    fn conversion(
        &mut self,
        expr: &Expr,
        fun: &Expr,
        target: &TypeAndValue,
        arg: &Expr,
    ) -> Step {
        let operand = self
            .info()
            .type_of(arg.id)
            .ok_or_else(|| self.missing("conversion operand", arg.span))?;

        if let Some(construct) = conversion_rule(operand.underlying(), target.underlying()) {
            halt!(self.record(construct, expr.span));
        }

        descend!(self.expr(fun));
        self.expr(arg)
    }

    fn builtin_call(&mut self, expr: &Expr, fun: &Expr, args: &[Expr]) -> Step {
        let construct = match &fun.unparen().kind {
            ExprKind::Ident { name } => Construct::builtin(name),
            ExprKind::Selector { x, sel } if self.is_unsafe_package(x) => {
                Construct::unsafe_func(&sel.name)
            }
            _ => None,
        };
        if let Some(construct) = construct {
            halt!(self.record(construct, expr.span));
        }
        self.exprs(args)
    }

    fn interface(&mut self, expr: &Expr, methods: &[Field]) -> Step {
        let info = self.info();
        if let Some(Type::Interface {
            methods: explicit,
            embedded,
        }) = info.type_of(expr.id).and_then(TypeAndValue::underlying)
        {
            if overlapping_method_sets(explicit, embedded) {
                halt!(self.record(Construct::OverlappingInterfaces, expr.span));
            }
            if !is_method_set(embedded) {
                halt!(self.record(Construct::GeneralConstraints, expr.span));
            }
        }
        self.fields(methods)
    }

    /// Reports whether `expr` has a signed integer type.
    pub(super) fn is_signed(&self, expr: &Expr) -> bool {
        self.info()
            .type_of(expr.id)
            .and_then(TypeAndValue::underlying)
            .is_some_and(Type::is_signed_integer)
    }

    fn is_type_expr(&self, expr: &Expr) -> bool {
        self.info()
            .type_of(expr.id)
            .is_some_and(TypeAndValue::is_type)
    }

    /// A selector that evaluates to a function: a method value or a
    /// function referenced without calling it.
    fn is_func_value(&self, expr: &Expr, sel: &Ident) -> bool {
        match self.info().type_of(expr.id) {
            Some(tv) => {
                tv.mode == Mode::Value && matches!(tv.underlying(), Some(Type::Signature { .. }))
            }
            None => self
                .info()
                .symbol(sel.id)
                .is_some_and(|symbol| matches!(symbol.kind, SymbolKind::Func | SymbolKind::Method)),
        }
    }

    fn is_unsafe_package(&self, x: &Expr) -> bool {
        let x = x.unparen();
        let ExprKind::Ident { name } = &x.kind else {
            return false;
        };
        match self.info().symbol(x.id) {
            Some(symbol) => symbol.imported_path() == Some("unsafe"),
            None => name == "unsafe",
        }
    }
}

/// The construct a conversion from `from` to `to` needs, if any. Both are
/// underlying types.
fn conversion_rule(from: Option<&Type>, to: Option<&Type>) -> Option<Construct> {
    match (from?, to?) {
        (Type::Struct { fields: a }, Type::Struct { fields: b }) if differ_only_in_tags(a, b) => {
            Some(Construct::TagInsensitiveConversion)
        }
        (Type::Slice { .. }, Type::Array { .. }) => Some(Construct::SliceToArray),
        (Type::Slice { .. }, Type::Pointer { elem })
            if matches!(elem.underlying(), Some(Type::Array { .. })) =>
        {
            Some(Construct::SliceToArrayPointer)
        }
        _ => None,
    }
}

/// Two embedded interfaces, or an embedded interface and the explicit
/// methods, declare the same method name. Signatures are not compared.
fn overlapping_method_sets(explicit: &[String], embedded: &[Type]) -> bool {
    let sets: Vec<Vec<String>> = embedded
        .iter()
        .filter_map(|embed| match embed.underlying() {
            Some(Type::Interface { methods, embedded }) => {
                Some(interface_method_names(methods, embedded))
            }
            _ => None,
        })
        .collect();

    sets.iter().enumerate().any(|(i, set)| {
        let shares = |names: &[String]| names.iter().any(|name| set.contains(name));
        sets[i + 1..].iter().any(|other| shares(other.as_slice())) || shares(explicit)
    })
}
