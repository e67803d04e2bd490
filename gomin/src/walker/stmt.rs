use super::{Construct, Step, Walker, CONTINUE};
use crate::ast::Span;
use crate::tree::{AssignOp, Block, Expr, Stmt, StmtKind, Type};

impl Walker<'_, '_> {
    pub(super) fn stmt(&mut self, stmt: &Stmt) -> Step {
        match &stmt.kind {
            StmtKind::Decl { decl } => self.gen_decl(decl),
            StmtKind::Empty | StmtKind::Branch { .. } => Ok(CONTINUE),
            StmtKind::Labeled { body, .. } => self.stmt(body),
            StmtKind::Expr { x } => self.expr(x),
            StmtKind::Send { chan, value } => {
                descend!(self.expr(chan));
                self.expr(value)
            }
            StmtKind::IncDec { x, .. } => self.expr(x),
            StmtKind::Assign { lhs, op, rhs } => self.assign(stmt.span, lhs, *op, rhs),
            StmtKind::Go { call } | StmtKind::Defer { call } => self.expr(call),
            StmtKind::Return { results } => self.exprs(results),
            StmtKind::Block(block) => self.block(block),
            StmtKind::If {
                init,
                cond,
                body,
                els,
            } => {
                descend!(self.opt_stmt(init.as_deref()));
                descend!(self.expr(cond));
                descend!(self.block(body));
                self.opt_stmt(els.as_deref())
            }
            StmtKind::Case { list, body } => {
                descend!(self.exprs(list));
                self.stmts(body)
            }
            StmtKind::Switch { init, tag, body } => {
                descend!(self.opt_stmt(init.as_deref()));
                if let Some(tag) = tag {
                    descend!(self.expr(tag));
                }
                self.block(body)
            }
            StmtKind::TypeSwitch { init, assign, body } => {
                descend!(self.opt_stmt(init.as_deref()));
                descend!(self.stmt(assign));
                self.block(body)
            }
            StmtKind::Comm { comm, body } => {
                descend!(self.opt_stmt(comm.as_deref()));
                self.stmts(body)
            }
            StmtKind::Select { body } => self.block(body),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                descend!(self.opt_stmt(init.as_deref()));
                if let Some(cond) = cond {
                    descend!(self.expr(cond));
                }
                descend!(self.opt_stmt(post.as_deref()));
                self.block(body)
            }
            StmtKind::Range {
                key,
                value,
                x,
                body,
            } => self.range(stmt.span, key.as_ref(), value.as_ref(), x, body),
            StmtKind::Unrecognized => Err(self.unknown("statement", Some(stmt.span))),
        }
    }

    pub(super) fn block(&mut self, block: &Block) -> Step {
        self.stmts(&block.stmts)
    }

    fn stmts(&mut self, stmts: &[Stmt]) -> Step {
        for stmt in stmts {
            descend!(self.stmt(stmt));
        }
        Ok(CONTINUE)
    }

    fn opt_stmt(&mut self, stmt: Option<&Stmt>) -> Step {
        match stmt {
            Some(stmt) => self.stmt(stmt),
            None => Ok(CONTINUE),
        }
    }

    fn assign(&mut self, span: Span, lhs: &[Expr], op: AssignOp, rhs: &[Expr]) -> Step {
        if matches!(op, AssignOp::Shl | AssignOp::Shr) {
            if let [count] = rhs {
                if self.is_signed(count) {
                    halt!(self.record(Construct::SignedShift, span));
                }
            }
        }
        descend!(self.exprs(lhs));
        self.exprs(rhs)
    }

    fn range(
        &mut self,
        span: Span,
        key: Option<&Expr>,
        value: Option<&Expr>,
        x: &Expr,
        body: &Block,
    ) -> Step {
        if key.is_none() && value.is_none() {
            halt!(self.record(Construct::RangeWithoutVars, span));
        }
        for var in key.into_iter().chain(value) {
            descend!(self.expr(var));
        }
        descend!(self.expr(x));

        let operand = self
            .info()
            .type_of(x.id)
            .ok_or_else(|| self.missing("range operand", x.span))?;
        match operand.underlying() {
            Some(Type::Basic { kind }) if kind.is_integer() => {
                halt!(self.record(Construct::RangeOverInt, span));
            }
            Some(Type::Signature { .. }) => {
                halt!(self.record(Construct::RangeOverFunc, span));
            }
            _ => {}
        }

        self.block(body)
    }
}
