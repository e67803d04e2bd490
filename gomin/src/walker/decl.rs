use super::{Construct, Step, Walker, CONTINUE};
use crate::tree::{Block, Decl, Field, FuncDecl, GenDecl, Spec, TypeSpec, ValueSpec};

impl Walker<'_, '_> {
    pub(super) fn decl(&mut self, decl: &Decl) -> Step {
        match decl {
            Decl::Func(func) => self.func_decl(func),
            Decl::Gen(gen) => self.gen_decl(gen),
            Decl::Unrecognized => Err(self.unknown("declaration", None)),
        }
    }

    fn func_decl(&mut self, func: &FuncDecl) -> Step {
        descend!(self.fields(&func.recv));

        if func.ty.is_generic() {
            halt!(self.record(Construct::GenericFuncDecl, func.span));
            descend!(self.fields(&func.ty.type_params));
        }
        descend!(self.fields(&func.ty.params));
        descend!(self.fields(&func.ty.results));

        match &func.body {
            Some(body) => self.func_body(body),
            None => Ok(CONTINUE),
        }
    }

    /// Walks a function body, then checks that it ends in a return.
    pub(super) fn func_body(&mut self, body: &Block) -> Step {
        for stmt in &body.stmts {
            descend!(self.stmt(stmt));
        }
        match body.stmts.last() {
            Some(last) if !last.is_return() => Ok(self.record(Construct::NoFinalReturn, last.span)),
            _ => Ok(CONTINUE),
        }
    }

    pub(super) fn fields(&mut self, fields: &[Field]) -> Step {
        for field in fields {
            descend!(self.expr(&field.ty));
        }
        Ok(CONTINUE)
    }

    pub(super) fn gen_decl(&mut self, gen: &GenDecl) -> Step {
        for spec in &gen.specs {
            descend!(self.spec(spec));
        }
        Ok(CONTINUE)
    }

    fn spec(&mut self, spec: &Spec) -> Step {
        match spec {
            Spec::Import(_) => Ok(CONTINUE),
            Spec::Value(value) => self.value_spec(value),
            Spec::Type(ty) => self.type_spec(ty),
            Spec::Unrecognized => Err(self.unknown("spec", None)),
        }
    }

    fn value_spec(&mut self, spec: &ValueSpec) -> Step {
        if let Some(ty) = &spec.ty {
            descend!(self.expr(ty));
        }
        for value in &spec.values {
            descend!(self.expr(value));
        }
        Ok(CONTINUE)
    }

    fn type_spec(&mut self, spec: &TypeSpec) -> Step {
        let generic = !spec.type_params.is_empty();
        if generic {
            halt!(self.record(Construct::GenericTypeDecl, spec.span));

            let name = &spec.name.name;
            if spec.type_params.iter().any(|param| param.ty.mentions(name)) {
                halt!(self.record(Construct::SelfReferentialTypeParams, spec.span));
            }
        }

        if spec.alias {
            let construct = if generic {
                Construct::GenericTypeAlias
            } else {
                Construct::TypeAlias
            };
            halt!(self.record(construct, spec.span));
        }

        descend!(self.fields(&spec.type_params));
        self.expr(&spec.ty)
    }
}
