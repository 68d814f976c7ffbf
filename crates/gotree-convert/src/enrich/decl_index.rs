//! Named-field declarations of a file, for identifiers whose type the type
//! checker could not resolve.
//!
//! Parameters, results, receivers, type parameters, struct fields and
//! interface methods are all `Field`s; every name they declare maps to the
//! span of the field's type expression.

use gotree_core::collections::FxHashMap;

use crate::native::*;

#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    type_spans: FxHashMap<Pos, (Pos, Pos)>,
}

impl DeclarationIndex {
    pub fn build(file: &File) -> Self {
        let mut index = Self::default();
        for decl in &file.decls {
            index.decl(decl);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.type_spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_spans.is_empty()
    }

    /// Source text of the type declared for the name at `decl_pos`.
    pub fn type_text<'s>(&self, decl_pos: Pos, source: &'s str) -> Option<&'s str> {
        let &(start, end) = self.type_spans.get(&decl_pos)?;
        source.get(start as usize..end as usize)
    }

    // ---- Descent ----

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Bad(_) => {}
            Decl::Gen(gen) => self.gen_decl(gen),
            Decl::Func(func) => {
                self.field_list(func.recv.as_ref());
                self.func_type(&func.ty);
                if let Some(body) = &func.body {
                    self.block(body);
                }
            }
        }
    }

    fn gen_decl(&mut self, decl: &GenDecl) {
        for spec in &decl.specs {
            match spec {
                Spec::Import(_) => {}
                Spec::Value(value) => {
                    self.opt_expr(value.ty.as_ref());
                    self.exprs(&value.values);
                }
                Spec::Type(ty) => {
                    self.field_list(ty.type_params.as_ref());
                    self.expr(&ty.ty);
                }
            }
        }
    }

    fn field_list(&mut self, list: Option<&FieldList>) {
        let Some(list) = list else {
            return;
        };
        for field in &list.list {
            for name in &field.names {
                self.type_spans
                    .insert(name.name_pos, (field.ty.pos(), field.ty.end()));
            }
            self.expr(&field.ty);
        }
    }

    fn func_type(&mut self, ty: &FuncType) {
        self.field_list(ty.type_params.as_ref());
        self.field_list(Some(&ty.params));
        self.field_list(ty.results.as_ref());
    }

    fn block(&mut self, block: &BlockStmt) {
        for stmt in &block.list {
            self.stmt(stmt);
        }
    }

    fn opt_stmt(&mut self, stmt: Option<&Stmt>) {
        if let Some(stmt) = stmt {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Bad(_) | Stmt::Empty(_) | Stmt::Branch(_) => {}
            Stmt::Decl(decl) => self.gen_decl(decl),
            Stmt::Labeled(s) => self.stmt(&s.stmt),
            Stmt::Expr(s) => self.expr(&s.x),
            Stmt::Send(s) => {
                self.expr(&s.chan);
                self.expr(&s.value);
            }
            Stmt::IncDec(s) => self.expr(&s.x),
            Stmt::Assign(s) => {
                self.exprs(&s.lhs);
                self.exprs(&s.rhs);
            }
            Stmt::Go(s) => self.call(&s.call),
            Stmt::Defer(s) => self.call(&s.call),
            Stmt::Return(s) => self.exprs(&s.results),
            Stmt::Block(s) => self.block(s),
            Stmt::If(s) => {
                self.opt_stmt(s.init.as_deref());
                self.expr(&s.cond);
                self.block(&s.body);
                self.opt_stmt(s.else_branch.as_deref());
            }
            Stmt::CaseClause(s) => {
                self.exprs(&s.list);
                s.body.iter().for_each(|stmt| self.stmt(stmt));
            }
            Stmt::Switch(s) => {
                self.opt_stmt(s.init.as_deref());
                self.opt_expr(s.tag.as_ref());
                self.block(&s.body);
            }
            Stmt::TypeSwitch(s) => {
                self.opt_stmt(s.init.as_deref());
                self.stmt(&s.assign);
                self.block(&s.body);
            }
            Stmt::CommClause(s) => {
                self.opt_stmt(s.comm.as_deref());
                s.body.iter().for_each(|stmt| self.stmt(stmt));
            }
            Stmt::Select(s) => self.block(&s.body),
            Stmt::For(s) => {
                self.opt_stmt(s.init.as_deref());
                self.opt_expr(s.cond.as_ref());
                self.opt_stmt(s.post.as_deref());
                self.block(&s.body);
            }
            Stmt::Range(s) => {
                self.opt_expr(s.key.as_ref());
                self.opt_expr(s.value.as_ref());
                self.expr(&s.x);
                self.block(&s.body);
            }
        }
    }

    fn exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs {
            self.expr(expr);
        }
    }

    fn opt_expr(&mut self, expr: Option<&Expr>) {
        if let Some(expr) = expr {
            self.expr(expr);
        }
    }

    fn call(&mut self, call: &CallExpr) {
        self.expr(&call.fun);
        self.exprs(&call.args);
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Bad(_) | Expr::Ident(_) | Expr::BasicLit(_) => {}
            Expr::Ellipsis(e) => self.opt_expr(e.elt.as_deref()),
            Expr::FuncLit(e) => {
                self.func_type(&e.ty);
                self.block(&e.body);
            }
            Expr::CompositeLit(e) => {
                self.opt_expr(e.ty.as_deref());
                self.exprs(&e.elts);
            }
            Expr::Paren(e) => self.expr(&e.x),
            Expr::Selector(e) => self.expr(&e.x),
            Expr::Index(e) => {
                self.expr(&e.x);
                self.expr(&e.index);
            }
            Expr::IndexList(e) => {
                self.expr(&e.x);
                self.exprs(&e.indices);
            }
            Expr::Slice(e) => {
                self.expr(&e.x);
                self.opt_expr(e.low.as_deref());
                self.opt_expr(e.high.as_deref());
                self.opt_expr(e.max.as_deref());
            }
            Expr::TypeAssert(e) => {
                self.expr(&e.x);
                self.opt_expr(e.ty.as_deref());
            }
            Expr::Call(e) => self.call(e),
            Expr::Star(e) => self.expr(&e.x),
            Expr::Unary(e) => self.expr(&e.x),
            Expr::Binary(e) => {
                self.expr(&e.x);
                self.expr(&e.y);
            }
            Expr::KeyValue(e) => {
                self.expr(&e.key);
                self.expr(&e.value);
            }
            Expr::ArrayType(e) => {
                self.opt_expr(e.len.as_deref());
                self.expr(&e.elt);
            }
            Expr::StructType(e) => self.field_list(Some(&e.fields)),
            Expr::FuncType(e) => self.func_type(e),
            Expr::InterfaceType(e) => self.field_list(Some(&e.methods)),
            Expr::MapType(e) => {
                self.expr(&e.key);
                self.expr(&e.value);
            }
            Expr::ChanType(e) => self.expr(&e.value),
        }
    }
}
