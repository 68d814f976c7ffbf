//! Field-level view of native nodes for the declarative native mapping.
//!
//! Every kind that can be mapped without a typed shape exposes its fields in
//! grammar order through [`NativeRef::fields`]. The names match
//! [`NodeKind::fields`]; the mapper's schema decides what happens to each.

use smallvec::SmallVec;

use super::ast::*;
use super::kind::{NativeKey, NodeKind};
use super::span::Spanned;
use super::token::Tok;

/// Delimiter role of a field list, fixed by the field that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListRole {
    Params,
    Results,
    Receiver,
    /// Struct fields and interface methods.
    Brace,
    TypeParams,
}

impl ListRole {
    pub fn opening(self) -> Tok {
        match self {
            ListRole::Params | ListRole::Results | ListRole::Receiver => Tok::LParen,
            ListRole::Brace => Tok::LBrace,
            ListRole::TypeParams => Tok::LBrack,
        }
    }

    pub fn closing(self) -> Tok {
        match self {
            ListRole::Params | ListRole::Results | ListRole::Receiver => Tok::RParen,
            ListRole::Brace => Tok::RBrace,
            ListRole::TypeParams => Tok::RBrack,
        }
    }
}

/// One field value of a native node.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    /// A position carrying a fixed token; `None` when the parser left it unset.
    Token(Option<Pos>, Tok),
    Ident(Option<&'a Ident>),
    Expr(Option<&'a Expr>),
    Stmt(Option<&'a Stmt>),
    Block(&'a BlockStmt),
    Call(&'a CallExpr),
    FieldList(Option<&'a FieldList>),
    Tag(Option<&'a BasicLit>),
    Idents(&'a [Ident]),
    Exprs(&'a [Expr]),
    Stmts(&'a [Stmt]),
    Specs(&'a [Spec]),
    Fields(&'a [Field]),
    /// Direction flags and other values with no source text of their own.
    Scalar,
}

/// A borrowed native node that the declarative mapping can visit.
#[derive(Debug, Clone, Copy)]
pub enum NativeRef<'a> {
    Expr(&'a Expr),
    Stmt(&'a Stmt),
    Spec(&'a Spec),
    Decl(&'a Decl),
    GenDecl(&'a GenDecl),
    Field(&'a Field),
    FieldList(&'a FieldList, ListRole),
    FuncType(&'a FuncType),
}

pub type FieldVec<'a> = SmallVec<[(&'static str, Child<'a>); 6]>;

impl<'a> NativeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NativeRef::Expr(e) => e.kind(),
            NativeRef::Stmt(s) => s.kind(),
            NativeRef::Spec(s) => s.kind(),
            NativeRef::Decl(d) => d.kind(),
            NativeRef::GenDecl(_) => NodeKind::GenDecl,
            NativeRef::Field(_) => NodeKind::Field,
            NativeRef::FieldList(..) => NodeKind::FieldList,
            NativeRef::FuncType(_) => NodeKind::FuncType,
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            NativeRef::Expr(e) => e.pos(),
            NativeRef::Stmt(s) => s.pos(),
            NativeRef::Spec(s) => s.pos(),
            NativeRef::Decl(d) => d.pos(),
            NativeRef::GenDecl(d) => d.pos(),
            NativeRef::Field(f) => f.pos(),
            NativeRef::FieldList(l, _) => l.pos(),
            NativeRef::FuncType(t) => t.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            NativeRef::Expr(e) => e.end(),
            NativeRef::Stmt(s) => s.end(),
            NativeRef::Spec(s) => s.end(),
            NativeRef::Decl(d) => d.end(),
            NativeRef::GenDecl(d) => d.end(),
            NativeRef::Field(f) => f.end(),
            NativeRef::FieldList(l, _) => l.end(),
            NativeRef::FuncType(t) => t.end(),
        }
    }

    pub fn key(&self) -> NativeKey {
        NativeKey::new(self.kind(), self.pos(), self.end())
    }

    /// Fields in grammar order. Kinds that only ever map to typed nodes
    /// expose nothing.
    pub fn fields(&self) -> FieldVec<'a> {
        let mut out = FieldVec::new();
        match *self {
            NativeRef::Expr(expr) => expr_fields(expr, &mut out),
            NativeRef::Stmt(stmt) => stmt_fields(stmt, &mut out),
            NativeRef::Spec(spec) => spec_fields(spec, &mut out),
            NativeRef::Decl(Decl::Gen(decl)) | NativeRef::GenDecl(decl) => {
                gen_decl_fields(decl, &mut out)
            }
            NativeRef::Decl(_) => {}
            NativeRef::Field(field) => {
                out.push(("Names", Child::Idents(&field.names)));
                out.push(("Type", Child::Expr(Some(&field.ty))));
                out.push(("Tag", Child::Tag(field.tag.as_ref())));
            }
            NativeRef::FieldList(list, role) => {
                out.push(("Opening", Child::Token(list.opening, role.opening())));
                out.push(("List", Child::Fields(&list.list)));
                out.push(("Closing", Child::Token(list.closing, role.closing())));
            }
            NativeRef::FuncType(ty) => func_type_fields(ty, &mut out),
        }
        out
    }
}

fn func_type_fields<'a>(ty: &'a FuncType, out: &mut FieldVec<'a>) {
    out.push(("Func", Child::Token(ty.func, Tok::Func)));
    out.push(("TypeParams", Child::FieldList(ty.type_params.as_ref())));
    out.push(("Params", Child::FieldList(Some(&ty.params))));
    out.push(("Results", Child::FieldList(ty.results.as_ref())));
}

fn gen_decl_fields<'a>(decl: &'a GenDecl, out: &mut FieldVec<'a>) {
    out.push(("Tok", Child::Token(Some(decl.tok_pos), decl.tok)));
    out.push(("Lparen", Child::Token(decl.lparen, Tok::LParen)));
    out.push(("Specs", Child::Specs(&decl.specs)));
    out.push(("Rparen", Child::Token(decl.rparen, Tok::RParen)));
}

fn expr_fields<'a>(expr: &'a Expr, out: &mut FieldVec<'a>) {
    match expr {
        Expr::Unary(e) => {
            out.push(("Op", Child::Token(Some(e.op_pos), e.op)));
            out.push(("X", Child::Expr(Some(&e.x))));
        }
        Expr::Binary(e) => {
            out.push(("X", Child::Expr(Some(&e.x))));
            out.push(("Op", Child::Token(Some(e.op_pos), e.op)));
            out.push(("Y", Child::Expr(Some(&e.y))));
        }
        Expr::StructType(e) => {
            out.push(("Struct", Child::Token(Some(e.struct_pos), Tok::Struct)));
            out.push(("Fields", Child::FieldList(Some(&e.fields))));
        }
        Expr::FuncType(e) => func_type_fields(e, out),
        Expr::InterfaceType(e) => {
            out.push(("Interface", Child::Token(Some(e.interface), Tok::Interface)));
            out.push(("Methods", Child::FieldList(Some(&e.methods))));
        }
        Expr::ChanType(e) => {
            out.push(("Begin", Child::Scalar));
            out.push(("Arrow", Child::Scalar));
            out.push(("Dir", Child::Scalar));
            out.push(("Value", Child::Expr(Some(&e.value))));
        }
        _ => {}
    }
}

fn stmt_fields<'a>(stmt: &'a Stmt, out: &mut FieldVec<'a>) {
    match stmt {
        Stmt::Empty(s) => {
            out.push(("Semicolon", Child::Token(Some(s.semicolon), Tok::Semicolon)));
        }
        Stmt::Labeled(s) => {
            out.push(("Label", Child::Ident(Some(&s.label))));
            out.push(("Colon", Child::Token(Some(s.colon), Tok::Colon)));
            out.push(("Stmt", Child::Stmt(Some(&s.stmt))));
        }
        Stmt::Send(s) => {
            out.push(("Chan", Child::Expr(Some(&s.chan))));
            out.push(("Arrow", Child::Token(Some(s.arrow), Tok::Arrow)));
            out.push(("Value", Child::Expr(Some(&s.value))));
        }
        Stmt::Assign(s) => {
            out.push(("Lhs", Child::Exprs(&s.lhs)));
            out.push(("Tok", Child::Token(Some(s.tok_pos), s.tok)));
            out.push(("Rhs", Child::Exprs(&s.rhs)));
        }
        Stmt::Go(s) => {
            out.push(("Go", Child::Token(Some(s.go), Tok::Go)));
            out.push(("Call", Child::Call(&s.call)));
        }
        Stmt::Defer(s) => {
            out.push(("Defer", Child::Token(Some(s.defer), Tok::Defer)));
            out.push(("Call", Child::Call(&s.call)));
        }
        Stmt::Branch(s) => {
            out.push(("Tok", Child::Token(Some(s.tok_pos), s.tok)));
            out.push(("Label", Child::Ident(s.label.as_ref())));
        }
        Stmt::CommClause(s) => {
            let tok = if s.comm.is_none() { Tok::Default } else { Tok::Case };
            out.push(("Case", Child::Token(Some(s.case), tok)));
            out.push(("Comm", Child::Stmt(s.comm.as_deref())));
            out.push(("Colon", Child::Token(Some(s.colon), Tok::Colon)));
            out.push(("Body", Child::Stmts(&s.body)));
        }
        Stmt::Select(s) => {
            out.push(("Select", Child::Token(Some(s.select), Tok::Select)));
            out.push(("Body", Child::Block(&s.body)));
        }
        _ => {}
    }
}

fn spec_fields<'a>(spec: &'a Spec, out: &mut FieldVec<'a>) {
    match spec {
        Spec::Value(s) => {
            out.push(("Names", Child::Idents(&s.names)));
            out.push(("Type", Child::Expr(s.ty.as_ref())));
            out.push(("Values", Child::Exprs(&s.values)));
        }
        Spec::Type(s) => {
            out.push(("Name", Child::Ident(Some(&s.name))));
            out.push(("TypeParams", Child::FieldList(s.type_params.as_ref())));
            out.push(("Assign", Child::Token(s.assign, Tok::Assign)));
            out.push(("Type", Child::Expr(Some(&s.ty))));
        }
        Spec::Import(_) => {}
    }
}
