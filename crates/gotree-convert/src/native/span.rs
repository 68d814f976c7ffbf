//! Start and end positions of native nodes.
//!
//! `end()` is exclusive and follows the grammar's reference AST exactly,
//! including its quirks: a `return` without results ends six bytes after the
//! keyword, an implicit empty statement has zero width.

use super::ast::*;
use super::kind::{NativeKey, NodeKind};

/// A native node with a kind and a source span.
pub trait Spanned {
    fn kind(&self) -> NodeKind;
    fn pos(&self) -> Pos;
    fn end(&self) -> Pos;

    fn key(&self) -> NativeKey {
        NativeKey::new(self.kind(), self.pos(), self.end())
    }
}

fn len(text: &str) -> Pos {
    text.len() as Pos
}

impl Spanned for Ident {
    fn kind(&self) -> NodeKind {
        NodeKind::Ident
    }
    fn pos(&self) -> Pos {
        self.name_pos
    }
    fn end(&self) -> Pos {
        self.name_pos + len(&self.name)
    }
}

impl Spanned for BasicLit {
    fn kind(&self) -> NodeKind {
        NodeKind::BasicLit
    }
    fn pos(&self) -> Pos {
        self.value_pos
    }
    fn end(&self) -> Pos {
        self.value_pos + len(&self.value)
    }
}

impl Spanned for Comment {
    fn kind(&self) -> NodeKind {
        NodeKind::Comment
    }
    fn pos(&self) -> Pos {
        self.slash
    }
    fn end(&self) -> Pos {
        self.slash + len(&self.text)
    }
}

impl Spanned for Field {
    fn kind(&self) -> NodeKind {
        NodeKind::Field
    }
    fn pos(&self) -> Pos {
        match self.names.first() {
            Some(name) => name.pos(),
            None => self.ty.pos(),
        }
    }
    fn end(&self) -> Pos {
        match &self.tag {
            Some(tag) => tag.end(),
            None => self.ty.end(),
        }
    }
}

impl Spanned for FieldList {
    fn kind(&self) -> NodeKind {
        NodeKind::FieldList
    }
    fn pos(&self) -> Pos {
        match (self.opening, self.list.first()) {
            (Some(opening), _) => opening,
            (None, Some(first)) => first.pos(),
            (None, None) => 0,
        }
    }
    fn end(&self) -> Pos {
        match (self.closing, self.list.last()) {
            (Some(closing), _) => closing + 1,
            (None, Some(last)) => last.end(),
            (None, None) => 0,
        }
    }
}

impl Spanned for FuncType {
    fn kind(&self) -> NodeKind {
        NodeKind::FuncType
    }
    fn pos(&self) -> Pos {
        self.func.unwrap_or_else(|| self.params.pos())
    }
    fn end(&self) -> Pos {
        match &self.results {
            Some(results) => results.end(),
            None => self.params.end(),
        }
    }
}

impl Spanned for CallExpr {
    fn kind(&self) -> NodeKind {
        NodeKind::CallExpr
    }
    fn pos(&self) -> Pos {
        self.fun.pos()
    }
    fn end(&self) -> Pos {
        self.rparen + 1
    }
}

impl Spanned for BlockStmt {
    fn kind(&self) -> NodeKind {
        NodeKind::BlockStmt
    }
    fn pos(&self) -> Pos {
        self.lbrace
    }
    fn end(&self) -> Pos {
        self.rbrace + 1
    }
}

impl Spanned for Expr {
    fn kind(&self) -> NodeKind {
        match self {
            Expr::Bad(_) => NodeKind::BadExpr,
            Expr::Ident(_) => NodeKind::Ident,
            Expr::Ellipsis(_) => NodeKind::Ellipsis,
            Expr::BasicLit(_) => NodeKind::BasicLit,
            Expr::FuncLit(_) => NodeKind::FuncLit,
            Expr::CompositeLit(_) => NodeKind::CompositeLit,
            Expr::Paren(_) => NodeKind::ParenExpr,
            Expr::Selector(_) => NodeKind::SelectorExpr,
            Expr::Index(_) => NodeKind::IndexExpr,
            Expr::IndexList(_) => NodeKind::IndexListExpr,
            Expr::Slice(_) => NodeKind::SliceExpr,
            Expr::TypeAssert(_) => NodeKind::TypeAssertExpr,
            Expr::Call(_) => NodeKind::CallExpr,
            Expr::Star(_) => NodeKind::StarExpr,
            Expr::Unary(_) => NodeKind::UnaryExpr,
            Expr::Binary(_) => NodeKind::BinaryExpr,
            Expr::KeyValue(_) => NodeKind::KeyValueExpr,
            Expr::ArrayType(_) => NodeKind::ArrayType,
            Expr::StructType(_) => NodeKind::StructType,
            Expr::FuncType(_) => NodeKind::FuncType,
            Expr::InterfaceType(_) => NodeKind::InterfaceType,
            Expr::MapType(_) => NodeKind::MapType,
            Expr::ChanType(_) => NodeKind::ChanType,
        }
    }

    fn pos(&self) -> Pos {
        match self {
            Expr::Bad(e) => e.from,
            Expr::Ident(e) => e.pos(),
            Expr::Ellipsis(e) => e.ellipsis,
            Expr::BasicLit(e) => e.pos(),
            Expr::FuncLit(e) => e.ty.pos(),
            Expr::CompositeLit(e) => match &e.ty {
                Some(ty) => ty.pos(),
                None => e.lbrace,
            },
            Expr::Paren(e) => e.lparen,
            Expr::Selector(e) => e.x.pos(),
            Expr::Index(e) => e.x.pos(),
            Expr::IndexList(e) => e.x.pos(),
            Expr::Slice(e) => e.x.pos(),
            Expr::TypeAssert(e) => e.x.pos(),
            Expr::Call(e) => e.pos(),
            Expr::Star(e) => e.star,
            Expr::Unary(e) => e.op_pos,
            Expr::Binary(e) => e.x.pos(),
            Expr::KeyValue(e) => e.key.pos(),
            Expr::ArrayType(e) => e.lbrack,
            Expr::StructType(e) => e.struct_pos,
            Expr::FuncType(e) => e.pos(),
            Expr::InterfaceType(e) => e.interface,
            Expr::MapType(e) => e.map,
            Expr::ChanType(e) => e.begin,
        }
    }

    fn end(&self) -> Pos {
        match self {
            Expr::Bad(e) => e.to,
            Expr::Ident(e) => e.end(),
            Expr::Ellipsis(e) => match &e.elt {
                Some(elt) => elt.end(),
                None => e.ellipsis + 3,
            },
            Expr::BasicLit(e) => e.end(),
            Expr::FuncLit(e) => e.body.end(),
            Expr::CompositeLit(e) => e.rbrace + 1,
            Expr::Paren(e) => e.rparen + 1,
            Expr::Selector(e) => e.sel.end(),
            Expr::Index(e) => e.rbrack + 1,
            Expr::IndexList(e) => e.rbrack + 1,
            Expr::Slice(e) => e.rbrack + 1,
            Expr::TypeAssert(e) => e.rparen + 1,
            Expr::Call(e) => e.end(),
            Expr::Star(e) => e.x.end(),
            Expr::Unary(e) => e.x.end(),
            Expr::Binary(e) => e.y.end(),
            Expr::KeyValue(e) => e.value.end(),
            Expr::ArrayType(e) => e.elt.end(),
            Expr::StructType(e) => e.fields.end(),
            Expr::FuncType(e) => e.end(),
            Expr::InterfaceType(e) => e.methods.end(),
            Expr::MapType(e) => e.value.end(),
            Expr::ChanType(e) => e.value.end(),
        }
    }
}

impl Spanned for Stmt {
    fn kind(&self) -> NodeKind {
        match self {
            Stmt::Bad(_) => NodeKind::BadStmt,
            Stmt::Decl(_) => NodeKind::DeclStmt,
            Stmt::Empty(_) => NodeKind::EmptyStmt,
            Stmt::Labeled(_) => NodeKind::LabeledStmt,
            Stmt::Expr(_) => NodeKind::ExprStmt,
            Stmt::Send(_) => NodeKind::SendStmt,
            Stmt::IncDec(_) => NodeKind::IncDecStmt,
            Stmt::Assign(_) => NodeKind::AssignStmt,
            Stmt::Go(_) => NodeKind::GoStmt,
            Stmt::Defer(_) => NodeKind::DeferStmt,
            Stmt::Return(_) => NodeKind::ReturnStmt,
            Stmt::Branch(_) => NodeKind::BranchStmt,
            Stmt::Block(_) => NodeKind::BlockStmt,
            Stmt::If(_) => NodeKind::IfStmt,
            Stmt::CaseClause(_) => NodeKind::CaseClause,
            Stmt::Switch(_) => NodeKind::SwitchStmt,
            Stmt::TypeSwitch(_) => NodeKind::TypeSwitchStmt,
            Stmt::CommClause(_) => NodeKind::CommClause,
            Stmt::Select(_) => NodeKind::SelectStmt,
            Stmt::For(_) => NodeKind::ForStmt,
            Stmt::Range(_) => NodeKind::RangeStmt,
        }
    }

    fn pos(&self) -> Pos {
        match self {
            Stmt::Bad(s) => s.from,
            Stmt::Decl(s) => s.pos(),
            Stmt::Empty(s) => s.semicolon,
            Stmt::Labeled(s) => s.label.pos(),
            Stmt::Expr(s) => s.x.pos(),
            Stmt::Send(s) => s.chan.pos(),
            Stmt::IncDec(s) => s.x.pos(),
            Stmt::Assign(s) => s.lhs.first().map_or(s.tok_pos, Spanned::pos),
            Stmt::Go(s) => s.go,
            Stmt::Defer(s) => s.defer,
            Stmt::Return(s) => s.return_pos,
            Stmt::Branch(s) => s.tok_pos,
            Stmt::Block(s) => s.pos(),
            Stmt::If(s) => s.if_pos,
            Stmt::CaseClause(s) => s.case,
            Stmt::Switch(s) => s.switch,
            Stmt::TypeSwitch(s) => s.switch,
            Stmt::CommClause(s) => s.case,
            Stmt::Select(s) => s.select,
            Stmt::For(s) => s.for_pos,
            Stmt::Range(s) => s.for_pos,
        }
    }

    fn end(&self) -> Pos {
        match self {
            Stmt::Bad(s) => s.to,
            Stmt::Decl(s) => s.end(),
            Stmt::Empty(s) => s.semicolon + if s.implicit { 0 } else { 1 },
            Stmt::Labeled(s) => s.stmt.end(),
            Stmt::Expr(s) => s.x.end(),
            Stmt::Send(s) => s.value.end(),
            Stmt::IncDec(s) => s.tok_pos + 2,
            Stmt::Assign(s) => s.rhs.last().map_or(s.tok_pos + s.tok.len(), Spanned::end),
            Stmt::Go(s) => s.call.end(),
            Stmt::Defer(s) => s.call.end(),
            Stmt::Return(s) => match s.results.last() {
                Some(last) => last.end(),
                None => s.return_pos + 6,
            },
            Stmt::Branch(s) => match &s.label {
                Some(label) => label.end(),
                None => s.tok_pos + s.tok.len(),
            },
            Stmt::Block(s) => s.end(),
            Stmt::If(s) => match &s.else_branch {
                Some(else_branch) => else_branch.end(),
                None => s.body.end(),
            },
            Stmt::CaseClause(s) => match s.body.last() {
                Some(last) => last.end(),
                None => s.colon + 1,
            },
            Stmt::Switch(s) => s.body.end(),
            Stmt::TypeSwitch(s) => s.body.end(),
            Stmt::CommClause(s) => match s.body.last() {
                Some(last) => last.end(),
                None => s.colon + 1,
            },
            Stmt::Select(s) => s.body.end(),
            Stmt::For(s) => s.body.end(),
            Stmt::Range(s) => s.body.end(),
        }
    }
}

impl Spanned for Spec {
    fn kind(&self) -> NodeKind {
        match self {
            Spec::Import(_) => NodeKind::ImportSpec,
            Spec::Value(_) => NodeKind::ValueSpec,
            Spec::Type(_) => NodeKind::TypeSpec,
        }
    }

    fn pos(&self) -> Pos {
        match self {
            Spec::Import(s) => match &s.name {
                Some(name) => name.pos(),
                None => s.path.pos(),
            },
            Spec::Value(s) => s.names.first().map_or(0, Spanned::pos),
            Spec::Type(s) => s.name.pos(),
        }
    }

    fn end(&self) -> Pos {
        match self {
            Spec::Import(s) => s.end_pos.unwrap_or_else(|| s.path.end()),
            Spec::Value(s) => {
                if let Some(last) = s.values.last() {
                    last.end()
                } else if let Some(ty) = &s.ty {
                    ty.end()
                } else {
                    s.names.last().map_or(0, Spanned::end)
                }
            }
            Spec::Type(s) => s.ty.end(),
        }
    }
}

impl Spanned for GenDecl {
    fn kind(&self) -> NodeKind {
        NodeKind::GenDecl
    }
    fn pos(&self) -> Pos {
        self.tok_pos
    }
    fn end(&self) -> Pos {
        match (self.rparen, self.specs.first()) {
            (Some(rparen), _) => rparen + 1,
            (None, Some(first)) => first.end(),
            (None, None) => self.tok_pos + self.tok.len(),
        }
    }
}

impl Spanned for FuncDecl {
    fn kind(&self) -> NodeKind {
        NodeKind::FuncDecl
    }
    fn pos(&self) -> Pos {
        self.ty.pos()
    }
    fn end(&self) -> Pos {
        match &self.body {
            Some(body) => body.end(),
            None => self.ty.end(),
        }
    }
}

impl Spanned for Decl {
    fn kind(&self) -> NodeKind {
        match self {
            Decl::Bad(_) => NodeKind::BadDecl,
            Decl::Gen(_) => NodeKind::GenDecl,
            Decl::Func(_) => NodeKind::FuncDecl,
        }
    }
    fn pos(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.from,
            Decl::Gen(d) => d.pos(),
            Decl::Func(d) => d.pos(),
        }
    }
    fn end(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.to,
            Decl::Gen(d) => d.end(),
            Decl::Func(d) => d.end(),
        }
    }
}

impl Spanned for File {
    fn kind(&self) -> NodeKind {
        NodeKind::File
    }
    fn pos(&self) -> Pos {
        self.package
    }
    fn end(&self) -> Pos {
        match self.decls.last() {
            Some(last) => last.end(),
            None => self.name.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::Tok;

    #[test]
    fn test_return_without_results_is_six_wide() {
        let stmt = Stmt::Return(ReturnStmt {
            return_pos: 10,
            results: vec![],
        });
        assert_eq!(stmt.pos(), 10);
        assert_eq!(stmt.end(), 16);
    }

    #[test]
    fn test_implicit_empty_stmt_has_zero_width() {
        let implicit = Stmt::Empty(EmptyStmt {
            semicolon: 4,
            implicit: true,
        });
        let explicit = Stmt::Empty(EmptyStmt {
            semicolon: 4,
            implicit: false,
        });
        assert_eq!(implicit.end(), 4);
        assert_eq!(explicit.end(), 5);
    }

    #[test]
    fn test_branch_end_uses_label_when_present() {
        let bare = Stmt::Branch(BranchStmt {
            tok_pos: 0,
            tok: Tok::Continue,
            label: None,
        });
        let labelled = Stmt::Branch(BranchStmt {
            tok_pos: 0,
            tok: Tok::Break,
            label: Some(Ident::new(6, "outer")),
        });
        assert_eq!(bare.end(), 8);
        assert_eq!(labelled.end(), 11);
    }

    #[test]
    fn test_composite_lit_without_type_starts_at_brace() {
        let lit = Expr::CompositeLit(CompositeLit {
            ty: None,
            lbrace: 7,
            elts: vec![],
            rbrace: 8,
            incomplete: false,
        });
        assert_eq!(lit.pos(), 7);
        assert_eq!(lit.end(), 9);
        assert_eq!(lit.key(), NativeKey::new(NodeKind::CompositeLit, 7, 9));
    }

    #[test]
    fn test_field_list_without_delimiters_uses_fields() {
        let list = FieldList {
            opening: None,
            list: vec![Field {
                names: vec![],
                ty: Expr::Ident(Ident::new(20, "int")),
                tag: None,
            }],
            closing: None,
        };
        assert_eq!(list.pos(), 20);
        assert_eq!(list.end(), 23);
    }
}
