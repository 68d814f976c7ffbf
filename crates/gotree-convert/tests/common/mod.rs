//! Hand-built native trees over small Go sources.

#![allow(dead_code)]

use gotree_convert::enrich::{NoSymbols, SymbolResolver};
use gotree_convert::native::*;
use gotree_convert::tree::{FieldValue, NodeId, NodeType, Tree};
use gotree_convert::{map_file, ConvertedFile, MapOptions};

/// Source text with position lookups by unique substring.
pub struct Src {
    pub text: String,
}

impl Src {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Offset of the only occurrence of `needle`.
    pub fn at(&self, needle: &str) -> Pos {
        let mut found = self.text.match_indices(needle);
        let (first, _) = found
            .next()
            .unwrap_or_else(|| panic!("{needle:?} not in source"));
        assert!(found.next().is_none(), "{needle:?} is ambiguous");
        first as Pos
    }

    /// Offset of the `n`-th (0-based) occurrence of `needle`.
    pub fn nth(&self, needle: &str, n: usize) -> Pos {
        self.text
            .match_indices(needle)
            .nth(n)
            .unwrap_or_else(|| panic!("{needle:?} occurs fewer than {} times", n + 1))
            .0 as Pos
    }

    pub fn len(&self) -> Pos {
        self.text.len() as Pos
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

pub fn ident(pos: Pos, name: &str) -> Ident {
    Ident::new(pos, name)
}

pub fn id(pos: Pos, name: &str) -> Expr {
    Expr::Ident(ident(pos, name))
}

pub fn boxed(expr: Expr) -> Box<Expr> {
    Box::new(expr)
}

pub fn int_lit(pos: Pos, value: &str) -> Expr {
    Expr::BasicLit(BasicLit::new(pos, LitKind::Int, value))
}

pub fn string_lit(pos: Pos, value: &str) -> Expr {
    Expr::BasicLit(BasicLit::new(pos, LitKind::String, value))
}

pub fn call(fun: Expr, lparen: Pos, args: Vec<Expr>, rparen: Pos) -> Expr {
    Expr::Call(CallExpr {
        fun: boxed(fun),
        lparen,
        args,
        ellipsis: None,
        rparen,
    })
}

pub fn binary(x: Expr, op_pos: Pos, op: Tok, y: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        x: boxed(x),
        op_pos,
        op,
        y: boxed(y),
    })
}

pub fn block(lbrace: Pos, list: Vec<Stmt>, rbrace: Pos) -> BlockStmt {
    BlockStmt {
        lbrace,
        list,
        rbrace,
    }
}

pub fn expr_stmt(x: Expr) -> Stmt {
    Stmt::Expr(ExprStmt { x })
}

pub fn define(lhs: Vec<Expr>, tok_pos: Pos, rhs: Vec<Expr>) -> Stmt {
    Stmt::Assign(AssignStmt {
        lhs,
        tok_pos,
        tok: Tok::Define,
        rhs,
    })
}

pub fn assign(lhs: Vec<Expr>, tok_pos: Pos, tok: Tok, rhs: Vec<Expr>) -> Stmt {
    Stmt::Assign(AssignStmt {
        lhs,
        tok_pos,
        tok,
        rhs,
    })
}

pub fn ret(return_pos: Pos, results: Vec<Expr>) -> Stmt {
    Stmt::Return(ReturnStmt {
        return_pos,
        results,
    })
}

/// `(names type, ...)` parameter list.
pub fn params(opening: Pos, list: Vec<Field>, closing: Pos) -> FieldList {
    FieldList {
        opening: Some(opening),
        list,
        closing: Some(closing),
    }
}

pub fn field(names: Vec<Ident>, ty: Expr) -> Field {
    Field {
        names,
        ty,
        tag: None,
    }
}

/// An unparenthesised single unnamed result.
pub fn result(ty: Expr) -> FieldList {
    FieldList {
        opening: None,
        list: vec![field(Vec::new(), ty)],
        closing: None,
    }
}

pub fn func(
    src: &Src,
    name: &str,
    params: FieldList,
    results: Option<FieldList>,
    body: BlockStmt,
) -> Decl {
    let func_pos = src.at(&format!("func {name}("));
    Decl::Func(FuncDecl {
        recv: None,
        name: ident(func_pos + 5, name),
        ty: FuncType {
            func: Some(func_pos),
            type_params: None,
            params,
            results,
        },
        body: Some(body),
    })
}

pub fn gen_decl(tok_pos: Pos, tok: Tok, specs: Vec<Spec>) -> Decl {
    Decl::Gen(GenDecl {
        tok_pos,
        tok,
        lparen: None,
        specs,
        rparen: None,
    })
}

/// `package <name>` file; the package clause must open the source after
/// any header comments.
pub fn file(src: &Src, name: &str, decls: Vec<Decl>, comments: Vec<Comment>) -> File {
    let package = src.at("package ");
    File {
        package,
        name: ident(package + 8, name),
        decls,
        comments: comments
            .into_iter()
            .map(|c| CommentGroup { list: vec![c] })
            .collect(),
    }
}

pub fn comment(src: &Src, text: &str) -> Comment {
    Comment {
        slash: src.at(text),
        text: text.to_string(),
    }
}

pub fn convert(src: &Src, file: &File) -> ConvertedFile {
    convert_with(src, file, &NoSymbols, MapOptions::default())
}

pub fn convert_with(
    src: &Src,
    file: &File,
    symbols: &dyn SymbolResolver,
    options: MapOptions,
) -> ConvertedFile {
    map_file(file, src.as_str(), "test.go", symbols, options).expect("conversion succeeds")
}

// ---- Tree queries ----

pub fn token_texts(converted: &ConvertedFile) -> Vec<String> {
    converted
        .tokens
        .iter()
        .filter_map(|&id| converted.tree.get(id).token.as_ref())
        .map(|t| t.text.clone())
        .collect()
}

/// Every node of the given type reachable from the root, in preorder.
pub fn find_all(converted: &ConvertedFile, node_type: NodeType) -> Vec<NodeId> {
    let Some(root) = converted.root else {
        return Vec::new();
    };
    converted
        .tree
        .preorder(root)
        .into_iter()
        .filter(|&id| converted.tree.get(id).node_type == node_type)
        .collect()
}

pub fn find_one(converted: &ConvertedFile, node_type: NodeType) -> NodeId {
    let found = find_all(converted, node_type);
    assert_eq!(found.len(), 1, "expected exactly one {node_type}");
    found[0]
}

pub fn native_kinds(converted: &ConvertedFile) -> Vec<String> {
    let Some(root) = converted.root else {
        return Vec::new();
    };
    converted
        .tree
        .preorder(root)
        .into_iter()
        .filter_map(|id| converted.tree.get(id).native_kind().map(str::to_string))
        .collect()
}

pub fn text(tree: &Tree, src: &Src, id: NodeId) -> String {
    tree.text(id, src.as_str()).to_string()
}

pub fn str_field<'t>(tree: &'t Tree, id: NodeId, name: &str) -> &'t str {
    match tree.get(id).field(name) {
        Some(FieldValue::Str(s)) => s,
        other => panic!("field {name} is {other:?}"),
    }
}
