//! Mapping scenarios over small hand-parsed files.

mod common;

use common::*;
use gotree_core::errors::ConvertError;
use gotree_convert::native::*;
use gotree_convert::tree::{FieldValue, NodeType, TextRange, TokenKind};
use gotree_convert::{map_file, MapOptions, NoSymbols};

fn without_whitespace(text: &str) -> String {
    text.split_whitespace().collect()
}

// ---- Functions and control flow ----

const FUNC_SRC: &str = "package p\n\nfunc f(a, b int) int {\n\tif x := a; x > b {\n\t\treturn x\n\t}\n\treturn b\n}\n";

fn func_file(src: &Src) -> File {
    let if_stmt = Stmt::If(IfStmt {
        if_pos: src.at("if x"),
        init: Some(Box::new(define(
            vec![id(src.at("x :="), "x")],
            src.at(":="),
            vec![id(src.at("a;"), "a")],
        ))),
        cond: binary(id(src.at("x >"), "x"), src.at(">"), Tok::Gtr, id(src.at("b {"), "b")),
        body: block(
            src.at("{\n\t\treturn"),
            vec![ret(src.at("return x"), vec![id(src.at("x\n\t}"), "x")])],
            src.at("}\n\treturn"),
        ),
        else_branch: None,
    });
    let body = block(
        src.at("{\n\tif"),
        vec![if_stmt, ret(src.at("return b"), vec![id(src.at("b\n}"), "b")])],
        src.len() - 2,
    );
    let a = src.at("a, b");
    let b = src.at("b int");
    let decl = func(
        src,
        "f",
        params(
            src.at("(a"),
            vec![field(vec![ident(a, "a"), ident(b, "b")], id(src.at("int)"), "int"))],
            src.at(") int"),
        ),
        Some(result(id(src.at("int {"), "int"))),
        body,
    );
    file(src, "p", vec![decl], Vec::new())
}

#[test]
fn test_every_source_token_is_accounted_for() {
    let src = Src::new(FUNC_SRC);
    let converted = convert(&src, &func_file(&src));
    assert_eq!(token_texts(&converted).concat(), without_whitespace(FUNC_SRC));
}

#[test]
fn test_function_declaration_shape() {
    let src = Src::new(FUNC_SRC);
    let converted = convert(&src, &func_file(&src));
    let tree = &converted.tree;
    let func = find_one(&converted, NodeType::FunctionDeclaration);
    let node = tree.get(func);

    let name = node.node_field("name").unwrap();
    assert_eq!(str_field(tree, name, "name"), "f");
    assert_eq!(node.field("receiver"), Some(&FieldValue::Node(None)));
    assert_eq!(text(tree, &src, node.node_field("returnType").unwrap()), "int");

    let params = node.nodes_field("formalParameters");
    assert_eq!(params.len(), 2);
    for &param in params {
        assert_eq!(tree.get(param).node_type, NodeType::Parameter);
    }
    // Only the last name of a group carries the type.
    assert_eq!(tree.get(params[0]).field("type"), Some(&FieldValue::Node(None)));
    let ty = tree.get(params[1]).node_field("type").unwrap();
    assert_eq!(text(tree, &src, ty), "int");

    let body = node.node_field("body").unwrap();
    assert_eq!(tree.get(body).nodes_field("statementOrExpressions").len(), 2);
}

#[test]
fn test_if_with_initializer() {
    let src = Src::new(FUNC_SRC);
    let converted = convert(&src, &func_file(&src));
    let tree = &converted.tree;
    let node = tree.get(find_one(&converted, NodeType::If));

    assert_eq!(node.field("elseKeyword"), Some(&FieldValue::Null));
    assert_eq!(node.field("elseBranch"), Some(&FieldValue::Node(None)));
    assert_eq!(
        node.field("ifKeyword"),
        Some(&FieldValue::Range(Some(TextRange::new(4, 1, 4, 3))))
    );

    let condition = tree.get(node.node_field("condition").unwrap());
    assert_eq!(condition.native_kind(), Some("InitAndCond"));
    let header = condition.nodes_field("children");
    assert_eq!(header.len(), 3);
    assert_eq!(tree.get(header[0]).node_type, NodeType::VariableDeclaration);
    assert_eq!(tree.get(header[1]).token.as_ref().unwrap().text, ";");
    assert_eq!(tree.get(header[2]).node_type, NodeType::BinaryExpression);
    assert_eq!(str_field(tree, header[2], "operator"), "GREATER_THAN");

    let define = tree.get(header[0]);
    assert_eq!(define.field("isVal"), Some(&FieldValue::Bool(false)));
    assert_eq!(define.field("type"), Some(&FieldValue::Null));
    assert_eq!(define.nodes_field("identifiers").len(), 1);
}

#[test]
fn test_function_cfg_references_function_nodes() {
    let src = Src::new(FUNC_SRC);
    let converted = convert(&src, &func_file(&src));
    let tree = &converted.tree;
    let func = find_one(&converted, NodeType::FunctionDeclaration);
    let Some(FieldValue::Cfg(Some(cfg))) = tree.get(func).field("cfg") else {
        panic!("function has no cfg");
    };
    assert!(cfg.blocks.len() >= 3);

    let body = tree.get(func).node_field("body").unwrap();
    let stamped: Vec<i64> = tree
        .preorder(body)
        .into_iter()
        .filter_map(|id| tree.get(id).cfg_id())
        .collect();
    let referenced: Vec<i32> = cfg.blocks.iter().flat_map(|b| b.node_ids.clone()).collect();
    assert!(!referenced.is_empty());
    for id in referenced {
        assert!(stamped.contains(&i64::from(id)), "cfg id {id} has no node");
    }
    for block in &cfg.blocks {
        for &succ in &block.successors {
            assert!((succ as usize) < cfg.blocks.len());
        }
    }
}

// ---- Comments ----

#[test]
fn test_comments_are_placed_in_gaps() {
    let text = "// header\npackage p // trailing\n";
    let src = Src::new(text);
    let file = file(
        &src,
        "p",
        Vec::new(),
        vec![comment(&src, "// header"), comment(&src, "// trailing")],
    );
    let converted = convert(&src, &file);
    let tree = &converted.tree;

    assert_eq!(converted.comments.len(), 2);
    assert_eq!(token_texts(&converted), vec!["package", "p"]);

    let package = find_one(&converted, NodeType::PackageDeclaration);
    let first = tree.get(package).children[0];
    assert!(tree.get(first).is_comment());
    assert_eq!(tree.get(package).nodes_field("children").len(), 2);

    let root = tree.get(converted.root.unwrap());
    assert!(root.children.iter().any(|&id| id == converted.comments[1]));
    assert_eq!(root.range, TextRange::new(1, 0, 3, 0));
}

// ---- Declarations and literals ----

const DECL_SRC: &str = "package p\n\nvar s = `raw`\n\nconst c = \"a<b\"\n\ntype T int\n";

fn decl_file(src: &Src) -> File {
    let var = gen_decl(
        src.at("var s"),
        Tok::Var,
        vec![Spec::Value(ValueSpec {
            names: vec![ident(src.at("s ="), "s")],
            ty: None,
            values: vec![string_lit(src.at("`raw`"), "`raw`")],
        })],
    );
    let constant = gen_decl(
        src.at("const"),
        Tok::Const,
        vec![Spec::Value(ValueSpec {
            names: vec![ident(src.at("c ="), "c")],
            ty: None,
            values: vec![string_lit(src.at("\"a<b\""), "\"a<b\"")],
        })],
    );
    let ty = gen_decl(
        src.at("type T"),
        Tok::Type,
        vec![Spec::Type(TypeSpec {
            name: ident(src.at("T int"), "T"),
            type_params: None,
            assign: None,
            ty: id(src.at("int"), "int"),
        })],
    );
    file(src, "p", vec![var, constant, ty], Vec::new())
}

#[test]
fn test_value_declarations() {
    let src = Src::new(DECL_SRC);
    let converted = convert(&src, &decl_file(&src));
    let tree = &converted.tree;
    assert_eq!(token_texts(&converted).concat(), without_whitespace(DECL_SRC));

    let decls = find_all(&converted, NodeType::VariableDeclaration);
    assert_eq!(decls.len(), 2);
    assert_eq!(tree.get(decls[0]).field("isVal"), Some(&FieldValue::Bool(false)));
    assert_eq!(tree.get(decls[1]).field("isVal"), Some(&FieldValue::Bool(true)));
    assert_eq!(tree.get(decls[0]).field("type"), Some(&FieldValue::Node(None)));

    // Raw strings stay plain tokens.
    let raw = tree.get(decls[0]).nodes_field("initializers")[0];
    let raw = tree.get(raw);
    assert_eq!(raw.node_type, NodeType::Native);
    assert_eq!(raw.native_kind(), Some("[0](BasicLit)"));
    assert_eq!(raw.token.as_ref().unwrap().kind, TokenKind::Other);

    let string = tree.get(decls[1]).nodes_field("initializers")[0];
    assert_eq!(tree.get(string).node_type, NodeType::StringLiteral);
    assert_eq!(str_field(tree, string, "content"), "a<b");
    assert_eq!(str_field(tree, string, "value"), "\"a<b\"");
    assert_eq!(
        tree.get(string).token.as_ref().unwrap().kind,
        TokenKind::StringLiteral
    );
}

#[test]
fn test_type_declaration_wraps_spec() {
    let src = Src::new(DECL_SRC);
    let converted = convert(&src, &decl_file(&src));
    let tree = &converted.tree;
    let class = tree.get(find_one(&converted, NodeType::ClassDeclaration));
    assert_eq!(
        class.field("identifier"),
        Some(&FieldValue::Range(Some(TextRange::new(7, 5, 7, 6))))
    );
    let wrapped = tree.get(class.node_field("classTree").unwrap());
    assert_eq!(wrapped.native_kind(), Some("[2](TypeSpecWrapped)"));
    assert_eq!(wrapped.nodes_field("children").len(), 3);
}

#[test]
fn test_placeholder_and_nil() {
    let text = "package p\n\nfunc g() {\n\t_ = nil\n}\n";
    let src = Src::new(text);
    let lparen = src.at("()");
    let body = block(
        src.at("{\n\t_"),
        vec![assign(
            vec![id(src.at("_ ="), "_")],
            src.at("="),
            Tok::Assign,
            vec![id(src.at("nil"), "nil")],
        )],
        src.at("}"),
    );
    let decl = func(&src, "g", params(lparen, Vec::new(), lparen + 1), None, body);
    let converted = convert(&src, &file(&src, "p", vec![decl], Vec::new()));
    let tree = &converted.tree;

    let func = tree.get(find_one(&converted, NodeType::FunctionDeclaration));
    assert!(func.nodes_field("formalParameters").is_empty());
    assert_eq!(func.field("returnType"), Some(&FieldValue::Node(None)));

    let assignment = tree.get(find_one(&converted, NodeType::AssignmentExpression));
    assert_eq!(assignment.str_field("operator"), Some("EQUAL"));
    let lhs = assignment.node_field("leftHandSide").unwrap();
    assert_eq!(tree.get(lhs).node_type, NodeType::PlaceHolder);
    let placeholder = tree.get(tree.get(lhs).children[0]);
    assert_eq!(placeholder.token.as_ref().unwrap().kind, TokenKind::Keyword);
    let rhs = assignment.node_field("statementOrExpression").unwrap();
    assert_eq!(tree.get(rhs).node_type, NodeType::Literal);
    assert_eq!(str_field(tree, rhs, "value"), "nil");
}

// ---- Switches ----

const SWITCH_SRC: &str =
    "package p\n\nfunc h(v int) {\n\tswitch v {\n\tcase 1, 2:\n\t\tv++\n\tdefault:\n\t}\n}\n";

#[test]
fn test_switch_cases() {
    let src = Src::new(SWITCH_SRC);
    let first = Stmt::CaseClause(CaseClause {
        case: src.at("case"),
        list: vec![int_lit(src.at("1,"), "1"), int_lit(src.at("2:"), "2")],
        colon: src.at(":\n\t\tv"),
        body: vec![Stmt::IncDec(IncDecStmt {
            x: id(src.at("v++"), "v"),
            tok_pos: src.at("++"),
            tok: Tok::Inc,
        })],
    });
    let default = Stmt::CaseClause(CaseClause {
        case: src.at("default"),
        list: Vec::new(),
        colon: src.at(":\n\t}"),
        body: Vec::new(),
    });
    let switch = Stmt::Switch(SwitchStmt {
        switch: src.at("switch"),
        init: None,
        tag: Some(id(src.at("v {"), "v")),
        body: block(src.at("{\n\tcase"), vec![first, default], src.at("}\n}")),
    });
    let decl = func(
        &src,
        "h",
        params(
            src.at("(v"),
            vec![field(vec![ident(src.at("v int"), "v")], id(src.at("int)"), "int"))],
            src.at("int)") + 3,
        ),
        None,
        block(src.at("{\n\tswitch"), vec![switch], src.len() - 2),
    );
    let converted = convert(&src, &file(&src, "p", vec![decl], Vec::new()));
    let tree = &converted.tree;
    assert_eq!(token_texts(&converted).concat(), without_whitespace(SWITCH_SRC));

    let matched = tree.get(find_one(&converted, NodeType::Match));
    let expression = tree.get(matched.node_field("expression").unwrap());
    assert_eq!(expression.native_kind(), Some("InitAndTag"));
    let cases = matched.nodes_field("cases");
    assert_eq!(cases.len(), 2);

    let case = tree.get(cases[0]);
    let list = tree.get(case.node_field("expression").unwrap());
    assert_eq!(list.native_kind(), Some("CaseExprList"));
    let items = list.nodes_field("children");
    assert_eq!(items.len(), 3);
    assert_eq!(tree.get(items[0]).node_type, NodeType::IntegerLiteral);
    let body = tree.get(case.node_field("body").unwrap());
    assert_eq!(body.node_type, NodeType::Block);
    let increment = body.nodes_field("statementOrExpressions")[0];
    assert_eq!(str_field(tree, increment, "operator"), "INCREMENT");

    let default = tree.get(cases[1]);
    assert_eq!(default.field("expression"), Some(&FieldValue::Node(None)));
    assert_eq!(default.field("body"), Some(&FieldValue::Node(None)));
}

// ---- Strictness ----

fn misplaced_package() -> (Src, File) {
    let src = Src::new("package p\n");
    let file = File {
        package: 1,
        name: ident(8, "p"),
        decls: Vec::new(),
        comments: Vec::new(),
    };
    (src, file)
}

#[test]
fn test_strict_mode_rejects_token_mismatch() {
    let (src, file) = misplaced_package();
    let err = map_file(&file, src.as_str(), "bad.go", &NoSymbols, MapOptions::default())
        .unwrap_err();
    match err {
        ConvertError::TokenValue {
            actual, expected, ..
        } => {
            assert_eq!(expected, "package");
            assert_eq!(actual, "ackage ");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_lenient_mode_skips_token_mismatch() {
    let (src, file) = misplaced_package();
    let options = MapOptions {
        strict: false,
        identifier_info: true,
    };
    let converted = convert_with(&src, &file, &NoSymbols, options);
    assert_eq!(token_texts(&converted), vec!["p"]);
    assert!(converted.root.is_some());
}
