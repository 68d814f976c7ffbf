//! Identifier enrichment through a symbol table.

mod common;

use common::*;
use gotree_convert::native::*;
use gotree_convert::tree::{FieldValue, NodeId, NodeType};
use gotree_convert::{ConvertedFile, MapOptions, Symbol, SymbolKind, SymbolTable};

const SRC: &str = "package p\n\nimport \"fmt\"\n\nfunc f(a myT) {\n\tx := fmt.Sprint(a)\n}\n";

fn build(src: &Src) -> File {
    let import = gen_decl(
        src.at("import"),
        Tok::Import,
        vec![Spec::Import(ImportSpec {
            name: None,
            path: BasicLit::new(src.at("\"fmt\""), LitKind::String, "\"fmt\""),
            end_pos: None,
        })],
    );
    let param = src.at("a myT");
    let sprint = Expr::Selector(SelectorExpr {
        x: boxed(id(src.at("fmt."), "fmt")),
        sel: ident(src.at("Sprint"), "Sprint"),
    });
    let call_expr = call(
        sprint,
        src.at("(a)"),
        vec![Expr::Ident(ident(src.at("a)"), "a").with_decl(param))],
        src.at("(a)") + 2,
    );
    let body = block(
        src.at("{\n\tx"),
        vec![define(vec![id(src.at("x :="), "x")], src.at(":="), vec![call_expr])],
        src.at("}"),
    );
    let decl = func(
        src,
        "f",
        params(
            src.at("f(a") + 1,
            vec![field(vec![ident(param, "a")], id(src.at("myT"), "myT"))],
            src.at(") {"),
        ),
        None,
        body,
    );
    file(src, "p", vec![import, decl], Vec::new())
}

fn symbols(src: &Src) -> SymbolTable {
    let mut table = SymbolTable::new();
    table
        .define(
            src.at("x :="),
            Symbol::new(SymbolKind::Var, "string").declared_at(src.at("x :=")),
        )
        .define(
            src.at("a myT"),
            Symbol::new(SymbolKind::Var, "invalid type"),
        )
        .record_use(
            src.at("fmt."),
            Symbol::new(
                SymbolKind::PackageName {
                    imported_path: "fmt".to_string(),
                },
                "invalid type",
            ),
        )
        .record_use(
            src.at("Sprint"),
            Symbol::new(
                SymbolKind::Func {
                    package: Some("fmt".to_string()),
                },
                "func(a ...any) string",
            )
            .with_results(vec!["string".to_string()]),
        )
        .record_use(
            src.at("a)"),
            Symbol::new(SymbolKind::Var, "invalid type").declared_at(src.at("a myT")),
        );
    table
}

fn identifier_at(converted: &ConvertedFile, src: &Src, offset: u32) -> NodeId {
    find_all(converted, NodeType::Identifier)
        .into_iter()
        .find(|&id| converted.tree.get(id).offset == offset as usize)
        .unwrap_or_else(|| panic!("no identifier at {offset} in {:?}", src.as_str()))
}

fn info(converted: &ConvertedFile, id: NodeId) -> (i64, String, String) {
    let node = converted.tree.get(id);
    let Some(FieldValue::Int(n)) = node.field("id") else {
        panic!("identifier has no id");
    };
    (
        *n,
        node.str_field("type").unwrap_or_default().to_string(),
        node.str_field("package").unwrap_or_default().to_string(),
    )
}

#[test]
fn test_defined_variable() {
    let src = Src::new(SRC);
    let table = symbols(&src);
    let converted = convert_with(&src, &build(&src), &table, MapOptions::default());
    let x = identifier_at(&converted, &src, src.at("x :="));
    let pos = i64::from(src.at("x :="));
    assert_eq!(info(&converted, x), (pos + 1, "string".into(), "UNKNOWN".into()));
}

#[test]
fn test_package_and_function_names() {
    let src = Src::new(SRC);
    let table = symbols(&src);
    let converted = convert_with(&src, &build(&src), &table, MapOptions::default());

    let fmt = identifier_at(&converted, &src, src.at("fmt."));
    assert_eq!(info(&converted, fmt).2, "fmt");
    let sprint = identifier_at(&converted, &src, src.at("Sprint"));
    assert_eq!(info(&converted, sprint), (0, "func(a ...any) string".into(), "fmt".into()));
}

#[test]
fn test_invalid_type_uses_declared_field_type() {
    let src = Src::new(SRC);
    let table = symbols(&src);
    let converted = convert_with(&src, &build(&src), &table, MapOptions::default());

    let usage = identifier_at(&converted, &src, src.at("a)"));
    let param_pos = i64::from(src.at("a myT"));
    assert_eq!(info(&converted, usage), (param_pos + 1, "myT".into(), "UNKNOWN".into()));

    // The parameter itself carries no declaration link.
    let param = identifier_at(&converted, &src, src.at("a myT"));
    assert_eq!(info(&converted, param), (0, "UNKNOWN".into(), "UNKNOWN".into()));
}

#[test]
fn test_unresolved_identifier_defaults() {
    let src = Src::new(SRC);
    let converted = convert(&src, &build(&src));
    for id in find_all(&converted, NodeType::Identifier) {
        assert_eq!(info(&converted, id), (0, "UNKNOWN".into(), "UNKNOWN".into()));
    }
}

#[test]
fn test_call_result_types() {
    let src = Src::new(SRC);
    let table = symbols(&src);
    let converted = convert_with(&src, &build(&src), &table, MapOptions::default());
    let call = converted.tree.get(find_one(&converted, NodeType::FunctionInvocation));
    assert_eq!(
        call.field("returnType"),
        Some(&FieldValue::Strings(vec!["string".to_string()]))
    );
    let member = call.node_field("memberSelect").unwrap();
    assert_eq!(converted.tree.get(member).node_type, NodeType::MemberSelect);
}

#[test]
fn test_identifier_info_can_be_disabled() {
    let src = Src::new(SRC);
    let table = symbols(&src);
    let options = MapOptions {
        strict: true,
        identifier_info: false,
    };
    let converted = convert_with(&src, &build(&src), &table, options);
    for id in find_all(&converted, NodeType::Identifier) {
        let node = converted.tree.get(id);
        assert!(node.field("id").is_none());
        assert!(node.field("type").is_none());
        assert!(node.field("package").is_none());
        assert!(node.str_field("name").is_some());
    }
    // Call result types do not depend on the switch.
    let call = converted.tree.get(find_one(&converted, NodeType::FunctionInvocation));
    assert_eq!(
        call.field("returnType"),
        Some(&FieldValue::Strings(vec!["string".to_string()]))
    );
}

#[test]
fn test_import_declaration() {
    let src = Src::new(SRC);
    let converted = convert(&src, &build(&src));
    let tree = &converted.tree;
    let spec = tree.get(find_one(&converted, NodeType::ImportSpecification));
    assert_eq!(spec.field("name"), Some(&FieldValue::Node(None)));
    let path = spec.node_field("path").unwrap();
    assert_eq!(tree.get(path).node_type, NodeType::StringLiteral);
    assert_eq!(tree.get(path).str_field("content"), Some("fmt"));
    assert_eq!(
        token_texts(&converted).concat(),
        SRC.split_whitespace().collect::<String>()
    );
}
