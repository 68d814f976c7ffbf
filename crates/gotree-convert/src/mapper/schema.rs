//! Declarative rules for native fields that need more than in-place mapping.
//!
//! Every `(kind, field)` pair not listed maps in place: tokens and single
//! children are appended as they are, list elements are appended one by one.
//! The table is built once and every entry is checked against the field
//! names [`NodeKind::fields`] declares.

use std::sync::OnceLock;

use gotree_core::collections::FxHashMap;

use crate::native::{ListRole, NodeKind};

/// What happens to one native field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Inline,
    /// List elements are grouped under a native node with this label.
    Wrapped(&'static str),
    /// A field list whose delimiters and element mapping depend on the role.
    Delimited(ListRole),
    /// No source text of its own; reconciliation recovers whatever it covers.
    Skip,
}

const RULES: &[(NodeKind, &str, FieldRule)] = &[
    // ---- Wrapped lists ----
    (NodeKind::File, "Decls", FieldRule::Wrapped("Decls([]Decl)")),
    (NodeKind::GenDecl, "Specs", FieldRule::Wrapped("Specs([]Spec)")),
    (NodeKind::Field, "Names", FieldRule::Wrapped("Names([]*Ident)")),
    (NodeKind::ValueSpec, "Names", FieldRule::Wrapped("Names([]*Ident)")),
    (NodeKind::ValueSpec, "Values", FieldRule::Wrapped("Values([]Expr)")),
    (NodeKind::AssignStmt, "Lhs", FieldRule::Wrapped("Lhs([]Expr)")),
    (NodeKind::AssignStmt, "Rhs", FieldRule::Wrapped("Rhs([]Expr)")),
    (NodeKind::CaseClause, "Body", FieldRule::Wrapped("Body([]Stmt)")),
    (NodeKind::CommClause, "Body", FieldRule::Wrapped("Body([]Stmt)")),
    (NodeKind::CallExpr, "Args", FieldRule::Wrapped("Args([]Expr)")),
    (NodeKind::CompositeLit, "Elts", FieldRule::Wrapped("Elts([]Expr)")),
    // ---- Field list roles ----
    (NodeKind::StructType, "Fields", FieldRule::Delimited(ListRole::Brace)),
    (NodeKind::InterfaceType, "Methods", FieldRule::Delimited(ListRole::Brace)),
    (NodeKind::FuncType, "Params", FieldRule::Delimited(ListRole::Params)),
    (NodeKind::FuncType, "Results", FieldRule::Delimited(ListRole::Results)),
    (NodeKind::FuncType, "TypeParams", FieldRule::Delimited(ListRole::TypeParams)),
    (NodeKind::FuncDecl, "Recv", FieldRule::Delimited(ListRole::Receiver)),
    (NodeKind::TypeSpec, "TypeParams", FieldRule::Delimited(ListRole::TypeParams)),
    // ---- Suppressed ----
    (NodeKind::ChanType, "Begin", FieldRule::Skip),
    (NodeKind::ChanType, "Arrow", FieldRule::Skip),
    (NodeKind::ChanType, "Dir", FieldRule::Skip),
];

type RuleTable = FxHashMap<(NodeKind, &'static str), FieldRule>;

fn table() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        debug_assert!(validate().is_empty(), "rules for undeclared fields: {:?}", validate());
        let table: RuleTable = RULES
            .iter()
            .map(|&(kind, field, rule)| ((kind, field), rule))
            .collect();
        debug_assert_eq!(table.len(), RULES.len(), "duplicate field rules");
        table
    })
}

/// Rule for `field` of `kind`.
pub fn rule(kind: NodeKind, field: &'static str) -> FieldRule {
    table()
        .get(&(kind, field))
        .copied()
        .unwrap_or(FieldRule::Inline)
}

/// Label of the node wrapping list `field` of `kind`, if it is wrapped.
pub fn wrapper_label(kind: NodeKind, field: &'static str) -> Option<&'static str> {
    match rule(kind, field) {
        FieldRule::Wrapped(label) => Some(label),
        _ => None,
    }
}

/// Entries naming a field their kind does not have.
fn validate() -> Vec<(NodeKind, &'static str)> {
    RULES
        .iter()
        .filter(|(kind, field, _)| !kind.fields().contains(field))
        .map(|&(kind, field, _)| (kind, field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::*;

    #[test]
    fn test_every_rule_names_a_declared_field() {
        assert_eq!(validate(), Vec::new());
    }

    #[test]
    fn test_rules_are_unique() {
        assert_eq!(table().len(), RULES.len());
    }

    #[test]
    fn test_first_lookup_builds_a_checked_table() {
        // Building the table asserts the schema in debug builds.
        assert_eq!(rule(NodeKind::File, "Decls"), FieldRule::Wrapped("Decls([]Decl)"));
        assert!(std::ptr::eq(table(), table()));
    }

    #[test]
    fn test_every_native_field_list_has_a_role() {
        // Each field list a native kind exposes must say which delimiters it uses.
        let list = FieldList {
            opening: None,
            list: Vec::new(),
            closing: None,
        };
        let ty = FuncType {
            func: None,
            type_params: None,
            params: list.clone(),
            results: None,
        };
        let exprs = [
            Expr::StructType(StructType {
                struct_pos: 0,
                fields: list.clone(),
                incomplete: false,
            }),
            Expr::InterfaceType(InterfaceType {
                interface: 0,
                methods: list.clone(),
                incomplete: false,
            }),
            Expr::FuncType(ty),
        ];
        let spec = Spec::Type(TypeSpec {
            name: Ident::new(0, "T"),
            type_params: None,
            assign: None,
            ty: Expr::Ident(Ident::new(2, "int")),
        });
        let refs = exprs
            .iter()
            .map(NativeRef::Expr)
            .chain(std::iter::once(NativeRef::Spec(&spec)));
        for node in refs {
            for (field, child) in node.fields() {
                if let Child::FieldList(_) = child {
                    assert!(
                        matches!(rule(node.kind(), field), FieldRule::Delimited(_)),
                        "{}.{field} has no role",
                        node.kind()
                    );
                }
            }
        }
    }

    #[test]
    fn test_unlisted_fields_map_inline() {
        assert_eq!(rule(NodeKind::SendStmt, "Chan"), FieldRule::Inline);
        assert_eq!(wrapper_label(NodeKind::CallExpr, "Args"), Some("Args([]Expr)"));
        assert_eq!(wrapper_label(NodeKind::BlockStmt, "List"), None);
    }
}
