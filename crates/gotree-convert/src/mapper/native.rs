//! Declarative mapping of native nodes without a typed generic shape.
//!
//! A native node becomes a `Native` generic node whose children are its
//! fields mapped in grammar order. The schema decides per field whether a
//! list is wrapped, which delimiters a field list uses and which fields
//! carry no source text at all.

use super::schema::{self, FieldRule};
use super::{index_label, MapResult, Mapper, IDENTIFIER};
use crate::native::{
    BasicLit, Child, Field, FieldList, ListRole, NativeKey, NativeRef, NodeKind, Spanned, Stmt,
};
use crate::reconcile::BuildResult;
use crate::tree::{FieldValue, Fields, NodeId, NodeType, TokenKind};

impl<'a> Mapper<'a> {
    /// Maps `node` field by field into a node labelled `label(Kind)`.
    pub(crate) fn map_native(&mut self, node: NativeRef<'_>, label: &str) -> MapResult {
        let kind = node.kind();
        let key = node.key();
        let native_label = format!("{label}({kind})");
        if kind.is_forced_leaf() {
            return self.builder.create_native(Some(key), Vec::new(), &native_label);
        }
        if let NativeRef::Stmt(Stmt::Empty(empty)) = node {
            if empty.implicit {
                return Ok(None);
            }
        }

        let mut children = Vec::new();
        for (field, child) in node.fields() {
            self.map_native_field(node, field, child, &mut children)?;
        }
        self.builder.create_native(Some(key), children, &native_label)
    }

    fn map_native_field(
        &mut self,
        node: NativeRef<'_>,
        field: &'static str,
        child: Child<'_>,
        children: &mut Vec<NodeId>,
    ) -> BuildResult<()> {
        let kind = node.kind();
        let rule = schema::rule(kind, field);
        if rule == FieldRule::Skip {
            return Ok(());
        }
        match child {
            Child::Scalar => {}
            Child::Token(pos, tok) => {
                let id = self.builder.token_from_pos(pos, tok, field)?;
                self.builder.append(children, id)?;
            }
            Child::Ident(ident) => {
                if let Some(ident) = ident {
                    let id = self.map_ident(ident, field)?;
                    self.builder.append(children, id)?;
                }
            }
            Child::Expr(expr) => {
                let id = self.map_opt_expr(expr, field)?;
                self.builder.append(children, id)?;
            }
            Child::Stmt(stmt) => {
                let id = self.map_opt_stmt(stmt, field)?;
                self.builder.append(children, id)?;
            }
            Child::Block(block) => {
                let id = self.map_block(block, field)?;
                self.builder.append(children, id)?;
            }
            Child::Call(call) => {
                let id = self.map_call(call, field)?;
                self.builder.append(children, id)?;
            }
            Child::FieldList(list) => {
                if let Some(list) = list {
                    let role = match rule {
                        FieldRule::Delimited(role) => role,
                        _ => ListRole::Params,
                    };
                    let id = self.map_field_list(list, role, field)?;
                    self.builder.append(children, id)?;
                }
            }
            Child::Tag(tag) => {
                let id = self.map_basic_lit_tag(tag, field)?;
                self.builder.append(children, id)?;
            }
            Child::Idents(list) => {
                let mut items = Vec::with_capacity(list.len());
                for (i, ident) in list.iter().enumerate() {
                    items.push(self.map_ident(ident, &index_label(i))?);
                }
                self.append_list(kind, field, items, children)?;
            }
            Child::Exprs(list) => {
                let mut items = Vec::with_capacity(list.len());
                for (i, expr) in list.iter().enumerate() {
                    items.push(self.map_expr(expr, &index_label(i))?);
                }
                self.append_list(kind, field, items, children)?;
            }
            Child::Stmts(list) => {
                let mut items = Vec::with_capacity(list.len());
                for (i, stmt) in list.iter().enumerate() {
                    items.push(self.map_stmt(stmt, &index_label(i))?);
                }
                self.append_list(kind, field, items, children)?;
            }
            Child::Specs(list) => {
                let mut items = Vec::with_capacity(list.len());
                for (i, spec) in list.iter().enumerate() {
                    items.push(self.map_spec(spec, &index_label(i))?);
                }
                self.append_list(kind, field, items, children)?;
            }
            Child::Fields(list) => {
                let role = match node {
                    NativeRef::FieldList(_, role) => role,
                    _ => ListRole::Brace,
                };
                let mut items = Vec::with_capacity(list.len());
                for (i, item) in list.iter().enumerate() {
                    let label = index_label(i);
                    let id = match role {
                        ListRole::Params => self.map_field_param(item, &label)?,
                        _ => self.map_native(NativeRef::Field(item), &label)?,
                    };
                    items.push(id);
                }
                self.append_list(kind, field, items, children)?;
            }
        }
        Ok(())
    }

    /// Appends mapped list elements, grouped under a wrapper node when the
    /// schema asks for one.
    fn append_list(
        &mut self,
        kind: NodeKind,
        field: &'static str,
        items: Vec<Option<NodeId>>,
        children: &mut Vec<NodeId>,
    ) -> BuildResult<()> {
        match schema::wrapper_label(kind, field) {
            Some(wrapper) => {
                let mut list = Vec::with_capacity(items.len());
                self.builder.append_all(&mut list, items)?;
                let id = self.builder.create_native(None, list, wrapper)?;
                self.builder.append(children, id)
            }
            None => self.builder.append_all(children, items),
        }
    }

    pub(crate) fn map_field_list(
        &mut self,
        list: &FieldList,
        role: ListRole,
        label: &str,
    ) -> MapResult {
        self.map_native(NativeRef::FieldList(list, role), label)
    }

    pub(crate) fn map_opt_field_list(
        &mut self,
        list: Option<&FieldList>,
        role: ListRole,
        label: &str,
    ) -> MapResult {
        match list {
            Some(list) => self.map_field_list(list, role, label),
            None => Ok(None),
        }
    }

    /// A parameter group such as `a, b int`: one `Parameter` per name, the
    /// type attached to the last one only.
    pub(crate) fn map_field_param(&mut self, field: &Field, label: &str) -> MapResult {
        let Some((last, leading)) = field.names.split_last() else {
            return self.map_native(NativeRef::Field(field), label);
        };
        let mut children = Vec::new();
        for (i, name) in leading.iter().enumerate() {
            let ident = self.map_ident(name, &format!("{label}[{i}]"))?;
            let parameter = self.create_parameter(name.key(), ident, None)?;
            self.builder.append(&mut children, parameter)?;
        }
        let ident = self.map_ident(last, &format!("{label}[{}]", leading.len()))?;
        let ty = self.map_expr(&field.ty, "Type")?;
        let parameter = self.create_parameter(last.key(), ident, ty)?;
        self.builder.append(&mut children, parameter)?;

        self.builder
            .create_native(Some(field.key()), children, &format!("{label}(Field)"))
    }

    fn create_parameter(
        &mut self,
        origin: NativeKey,
        ident: Option<NodeId>,
        ty: Option<NodeId>,
    ) -> MapResult {
        let mut children: Vec<NodeId> = ident.into_iter().collect();
        self.builder.append(&mut children, ty)?;
        let fields = Fields::from([
            (IDENTIFIER, FieldValue::Node(ident)),
            ("type", FieldValue::Node(ty)),
        ]);
        self.builder
            .create_node(Some(origin), children, NodeType::Parameter, fields)
    }

    /// Struct tags stay plain tokens.
    pub(crate) fn map_basic_lit_tag(&mut self, tag: Option<&BasicLit>, label: &str) -> MapResult {
        let Some(tag) = tag else {
            return Ok(None);
        };
        self.builder.create_expected_token(
            tag.value_pos as usize,
            &tag.value,
            &format!("{label}(BasicLit)"),
            TokenKind::Other,
        )
    }
}
