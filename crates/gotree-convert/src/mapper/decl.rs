//! Declarations: functions, imports, single-spec type and value declarations.

use super::{index_label, MapResult, Mapper, IDENTIFIER, IDENTIFIERS};
use crate::cfg::Cfg;
use crate::native::{
    BlockStmt, Decl, FuncDecl, FuncLit, GenDecl, ImportSpec, ListRole, NativeKey, NativeRef,
    Spanned, Spec, Tok, TypeSpec, ValueSpec,
};
use crate::tree::{fields, FieldValue, Fields, NodeId, NodeType};

impl<'a> Mapper<'a> {
    pub(crate) fn map_decl(&mut self, decl: &Decl, label: &str) -> MapResult {
        match decl {
            Decl::Bad(_) => self.map_native(NativeRef::Decl(decl), label),
            Decl::Gen(gen) => self.map_gen_decl(gen, label),
            Decl::Func(func) => self.map_func_decl(func),
        }
    }

    pub(crate) fn map_spec(&mut self, spec: &Spec, label: &str) -> MapResult {
        match spec {
            Spec::Import(import) => self.map_import_spec(spec, import),
            Spec::Value(_) | Spec::Type(_) => self.map_native(NativeRef::Spec(spec), label),
        }
    }

    /// General declarations; falls back to the native mapping for grouped
    /// or multi-spec forms.
    pub(crate) fn map_gen_decl(&mut self, decl: &GenDecl, label: &str) -> MapResult {
        let mapped = match decl.tok {
            Tok::Import => self.map_import_decl(decl)?,
            Tok::Type => match (decl.lparen, decl.specs.as_slice()) {
                (None, [spec @ Spec::Type(ty)]) => self.map_type_decl(decl, spec, ty, label)?,
                _ => None,
            },
            Tok::Const | Tok::Var => match decl.specs.as_slice() {
                [Spec::Value(spec)] => self.map_value_decl(decl, spec)?,
                _ => None,
            },
            _ => None,
        };
        match mapped {
            Some(id) => Ok(Some(id)),
            None => self.map_native(NativeRef::GenDecl(decl), label),
        }
    }

    fn map_import_decl(&mut self, decl: &GenDecl) -> MapResult {
        let mut children = Vec::new();
        let tok = self.builder.token_from_pos(Some(decl.tok_pos), decl.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;
        let lparen = self.builder.token_from_pos(decl.lparen, Tok::LParen, "Lparen")?;
        self.builder.append(&mut children, lparen)?;
        for (i, spec) in decl.specs.iter().enumerate() {
            let id = self.map_spec(spec, &index_label(i))?;
            self.builder.append(&mut children, id)?;
        }
        let rparen = self.builder.token_from_pos(decl.rparen, Tok::RParen, "Rparen")?;
        self.builder.append(&mut children, rparen)?;

        let fields = Fields::from([(
            fields::CHILDREN,
            FieldValue::Nodes(self.builder.filter_out_comments(&children)),
        )]);
        self.builder
            .create_node(Some(decl.key()), children, NodeType::ImportDeclaration, fields)
    }

    fn map_import_spec(&mut self, spec: &Spec, import: &ImportSpec) -> MapResult {
        let mut children = Vec::new();
        let name = match &import.name {
            Some(name) => self.map_ident(name, "Name")?,
            None => None,
        };
        self.builder.append(&mut children, name)?;
        let path = self.map_basic_lit(&import.path, "Path")?;
        self.builder.append(&mut children, path)?;

        let fields = Fields::from([
            ("name", FieldValue::Node(name)),
            ("path", FieldValue::Node(path)),
        ]);
        self.builder
            .create_node(Some(spec.key()), children, NodeType::ImportSpecification, fields)
    }

    /// `type T ...`: a class declaration wrapping the whole spec.
    fn map_type_decl(
        &mut self,
        decl: &GenDecl,
        spec: &Spec,
        type_spec: &TypeSpec,
        label: &str,
    ) -> MapResult {
        let mut children = Vec::new();
        let tok = self.builder.token_from_pos(Some(decl.tok_pos), decl.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;
        let name = self.map_ident(&type_spec.name, "Name")?;
        self.builder.append(&mut children, name)?;
        let type_params = self.map_opt_field_list(
            type_spec.type_params.as_ref(),
            ListRole::TypeParams,
            "TypeParams",
        )?;
        self.builder.append(&mut children, type_params)?;
        let assign = self.builder.token_from_pos(type_spec.assign, Tok::Assign, "Assign")?;
        self.builder.append(&mut children, assign)?;
        let ty = self.map_expr(&type_spec.ty, "Type")?;
        self.builder.append(&mut children, ty)?;

        let key = spec.key();
        let class_tree =
            self.builder
                .create_native(Some(key), children, &format!("{label}(TypeSpecWrapped)"))?;
        let fields = Fields::from([
            (IDENTIFIER, self.range_field(name)),
            ("classTree", FieldValue::Node(class_tree)),
        ]);
        self.builder.create_node(
            Some(key),
            class_tree.into_iter().collect(),
            NodeType::ClassDeclaration,
            fields,
        )
    }

    /// `var`/`const` with exactly one spec.
    fn map_value_decl(&mut self, decl: &GenDecl, spec: &ValueSpec) -> MapResult {
        let mut children = Vec::new();
        let tok = self.builder.token_from_pos(Some(decl.tok_pos), decl.tok, "Tok")?;
        self.builder.append(&mut children, tok)?;
        let lparen = self.builder.token_from_pos(decl.lparen, Tok::LParen, "Lparen")?;
        self.builder.append(&mut children, lparen)?;

        let mut identifiers = Vec::with_capacity(spec.names.len());
        for (i, name) in spec.names.iter().enumerate() {
            let id = self.map_ident(name, &index_label(i))?;
            identifiers.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let ty = self.map_opt_expr(spec.ty.as_ref(), "Type")?;
        self.builder.append(&mut children, ty)?;
        let mut initializers = Vec::with_capacity(spec.values.len());
        for (i, value) in spec.values.iter().enumerate() {
            let id = self.map_expr(value, &index_label(i))?;
            initializers.extend(id);
            self.builder.append(&mut children, id)?;
        }
        let rparen = self.builder.token_from_pos(decl.rparen, Tok::RParen, "Rparen")?;
        self.builder.append(&mut children, rparen)?;

        let fields = Fields::from([
            ("isVal", FieldValue::Bool(decl.tok == Tok::Const)),
            (IDENTIFIERS, FieldValue::Nodes(identifiers)),
            ("type", FieldValue::Node(ty)),
            ("initializers", FieldValue::Nodes(initializers)),
        ]);
        self.builder
            .create_node(Some(decl.key()), children, NodeType::VariableDeclaration, fields)
    }

    // ---- Functions ----

    fn map_func_decl(&mut self, func: &FuncDecl) -> MapResult {
        self.builder.cfg_ids.enter();
        let mut children = Vec::new();
        let keyword = self.builder.token_from_pos(func.ty.func, Tok::Func, "Type.Func")?;
        self.builder.append(&mut children, keyword)?;
        let receiver = self.map_opt_field_list(func.recv.as_ref(), ListRole::Receiver, "Recv")?;
        self.builder.append(&mut children, receiver)?;
        let name = self.map_ident(&func.name, "Name")?;
        self.builder.append(&mut children, name)?;
        let type_params = self.map_opt_field_list(
            func.ty.type_params.as_ref(),
            ListRole::TypeParams,
            "TypeParams",
        )?;
        self.builder.append(&mut children, type_params)?;
        let params = self.map_field_list(&func.ty.params, ListRole::Params, "Params")?;
        self.builder.append(&mut children, params)?;
        let results =
            self.map_opt_field_list(func.ty.results.as_ref(), ListRole::Results, "Results")?;
        self.builder.append(&mut children, results)?;
        let body = match &func.body {
            Some(body) => self.map_block(body, "Body")?,
            None => None,
        };
        self.builder.append(&mut children, body)?;
        let cfg = self.leave_function(func.body.as_ref());

        let fields = Fields::from([
            ("receiver", FieldValue::Node(receiver)),
            ("name", FieldValue::Node(name)),
            ("typeParameters", FieldValue::Node(type_params)),
            ("formalParameters", FieldValue::Nodes(self.formal_parameters(params))),
            ("returnType", FieldValue::Node(results)),
            ("body", FieldValue::Node(body)),
            ("cfg", FieldValue::Cfg(cfg)),
        ]);
        self.builder
            .create_node(Some(func.key()), children, NodeType::FunctionDeclaration, fields)
    }

    pub(crate) fn map_func_lit(&mut self, key: NativeKey, lit: &FuncLit) -> MapResult {
        self.builder.cfg_ids.enter();
        let mut children = Vec::new();
        let keyword = self.builder.token_from_pos(lit.ty.func, Tok::Func, "Type.Func")?;
        self.builder.append(&mut children, keyword)?;
        let params = self.map_field_list(&lit.ty.params, ListRole::Params, "Params")?;
        self.builder.append(&mut children, params)?;
        let results =
            self.map_opt_field_list(lit.ty.results.as_ref(), ListRole::Results, "Results")?;
        self.builder.append(&mut children, results)?;
        let type_params = self.map_opt_field_list(
            lit.ty.type_params.as_ref(),
            ListRole::TypeParams,
            "TypeParams",
        )?;
        self.builder.append(&mut children, type_params)?;
        let body = self.map_block(&lit.body, "Body")?;
        self.builder.append(&mut children, body)?;
        let cfg = self.leave_function(Some(&lit.body));

        let fields = Fields::from([
            ("formalParameters", FieldValue::Nodes(self.formal_parameters(params))),
            ("returnType", FieldValue::Node(results)),
            ("typeParameters", FieldValue::Node(type_params)),
            ("body", FieldValue::Node(body)),
            ("receiver", FieldValue::Null),
            ("cfg", FieldValue::Cfg(cfg)),
        ]);
        self.builder
            .create_node(Some(key), children, NodeType::FunctionDeclaration, fields)
    }

    /// Closes the function's id scope and builds its graph from the ids
    /// handed out while its children were mapped.
    fn leave_function(&mut self, body: Option<&BlockStmt>) -> Option<Cfg> {
        let scope = self.builder.cfg_ids.leave()?;
        let body = body?;
        let _span = tracing::trace_span!(gotree_core::logging::names::EXTRACT_CFG).entered();
        Some(Cfg::extract(body, &scope))
    }

    /// Parameters out of a mapped `Params` list: every even child of each
    /// element between the parentheses, which skips separating commas.
    fn formal_parameters(&self, params: Option<NodeId>) -> Vec<NodeId> {
        let Some(params) = params else {
            return Vec::new();
        };
        let list = self
            .builder
            .filter_out_comments(&self.builder.node(params).children);
        if list.len() < 2 {
            return Vec::new();
        }
        list[1..list.len() - 1]
            .iter()
            .flat_map(|&item| {
                self.builder
                    .filter_out_comments(&self.builder.node(item).children)
                    .into_iter()
                    .step_by(2)
            })
            .collect()
    }
}
