//! Native tree → generic tree mapping.
//!
//! [`Mapper`] walks one parsed file top-down and builds the generic tree
//! bottom-up through a [`TreeBuilder`]. Constructs with a canonical generic
//! shape get a typed node (see `decl`, `stmt`, `expr`); everything else goes
//! through the declarative native mapping in `native`, driven by `schema`.
//!
//! Every mapping function takes the name of the field holding the node in
//! its parent. Native nodes record it in their `nativeKind` label, e.g.
//! `Params(FieldList)` or `[2](SendStmt)`.

mod decl;
mod expr;
mod native;
pub mod schema;
mod stmt;

use gotree_core::config::MapperConfig;
use gotree_core::errors::ConvertError;
use gotree_core::logging::names;

use crate::enrich::{Enricher, SymbolResolver};
use crate::native::{File, Spanned};
use crate::reconcile::{BuildResult, TreeBuilder};
use crate::tree::{fields, FieldValue, Fields, NodeId, NodeType, TokenKind, Tree};

/// Outcome of mapping one native node: `None` when it produced nothing.
pub type MapResult = BuildResult<Option<NodeId>>;

// ---- Field names shared by typed nodes ----

pub(crate) const KEYWORD: &str = "keyword";
pub(crate) const IDENTIFIER: &str = "identifier";
pub(crate) const IDENTIFIERS: &str = "identifiers";
pub(crate) const OPERATOR: &str = "operator";
pub(crate) const OPERAND: &str = "operand";
pub(crate) const CONDITION: &str = "condition";
pub(crate) const EXPRESSION: &str = "expression";
pub(crate) const EXPRESSIONS: &str = "expressions";
pub(crate) const STATEMENTS: &str = "statementOrExpressions";

/// Per-file mapping switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Turn reconciliation anomalies into errors instead of warnings.
    pub strict: bool,
    /// Attach `id`, `type` and `package` to identifiers.
    pub identifier_info: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            strict: true,
            identifier_info: true,
        }
    }
}

impl From<&MapperConfig> for MapOptions {
    fn from(config: &MapperConfig) -> Self {
        Self {
            strict: config.effective_strict(),
            identifier_info: config.effective_identifier_info(),
        }
    }
}

/// Generic tree of one file plus the leaf lists the serializer emits as
/// metadata.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub tree: Tree,
    pub root: Option<NodeId>,
    pub comments: Vec<NodeId>,
    pub tokens: Vec<NodeId>,
}

pub struct Mapper<'a> {
    builder: TreeBuilder<'a>,
    enricher: Enricher<'a>,
    options: MapOptions,
}

impl<'a> Mapper<'a> {
    pub fn new(
        file: &File,
        source: &'a str,
        file_name: &'a str,
        symbols: &'a dyn SymbolResolver,
        options: MapOptions,
    ) -> Self {
        Self {
            builder: TreeBuilder::new(source, file_name, options.strict),
            enricher: Enricher::new(file, source, symbols),
            options,
        }
    }

    /// Maps `file` into a `TopLevel` root covering the whole source.
    pub fn map_file(mut self, file: &File) -> BuildResult<ConvertedFile> {
        self.builder.map_comments(&file.comments)?;

        let mut children = Vec::new();
        let package = self.map_package_decl(file)?;
        self.builder.append(&mut children, package)?;

        let mut decls = Vec::new();
        for (i, decl) in file.decls.iter().enumerate() {
            let id = self.map_decl(decl, &index_label(i))?;
            self.builder.append(&mut decls, id)?;
        }
        let decl_list = self.builder.create_native(None, decls.clone(), "Decls([]Decl)")?;
        self.builder.append(&mut children, decl_list)?;
        self.builder.add_eof(&mut children)?;

        let mut declarations: Vec<NodeId> = package.into_iter().collect();
        declarations.extend(self.builder.filter_out_comments(&decls));
        let fields = Fields::from([
            ("declarations", FieldValue::Nodes(declarations)),
            ("firstCpdToken", FieldValue::Null),
        ]);
        let root = self
            .builder
            .create_node(Some(file.key()), children, NodeType::TopLevel, fields)?;
        self.check_root(root)?;

        let built = self.builder.finish();
        tracing::debug!(
            nodes = built.tree.len(),
            tokens = built.tokens.len(),
            comments = built.comments.len(),
            "mapped file"
        );
        Ok(ConvertedFile {
            tree: built.tree,
            root,
            comments: built.comments,
            tokens: built.tokens,
        })
    }

    /// `package` keyword and name, preceded by every header comment.
    fn map_package_decl(&mut self, file: &File) -> MapResult {
        let mut children = Vec::new();
        let package = file.package as usize;
        let keyword = self
            .builder
            .create_expected_token(package, "package", "", TokenKind::Keyword)?;
        if let Some(keyword) = keyword {
            self.builder.append_comment_or_missing(&mut children, 0, package)?;
            children.push(keyword);
        }
        let name = self.map_ident(&file.name, "Name")?;
        self.builder.append(&mut children, name)?;

        let fields = Fields::from([(
            fields::CHILDREN,
            FieldValue::Nodes(self.builder.filter_out_comments(&children)),
        )]);
        self.builder
            .create_node(Some(file.key()), children, NodeType::PackageDeclaration, fields)
    }

    fn check_root(&self, root: Option<NodeId>) -> BuildResult<()> {
        let Some(root) = root else {
            return Ok(());
        };
        let node = self.builder.node(root);
        let len = self.builder.source().len();
        if node.end_offset > len {
            if self.builder.is_strict() {
                return Err(ConvertError::UnexpectedRoot {
                    location: self.builder.location(node.offset, node.end_offset),
                });
            }
            tracing::warn!(
                offset = node.offset,
                end_offset = node.end_offset,
                len,
                "root does not cover the source"
            );
        }
        Ok(())
    }

    // ---- Helpers shared by the typed mappings ----

    /// Range field of a keyword or delimiter token.
    pub(crate) fn range_field(&self, id: Option<NodeId>) -> FieldValue {
        FieldValue::Range(self.builder.range_of(id))
    }

    /// Node type of a mapped child, if any.
    pub(crate) fn node_type(&self, id: Option<NodeId>) -> Option<NodeType> {
        id.map(|id| self.builder.node(id).node_type)
    }
}

/// Label of the `i`-th element of a list field.
pub(crate) fn index_label(i: usize) -> String {
    format!("[{i}]")
}

/// Maps `file` with a fresh [`Mapper`].
pub fn map_file(
    file: &File,
    source: &str,
    file_name: &str,
    symbols: &dyn SymbolResolver,
    options: MapOptions,
) -> BuildResult<ConvertedFile> {
    let _span = tracing::debug_span!(names::MAP_FILE, file = file_name).entered();
    Mapper::new(file, source, file_name, symbols, options).map_file(file)
}
