//! Generic tree: an arena of nodes addressed by [`NodeId`].
//!
//! Nodes are pushed bottom-up while mapping and never removed. A node's
//! `children` list is its structural content in source order; semantic
//! `fields` point at nodes that also appear somewhere below it.

pub mod node_type;
pub mod token;

use std::collections::BTreeMap;

pub use node_type::NodeType;
pub use token::{TextRange, Token, TokenKind};

use crate::cfg::Cfg;

/// Index of a node in its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Value of a named semantic field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Single child, possibly absent.
    Node(Option<NodeId>),
    Nodes(Vec<NodeId>),
    /// Range of a keyword or delimiter token; absent when the token could
    /// not be produced.
    Range(Option<TextRange>),
    Str(String),
    Int(i64),
    Bool(bool),
    Strings(Vec<String>),
    Cfg(Option<Cfg>),
    /// Explicit scalar `null`.
    Null,
    /// Never written.
    Suppressed,
}

/// Semantic fields ordered by name.
pub type Fields = BTreeMap<&'static str, FieldValue>;

#[derive(Debug, Clone)]
pub struct Node {
    pub node_type: NodeType,
    pub range: TextRange,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Byte offset just past the last character.
    pub end_offset: usize,
    /// Set for leaves only.
    pub token: Option<Token>,
    pub children: Vec<NodeId>,
    pub fields: Fields,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_comment(&self) -> bool {
        matches!(&self.token, Some(t) if t.kind == TokenKind::Comment)
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The single child stored under `name`, if any.
    pub fn node_field(&self, name: &str) -> Option<NodeId> {
        match self.fields.get(name) {
            Some(FieldValue::Node(id)) => *id,
            _ => None,
        }
    }

    /// The child list stored under `name`; empty when absent.
    pub fn nodes_field(&self, name: &str) -> &[NodeId] {
        match self.fields.get(name) {
            Some(FieldValue::Nodes(ids)) => ids,
            _ => &[],
        }
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn native_kind(&self) -> Option<&str> {
        self.str_field(fields::NATIVE_KIND)
    }

    pub fn cfg_id(&self) -> Option<i64> {
        match self.fields.get(fields::CFG_ID) {
            Some(FieldValue::Int(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Field names shared by every node type.
pub mod fields {
    pub const CHILDREN: &str = "children";
    pub const NATIVE_KIND: &str = "nativeKind";
    pub const CFG_ID: &str = "__cfgId";
}

/// Arena owning every node of one converted file.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Source text covered by `id`.
    pub fn text<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        let node = self.get(id);
        source.get(node.offset..node.end_offset).unwrap_or("")
    }

    /// Every node reachable from `root` through `children`, parents first.
    pub fn preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.get(id).children.iter().rev().copied());
        }
        out
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
