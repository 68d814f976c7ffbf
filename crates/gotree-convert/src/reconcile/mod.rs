//! Leaf creation and child-list reconciliation.
//!
//! [`TreeBuilder`] owns the arena while one file is mapped. Every child
//! appended through [`TreeBuilder::append`] has the source between it and its
//! previous sibling accounted for: comments are placed there and punctuation
//! the native tree does not record is synthesized as tokens.

pub mod missing;

use gotree_core::errors::{ConvertError, Location};

use crate::cfg::IdScopes;
use crate::native::{CommentGroup, NativeKey, Pos, Tok};
use crate::position::LineMap;
use crate::tree::{fields, FieldValue, Fields, Node, NodeId, NodeType, TextRange, Token, TokenKind, Tree};

pub type BuildResult<T> = Result<T, ConvertError>;

/// Arena plus per-file bookkeeping shared by every mapping step.
pub struct TreeBuilder<'s> {
    source: &'s str,
    file_name: &'s str,
    lines: LineMap,
    strict: bool,
    tree: Tree,
    tokens: Vec<NodeId>,
    comments: Vec<NodeId>,
    comment_pos: usize,
    pub cfg_ids: IdScopes,
}

/// What a [`TreeBuilder`] leaves behind once mapping is over.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub tree: Tree,
    /// Comment leaves in source order.
    pub comments: Vec<NodeId>,
    /// Listed token leaves ordered by source offset.
    pub tokens: Vec<NodeId>,
}

impl<'s> TreeBuilder<'s> {
    pub fn new(source: &'s str, file_name: &'s str, strict: bool) -> Self {
        Self {
            source,
            file_name,
            lines: LineMap::new(source),
            strict,
            tree: Tree::new(),
            tokens: Vec::new(),
            comments: Vec::new(),
            comment_pos: 0,
            cfg_ids: IdScopes::new(),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.tree.get_mut(id)
    }

    pub fn location(&self, offset: usize, end_offset: usize) -> Location {
        self.lines
            .location(self.source, self.file_name, offset, end_offset)
    }

    pub fn finish(mut self) -> BuiltTree {
        let tree = &self.tree;
        self.tokens.sort_by_key(|&id| tree.get(id).offset);
        BuiltTree {
            tree: self.tree,
            comments: self.comments,
            tokens: self.tokens,
        }
    }

    // ---- Ranges ----

    fn range(&self, offset: usize, end_offset: usize) -> BuildResult<TextRange> {
        let (start_line, start_column) =
            self.lines
                .checked_position(self.source, self.file_name, offset)?;
        let (end_line, end_column) =
            self.lines
                .checked_position(self.source, self.file_name, end_offset)?;
        Ok(TextRange::new(start_line, start_column, end_line, end_column))
    }

    /// Range of the node `id` when present.
    pub fn range_of(&self, id: Option<NodeId>) -> Option<TextRange> {
        id.map(|id| self.tree.get(id).range)
    }

    // ---- Leaves ----

    /// Pushes a leaf covering `offset..end_offset`.
    ///
    /// Out-of-range spans are always fatal. A zero-width span other than the
    /// end-of-file marker is fatal in strict mode and yields nothing
    /// otherwise.
    pub fn create_leaf(
        &mut self,
        offset: usize,
        end_offset: usize,
        kind: TokenKind,
        node_type: NodeType,
        fields: Fields,
    ) -> BuildResult<Option<NodeId>> {
        if offset > end_offset || end_offset > self.lines.len() {
            return Err(ConvertError::InvalidToken {
                location: self.location(offset, end_offset),
            });
        }
        if offset == end_offset && kind != TokenKind::Eof {
            if self.strict {
                return Err(ConvertError::EmptyToken {
                    location: self.location(offset, end_offset),
                });
            }
            tracing::warn!(file = self.file_name, offset, "skipping empty token");
            return Ok(None);
        }
        let Some(text) = self.source.get(offset..end_offset) else {
            return Err(ConvertError::InvalidToken {
                location: self.location(offset, end_offset),
            });
        };
        let range = self.range(offset, end_offset)?;
        let id = self.tree.push(Node {
            node_type,
            range,
            offset,
            end_offset,
            token: Some(Token {
                text: text.to_string(),
                range,
                kind,
            }),
            children: Vec::new(),
            fields,
        });
        if kind.is_listed() {
            self.tokens.push(id);
        }
        Ok(Some(id))
    }

    /// Native token leaf labelled `label`.
    pub fn create_token(
        &mut self,
        offset: usize,
        end_offset: usize,
        label: &str,
        kind: TokenKind,
    ) -> BuildResult<Option<NodeId>> {
        let fields = Fields::from([(fields::NATIVE_KIND, native_kind(label))]);
        self.create_leaf(offset, end_offset, kind, NodeType::Native, fields)
    }

    /// Span of a token of text `expected` at `offset`, after checking the
    /// source agrees. `None` on a lenient mismatch.
    fn expected_span(&self, offset: usize, expected: &str) -> BuildResult<Option<usize>> {
        let (end_offset, expected) = self.lines.end_offset_for(self.source, offset, expected);
        if end_offset > self.lines.len() {
            return Err(ConvertError::InvalidToken {
                location: self.location(offset, end_offset),
            });
        }
        let actual = self.source.get(offset..end_offset).unwrap_or("");
        if actual == expected {
            return Ok(Some(end_offset));
        }
        if self.strict {
            return Err(ConvertError::TokenValue {
                actual: actual.to_string(),
                expected: expected.to_string(),
                location: self.location(offset, end_offset),
            });
        }
        tracing::warn!(
            file = self.file_name,
            offset,
            expected,
            actual,
            "token text mismatch"
        );
        Ok(None)
    }

    /// Token of known text at `offset`.
    pub fn create_expected_token(
        &mut self,
        offset: usize,
        expected: &str,
        label: &str,
        kind: TokenKind,
    ) -> BuildResult<Option<NodeId>> {
        match self.expected_span(offset, expected)? {
            Some(end_offset) => self.create_token(offset, end_offset, label, kind),
            None => Ok(None),
        }
    }

    /// Typed leaf of known text at `offset`, e.g. a literal.
    pub fn create_expected_leaf(
        &mut self,
        offset: usize,
        expected: &str,
        kind: TokenKind,
        node_type: NodeType,
        fields: Fields,
    ) -> BuildResult<Option<NodeId>> {
        match self.expected_span(offset, expected)? {
            Some(end_offset) => self.create_leaf(offset, end_offset, kind, node_type, fields),
            None => Ok(None),
        }
    }

    /// Token for an operator or keyword the native tree stores as a position.
    pub fn token_from_pos(
        &mut self,
        pos: Option<Pos>,
        tok: Tok,
        label: &str,
    ) -> BuildResult<Option<NodeId>> {
        let Some(pos) = pos else {
            return Ok(None);
        };
        let kind = if tok.is_keyword() {
            TokenKind::Keyword
        } else {
            TokenKind::Other
        };
        self.create_expected_token(pos as usize, tok.text(), label, kind)
    }

    // ---- Inner nodes ----

    /// Node spanning `children`, or a leaf covering `origin` when there are
    /// none. Nodes built from a native origin get a `__cfgId`.
    pub fn create_node(
        &mut self,
        origin: Option<NativeKey>,
        children: Vec<NodeId>,
        node_type: NodeType,
        fields: Fields,
    ) -> BuildResult<Option<NodeId>> {
        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            let Some(key) = origin else {
                return Ok(None);
            };
            let leaf = self.create_leaf(
                key.pos as usize,
                key.end as usize,
                TokenKind::Other,
                node_type,
                fields,
            )?;
            if let Some(id) = leaf {
                self.stamp_cfg_id(id, key);
            }
            return Ok(leaf);
        };
        let (first, last) = (self.tree.get(first), self.tree.get(last));
        let node = Node {
            node_type,
            range: TextRange::span(&first.range, &last.range),
            offset: first.offset,
            end_offset: last.end_offset,
            token: None,
            children,
            fields,
        };
        let id = self.tree.push(node);
        if let Some(key) = origin {
            self.stamp_cfg_id(id, key);
        }
        Ok(Some(id))
    }

    /// Gives `id` the next CFG id of the current scope, bound to `key`.
    pub fn stamp_cfg_id(&mut self, id: NodeId, key: NativeKey) {
        let cfg_id = self.cfg_ids.assign(key);
        self.tree
            .get_mut(id)
            .fields
            .insert(fields::CFG_ID, FieldValue::Int(i64::from(cfg_id)));
    }

    /// Untyped node labelled `label`, listing its non-comment children.
    pub fn create_native(
        &mut self,
        origin: Option<NativeKey>,
        children: Vec<NodeId>,
        label: &str,
    ) -> BuildResult<Option<NodeId>> {
        let fields = Fields::from([
            (fields::CHILDREN, FieldValue::Nodes(self.filter_out_comments(&children))),
            (fields::NATIVE_KIND, native_kind(label)),
        ]);
        self.create_node(origin, children, NodeType::Native, fields)
    }

    /// `children` without comments and the end-of-file marker.
    pub fn filter_out_comments(&self, children: &[NodeId]) -> Vec<NodeId> {
        children
            .iter()
            .copied()
            .filter(|&id| match &self.tree.get(id).token {
                Some(token) => token.kind.is_listed(),
                None => true,
            })
            .collect()
    }

    // ---- Reconciliation ----

    /// Appends `child`, first reconciling the gap after the previous sibling.
    pub fn append(&mut self, children: &mut Vec<NodeId>, child: Option<NodeId>) -> BuildResult<()> {
        let Some(child) = child else {
            return Ok(());
        };
        if let Some(&last) = children.last() {
            let gap_start = self.tree.get(last).end_offset;
            let gap_end = self.tree.get(child).offset;
            if gap_start > gap_end {
                if self.strict {
                    return Err(ConvertError::TokenSequence {
                        location: self.location(gap_start, gap_end),
                    });
                }
                tracing::warn!(file = self.file_name, gap_start, gap_end, "out of order child");
            } else {
                self.append_comment_or_missing(children, gap_start, gap_end)?;
            }
        }
        children.push(child);
        Ok(())
    }

    pub fn append_all(
        &mut self,
        children: &mut Vec<NodeId>,
        items: impl IntoIterator<Item = Option<NodeId>>,
    ) -> BuildResult<()> {
        for item in items {
            self.append(children, item)?;
        }
        Ok(())
    }

    /// Places every comment lying inside `offset..end_offset` and
    /// synthesizes tokens for the text between them.
    pub fn append_comment_or_missing(
        &mut self,
        children: &mut Vec<NodeId>,
        mut offset: usize,
        end_offset: usize,
    ) -> BuildResult<()> {
        while self.comment_pos > 0
            && self.tree.get(self.comments[self.comment_pos - 1]).offset >= offset
        {
            self.comment_pos -= 1;
        }
        while self.comment_pos < self.comments.len() {
            let comment = self.comments[self.comment_pos];
            let (comment_offset, comment_end) = {
                let node = self.tree.get(comment);
                (node.offset, node.end_offset)
            };
            if comment_offset >= offset {
                if comment_end > end_offset {
                    break;
                }
                self.append_missing(children, offset, comment_offset)?;
                children.push(comment);
                offset = comment_end;
            }
            self.comment_pos += 1;
        }
        self.append_missing(children, offset, end_offset)
    }

    /// Synthesizes tokens for the non-blank text in `offset..end_offset`.
    pub fn append_missing(
        &mut self,
        children: &mut Vec<NodeId>,
        mut offset: usize,
        mut end_offset: usize,
    ) -> BuildResult<()> {
        if offset > end_offset || end_offset > self.lines.len() {
            if self.strict {
                return Err(ConvertError::TokenSequence {
                    location: self.location(offset, end_offset),
                });
            }
            return Ok(());
        }
        let source = self.source;
        let bytes = source.as_bytes();
        while offset < end_offset && bytes[offset] <= b' ' {
            offset += 1;
        }
        while end_offset > offset && bytes[end_offset - 1] <= b' ' {
            end_offset -= 1;
        }
        while offset < end_offset {
            let expected = missing::lookup(bytes[offset])
                .filter(|token| bytes[offset..].starts_with(token.text.as_bytes()));
            match expected {
                Some(token) => {
                    let end = offset + token.text.len();
                    let id = self.create_token(offset, end, token.label, token.kind)?;
                    children.extend(id);
                    offset = end;
                }
                None => {
                    let text = source.get(offset..end_offset).unwrap_or("");
                    if self.strict {
                        return Err(ConvertError::MissingToken {
                            text: text.to_string(),
                            location: self.location(offset, end_offset),
                        });
                    }
                    tracing::warn!(file = self.file_name, offset, text, "unrecognised gap text");
                    let rest = self.create_token(offset, end_offset, "", TokenKind::Other)?;
                    children.extend(rest);
                    return Ok(());
                }
            }
            while offset < end_offset && bytes[offset] <= b' ' {
                offset += 1;
            }
        }
        Ok(())
    }

    // ---- File-level tokens ----

    /// Creates one leaf per comment, in source order.
    pub fn map_comments(&mut self, groups: &[CommentGroup]) -> BuildResult<()> {
        for comment in groups.iter().flat_map(|group| &group.list) {
            if let Some(id) = self.create_expected_token(
                comment.slash as usize,
                &comment.text,
                "",
                TokenKind::Comment,
            )? {
                self.comments.push(id);
            }
        }
        Ok(())
    }

    /// Appends the zero-width end-of-file marker.
    pub fn add_eof(&mut self, children: &mut Vec<NodeId>) -> BuildResult<()> {
        let len = self.lines.len();
        let eof = self.create_token(len, len, "", TokenKind::Eof)?;
        self.append(children, eof)
    }
}

fn native_kind(label: &str) -> FieldValue {
    if label.is_empty() {
        FieldValue::Suppressed
    } else {
        FieldValue::Str(label.to_string())
    }
}
