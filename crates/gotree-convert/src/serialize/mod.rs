//! Deterministic text output.
//!
//! A file document lists the comments and tokens as metadata, then the
//! tree, then an optional error message. Node fields are written in reverse
//! name order and every container is emitted in source order, so equal
//! input always yields byte-identical output.

mod batch;
pub mod json;
mod node;

pub use batch::BatchDocument;

use gotree_core::constants::DEFAULT_INDENT;
use gotree_core::errors::ConvertError;
use gotree_core::logging::names;

use crate::mapper::ConvertedFile;
use node::{write_comment, write_node, write_token};

/// Writes per-file documents with a fixed indentation unit.
#[derive(Debug, Clone)]
pub struct Serializer {
    indent: String,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Serializer {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Document of a converted file, with an optional error message.
    pub fn document(
        &self,
        file: &ConvertedFile,
        error: Option<&str>,
    ) -> Result<String, ConvertError> {
        let _span = tracing::trace_span!(names::SERIALIZE).entered();
        let mut out = String::with_capacity(file.tree.len() * 64);
        out.push_str("{ \n");
        self.write_metadata(&mut out, file)?;
        self.write_tree(&mut out, Some(file));
        self.write_error(&mut out, error);
        out.push_str("\n} \n");
        Ok(out)
    }

    /// Document of a file that produced no tree: empty metadata, a `null`
    /// tree and the error message.
    pub fn failure_document(&self, error: &str) -> String {
        let i = &self.indent;
        let mut out = String::from("{ \n");
        out.push_str(&format!("{i}\"treeMetaData\": {{\n"));
        out.push_str(&format!("{i}{i}\"comments\": [\n{i}{i}],\n"));
        out.push_str(&format!("{i}{i}\"tokens\": [\n{i}{i}]\n"));
        out.push_str(&format!("{i}}},\n"));
        self.write_tree(&mut out, None);
        self.write_error(&mut out, Some(error));
        out.push_str("\n} \n");
        out
    }

    fn write_metadata(&self, out: &mut String, file: &ConvertedFile) -> Result<(), ConvertError> {
        let i = &self.indent;
        let item_prefix = i.repeat(3);
        out.push_str(&format!("{i}\"treeMetaData\": {{\n"));

        out.push_str(&format!("{i}{i}\"comments\": [\n"));
        for (n, &id) in file.comments.iter().enumerate() {
            if n > 0 {
                out.push_str(",\n");
            }
            out.push_str(&item_prefix);
            write_comment(out, &file.tree, id)?;
        }
        if !file.comments.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{i}{i}],\n"));

        out.push_str(&format!("{i}{i}\"tokens\": [\n"));
        for (n, &id) in file.tokens.iter().enumerate() {
            if n > 0 {
                out.push_str(",\n");
            }
            write_token(out, &file.tree, id, &item_prefix);
        }
        if !file.tokens.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{i}{i}]\n"));
        out.push_str(&format!("{i}}},\n"));
        Ok(())
    }

    fn write_tree(&self, out: &mut String, file: Option<&ConvertedFile>) {
        let i = &self.indent;
        out.push_str(&format!("{i}\"tree\":\n"));
        let prefix = i.repeat(2);
        match file {
            Some(file) => write_node(out, &file.tree, file.root, &prefix, i),
            None => {
                out.push_str(&prefix);
                out.push_str("null");
            }
        }
        out.push_str(&format!("{i},\n"));
    }

    fn write_error(&self, out: &mut String, error: Option<&str>) {
        out.push_str(&self.indent);
        out.push_str("\"error\": ");
        match error {
            Some(message) => json::write_str(out, message),
            None => out.push_str("null"),
        }
    }
}
