//! Multi-file document keyed by file name.

use std::collections::BTreeMap;

use super::json::write_str;

/// Per-file documents of one batch, ordered by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDocument {
    files: BTreeMap<String, String>,
}

impl BatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, document: String) {
        self.files.insert(name.into(), document);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// `{` then one `"name": document` member per file, then `}`.
    pub fn render(&self) -> String {
        let body: usize = self.files.iter().map(|(k, v)| k.len() + v.len() + 8).sum();
        let mut out = String::with_capacity(body + 4);
        out.push_str("{\n");
        for (n, (name, document)) in self.files.iter().enumerate() {
            if n > 0 {
                out.push_str(",\n");
            }
            out.push_str("  ");
            write_str(&mut out, name);
            out.push_str(": ");
            out.push_str(document);
        }
        out.push_str("\n}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        assert_eq!(BatchDocument::new().render(), "{\n\n}");
    }

    #[test]
    fn test_files_sorted_by_name() {
        let mut batch = BatchDocument::new();
        batch.insert("b.go", "2".to_string());
        batch.insert("a.go", "1".to_string());
        assert_eq!(batch.render(), "{\n  \"a.go\": 1,\n  \"b.go\": 2\n}");
        assert_eq!(batch.names().collect::<Vec<_>>(), vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_names_are_escaped() {
        let mut batch = BatchDocument::new();
        batch.insert("dir\\\"x\".go", "null".to_string());
        assert_eq!(batch.render(), "{\n  \"dir\\\\\\\"x\\\".go\": null\n}");
    }
}
