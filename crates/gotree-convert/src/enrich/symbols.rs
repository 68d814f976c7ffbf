//! Type-checker facts about identifiers, keyed by source position.

use gotree_core::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::native::Pos;

/// What an identifier denotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    /// An imported package name.
    PackageName { imported_path: String },
    Func { package: Option<String> },
    TypeName { package: Option<String> },
    Var,
    Const,
    Label,
    Builtin,
    Nil,
}

/// One resolved object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(flatten)]
    pub kind: SymbolKind,
    /// Position of the declaring identifier; `None` for universe objects.
    #[serde(default)]
    pub decl_pos: Option<Pos>,
    /// Printed type, e.g. `func(s string) int` or `invalid type`.
    pub type_name: String,
    /// Printed result types when the object has a function signature.
    #[serde(default)]
    pub results: Option<Vec<String>>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            decl_pos: None,
            type_name: type_name.into(),
            results: None,
        }
    }

    pub fn declared_at(mut self, pos: Pos) -> Self {
        self.decl_pos = Some(pos);
        self
    }

    pub fn with_results(mut self, results: Vec<String>) -> Self {
        self.results = Some(results);
        self
    }
}

/// Read access to the symbol information of one file.
pub trait SymbolResolver: Send + Sync {
    /// The object declared by the identifier at `pos`.
    fn definition(&self, pos: Pos) -> Option<&Symbol>;
    /// The object referenced by the identifier at `pos`.
    fn usage(&self, pos: Pos) -> Option<&Symbol>;
}

/// Hash-map backed [`SymbolResolver`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    defs: FxHashMap<Pos, Symbol>,
    #[serde(default)]
    uses: FxHashMap<Pos, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, pos: Pos, symbol: Symbol) -> &mut Self {
        self.defs.insert(pos, symbol);
        self
    }

    pub fn record_use(&mut self, pos: Pos, symbol: Symbol) -> &mut Self {
        self.uses.insert(pos, symbol);
        self
    }

    pub fn len(&self) -> usize {
        self.defs.len() + self.uses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty() && self.uses.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn definition(&self, pos: Pos) -> Option<&Symbol> {
        self.defs.get(&pos)
    }

    fn usage(&self, pos: Pos) -> Option<&Symbol> {
        self.uses.get(&pos)
    }
}

/// Resolver for files converted without type information.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymbols;

impl SymbolResolver for NoSymbols {
    fn definition(&self, _pos: Pos) -> Option<&Symbol> {
        None
    }

    fn usage(&self, _pos: Pos) -> Option<&Symbol> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_separates_defs_and_uses() {
        let mut table = SymbolTable::new();
        table
            .define(4, Symbol::new(SymbolKind::Var, "int").declared_at(4))
            .record_use(20, Symbol::new(SymbolKind::Var, "int").declared_at(4));

        assert!(table.definition(4).is_some());
        assert!(table.usage(4).is_none());
        assert_eq!(table.usage(20).and_then(|s| s.decl_pos), Some(4));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_symbol_json_shape() {
        let symbol = Symbol::new(
            SymbolKind::PackageName {
                imported_path: "net/http".into(),
            },
            "invalid type",
        );
        let json = serde_json::to_value(&symbol).unwrap();
        assert_eq!(json["kind"], "package_name");
        assert_eq!(json["imported_path"], "net/http");

        let back: Symbol = serde_json::from_value(json).unwrap();
        assert_eq!(back, symbol);
    }
}
