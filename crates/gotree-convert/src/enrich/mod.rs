//! Identifier enrichment: symbol id, type name and defining package.

pub mod decl_index;
pub mod symbols;

pub use decl_index::DeclarationIndex;
pub use symbols::{NoSymbols, Symbol, SymbolKind, SymbolResolver, SymbolTable};

use gotree_core::constants::UNKNOWN;

use crate::native::{CallExpr, Expr, File, Ident};

const INVALID_TYPE: &str = "invalid type";

/// What the generic tree records about one identifier occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierInfo {
    /// One-based declaration offset; 0 when unresolved.
    pub id: i64,
    pub type_name: String,
    pub package: String,
}

impl IdentifierInfo {
    pub fn unknown() -> Self {
        Self {
            id: 0,
            type_name: UNKNOWN.to_string(),
            package: UNKNOWN.to_string(),
        }
    }
}

/// Per-file view over a shared [`SymbolResolver`].
pub struct Enricher<'a> {
    symbols: &'a dyn SymbolResolver,
    source: &'a str,
    index: DeclarationIndex,
}

impl<'a> Enricher<'a> {
    pub fn new(file: &File, source: &'a str, symbols: &'a dyn SymbolResolver) -> Self {
        Self {
            symbols,
            source,
            index: DeclarationIndex::build(file),
        }
    }

    /// Definition-site binding first, then use-site.
    fn lookup(&self, ident: &Ident) -> Option<&'a Symbol> {
        self.symbols
            .definition(ident.name_pos)
            .or_else(|| self.symbols.usage(ident.name_pos))
    }

    pub fn identifier_info(&self, ident: &Ident) -> IdentifierInfo {
        let Some(symbol) = self.lookup(ident) else {
            return IdentifierInfo::unknown();
        };
        IdentifierInfo {
            id: symbol.decl_pos.map_or(0, |pos| i64::from(pos) + 1),
            type_name: self.type_name(ident, symbol),
            package: package_of(symbol),
        }
    }

    fn type_name(&self, ident: &Ident, symbol: &Symbol) -> String {
        if !symbol.type_name.ends_with(INVALID_TYPE) {
            return symbol.type_name.clone();
        }
        ident
            .decl
            .and_then(|decl| self.index.type_text(decl, self.source))
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// Result types of the function a call resolves to; empty when the
    /// callee is not a plain or qualified name, or has no known signature.
    pub fn call_result_types(&self, call: &CallExpr) -> Vec<String> {
        let callee = match call.fun.as_ref() {
            Expr::Ident(ident) => ident,
            Expr::Selector(selector) => &selector.sel,
            _ => return Vec::new(),
        };
        self.symbols
            .usage(callee.name_pos)
            .and_then(|symbol| symbol.results.clone())
            .unwrap_or_default()
    }
}

fn package_of(symbol: &Symbol) -> String {
    match &symbol.kind {
        SymbolKind::PackageName { imported_path } => imported_path.clone(),
        SymbolKind::Func { package } | SymbolKind::TypeName { package } => {
            package.clone().unwrap_or_else(|| UNKNOWN.to_string())
        }
        _ => UNKNOWN.to_string(),
    }
}
