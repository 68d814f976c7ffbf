//! gotree-convert: Go syntax tree to generic tree conversion
//!
//! This crate turns a parsed, type-checked Go file into a position-complete
//! generic tree and its canonical text document:
//! - Native: the input syntax tree model
//! - Position: byte offsets to lines and columns
//! - Reconcile: token and comment accounting for every byte of source
//! - Mapper: typed and native generic nodes
//! - CFG: per-function control-flow graphs keyed by node ids
//! - Enrich: identifier ids, types and packages from the symbol table
//! - Serialize: the deterministic per-file and batch documents
//! - Pipeline: parallel batch conversion and the batch wire format

pub mod cfg;
pub mod enrich;
pub mod mapper;
pub mod native;
pub mod pipeline;
pub mod position;
pub mod reconcile;
pub mod serialize;
pub mod tree;

// Re-exports for convenience
pub use cfg::{Cfg, CfgBlock};
pub use enrich::{IdentifierInfo, NoSymbols, Symbol, SymbolKind, SymbolResolver, SymbolTable};
pub use mapper::{map_file, ConvertedFile, MapOptions, Mapper};
pub use pipeline::{
    convert_batch, convert_unit, decode_batch, encode_batch, BatchEntry, FileOutcome,
    ParseFailure, SourceUnit,
};
pub use serialize::{BatchDocument, Serializer};
pub use tree::{FieldValue, Node, NodeId, NodeType, TextRange, Token, TokenKind, Tree};
