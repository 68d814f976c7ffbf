//! Native syntax tree: the strongly-typed input the converter consumes.

pub mod ast;
pub mod fields;
pub mod kind;
pub mod span;
pub mod token;

pub use ast::*;
pub use fields::{Child, ListRole, NativeRef};
pub use kind::{NativeKey, NodeKind, Shape};
pub use span::Spanned;
pub use token::Tok;
