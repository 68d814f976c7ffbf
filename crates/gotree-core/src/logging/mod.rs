//! Observability for gotree.
//! `tracing` crate with `EnvFilter`, filter read from `GOTREE_LOG`.

pub mod names;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
