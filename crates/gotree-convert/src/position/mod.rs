//! Position engine: byte offsets to 1-based lines and 0-based columns.

pub mod line_map;

pub use line_map::LineMap;
