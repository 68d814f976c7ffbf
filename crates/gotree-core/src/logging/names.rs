//! Span and target names used across the converter.

pub const CONVERT_FILE: &str = "gotree.convert_file";
pub const CONVERT_BATCH: &str = "gotree.convert_batch";
pub const MAP_FILE: &str = "gotree.map_file";
pub const EXTRACT_CFG: &str = "gotree.extract_cfg";
pub const SERIALIZE: &str = "gotree.serialize";
pub const DECODE_BATCH: &str = "gotree.decode_batch";
