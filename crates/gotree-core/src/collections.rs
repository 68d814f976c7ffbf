//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;

/// SmallVec sized for successor edges of a basic block (almost always <= 2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
