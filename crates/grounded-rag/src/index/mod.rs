//! File-backed vector index over embedded passages

mod local;

pub use local::{cosine_similarity, IndexEntry, LocalVectorIndex};
