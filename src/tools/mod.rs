//! Tool implementations exposed through the registry.

pub mod documentation;

pub use documentation::{ReadDocumentation, Recommend, SearchDocumentation};
