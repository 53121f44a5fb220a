//! Documentation retrieval pipeline: cached fetch, HTML normalization,
//! offset-based pagination.

pub mod fetch;
pub mod normalize;
pub mod paginate;

pub use fetch::DocFetcher;
pub use normalize::HtmlNormalizer;
pub use paginate::{paginate, Page};
