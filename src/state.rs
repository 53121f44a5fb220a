use std::sync::Arc;

use crate::config::Config;
use crate::docs::{DocFetcher, HtmlNormalizer};
use crate::error::Result;
use crate::registry::ToolRegistry;
use crate::tools::{ReadDocumentation, Recommend, SearchDocumentation};

/// Application state shared across all request handlers.
///
/// The tool registry is built once here, during startup wiring, and handed to
/// the HTTP layer by reference. Tools share the fetcher and normalizer
/// through `Arc`.
pub struct AppState {
    pub registry: ToolRegistry,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(DocFetcher::new(&config)?);
        let normalizer = Arc::new(HtmlNormalizer::new());

        let mut registry = ToolRegistry::new();
        registry.register(
            "k8s_read_documentation",
            Arc::new(ReadDocumentation::new(
                Arc::clone(&fetcher),
                Arc::clone(&normalizer),
                &config,
            )),
        );
        registry.register("k8s_search_documentation", Arc::new(SearchDocumentation));
        registry.register("k8s_recommend", Arc::new(Recommend::new(&config)));

        tracing::info!(tools = ?registry.names(), "Tools registered");

        Ok(Self {
            registry,
            config: Arc::new(config),
        })
    }
}
