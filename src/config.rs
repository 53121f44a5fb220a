use std::env;
use std::path::PathBuf;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the documentation site. Only URLs under this host are fetched.
    pub docs_base_url: String,
    /// Directory holding cached raw documentation pages.
    pub cache_dir: PathBuf,
    /// Set to false on read-only replicas: fetching otherwise writes cache
    /// files as a side effect of a read.
    pub cache_enabled: bool,
    /// Per-fetch network timeout. A slow upstream fails the individual fetch,
    /// not the whole batch.
    pub fetch_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
    /// When true, tool endpoints require the `x-api-key` header to match `api_key`.
    pub auth_enabled: bool,
    pub api_key: Option<String>,
    /// Comma-separated CORS origins, or "*" for permissive.
    pub allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            docs_base_url: env::var("DOCS_BASE_URL")
                .unwrap_or_else(|_| "https://kubernetes.io".to_string()),
            cache_dir: PathBuf::from(
                env::var("CACHE_DIR").unwrap_or_else(|_| "./cache/k8s_docs".to_string()),
            ),
            cache_enabled: env::var("CACHE_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .eq_ignore_ascii_case("true"),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT")
                .unwrap_or_else(|_| "15".to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            auth_enabled: env::var("ENABLE_AUTH")
                .unwrap_or_else(|_| "false".to_string())
                .eq_ignore_ascii_case("true"),
            api_key: env::var("API_KEY").ok(),
            allowed_origins: env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        })
    }
}
