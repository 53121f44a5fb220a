//! kubedoc - Kubernetes documentation tool-call microservice
//!
//! This library exposes the core components of the service, enabling
//! integration tests and potential embedding in other applications.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod state;
pub mod tools;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{
    health_handler, list_tools_handler, raw_tool_handler, require_api_key, root_handler,
    tool_handler,
};
pub use registry::{Tool, ToolRegistry};
pub use state::AppState;
