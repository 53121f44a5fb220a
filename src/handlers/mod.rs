pub mod auth;
pub mod health;
pub mod tool;

pub use auth::require_api_key;
pub use health::{health_handler, root_handler};
pub use tool::{list_tools_handler, raw_tool_handler, tool_handler};
