use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shared-secret gate for the tool endpoints.
///
/// Only active when auth is enabled in configuration; then `x-api-key` must
/// match the configured key. A missing configured key rejects every request
/// rather than silently allowing all.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if state.config.auth_enabled {
        let provided = request
            .headers()
            .get("x-api-key")
            .and_then(|value| value.to_str().ok());

        match (state.config.api_key.as_deref(), provided) {
            (Some(expected), Some(key)) if key == expected => {}
            _ => return Err(AppError::Unauthorized),
        }
    }

    Ok(next.run(request).await)
}
