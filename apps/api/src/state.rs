use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::llm_client::ChatProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable chat adapter. Selected at startup via COHERE_API_FLAVOR.
    pub chat: Arc<dyn ChatProvider>,
    pub config: Config,
    /// Cancelled on graceful shutdown so in-flight upstream calls abort.
    pub shutdown: CancellationToken,
}
