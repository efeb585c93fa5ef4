use std::sync::Arc;

use crate::config::Config;
use crate::nlp::StopwordFilter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; never re-fetched per request.
    pub stopwords: Arc<StopwordFilter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let stopwords = Arc::new(StopwordFilter::new(&config.stopword_language));
        Self { config, stopwords }
    }
}
