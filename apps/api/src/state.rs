use std::sync::Arc;

use crate::config::Config;
use crate::interview::InterviewEngine;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-client prep contexts: the explicit hand-off between screens.
    pub store: SessionStore,
    /// The interview progression engine, carrying the question bank and the
    /// pluggable answer evaluator (heuristic by default, remote via
    /// GRADER_URL).
    pub engine: Arc<InterviewEngine>,
    pub config: Config,
}
