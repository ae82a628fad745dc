use std::sync::Arc;

use crate::label::LabelGenerator;
use crate::reporting::ErrorReporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Synchronous; handlers call it from the blocking pool.
    pub generator: Arc<dyn LabelGenerator>,
    /// `LogReporter` unless `ERROR_REPORT_URL` is set.
    pub reporter: Arc<dyn ErrorReporter>,
}
