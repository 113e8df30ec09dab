use std::sync::Arc;

use crate::generation::ResumeWriter;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable resume writer. `None` when no API key is configured.
    pub writer: Option<Arc<dyn ResumeWriter>>,
    /// Page size and margins for PDF export.
    pub page_geometry: PageGeometry,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests() -> Self {
        Self {
            writer: None,
            page_geometry: crate::layout::default_page_geometry(),
        }
    }
}
