//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the domain port and stay testable without real network calls.

use std::sync::Arc;

use crate::domain::ports::{FixtureLendingBackend, LendingBackend};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub backend: Arc<dyn LendingBackend>,
}

impl HttpState {
    /// Bundle the lending-core gateway for handler injection.
    pub fn new(backend: Arc<dyn LendingBackend>) -> Self {
        Self { backend }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureLendingBackend))
    }
}
