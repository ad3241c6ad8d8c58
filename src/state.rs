//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShorteningService};
use crate::domain::repositories::UrlRepository;

/// Services and storage handle shared by all requests.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService<dyn UrlRepository>>,
    pub redirect_service: Arc<RedirectService<dyn UrlRepository>>,
    pub repository: Arc<dyn UrlRepository>,
}

impl AppState {
    /// Wires both services to one repository.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        Self {
            shortening_service: Arc::new(ShorteningService::new(repository.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(repository.clone())),
            repository,
        }
    }
}
