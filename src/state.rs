//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::clock::Clock;
use crate::domain::repositories::UrlRepository;

/// Handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Builds the state around a store and a clock shared with the service.
    pub fn new(url_repository: Arc<dyn UrlRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(url_repository, clock.clone())),
            clock,
        }
    }
}
