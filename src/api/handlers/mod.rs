pub mod health;
pub mod status;

use std::sync::Arc;

use crate::{repositories::TokenRepository, services::StatusService};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TokenRepository>,
    pub status_service: StatusService,
}

impl AppState {
    pub fn new(repository: Arc<dyn TokenRepository>) -> Self {
        Self {
            status_service: StatusService::new(repository.clone()),
            repository,
        }
    }
}
