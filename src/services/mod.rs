//! Business logic services

pub mod conflicts;
pub mod ordering;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub conflicts: conflicts::ConflictService,
    pub ordering: ordering::OrderingService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let shared = Arc::new(repository.clone());
        Self {
            conflicts: conflicts::ConflictService::new(shared.clone(), &config.conflicts),
            ordering: ordering::OrderingService::new(shared),
            repository,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
