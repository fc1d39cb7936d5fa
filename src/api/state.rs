//! Application state shared across handlers

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::repositories::{PickupRepository, UserRepository};
use crate::infrastructure::classifier::WasteClassifier;
use crate::infrastructure::repositories::{InMemoryPickupRepository, InMemoryUserRepository};
use crate::services::{IdentityService, PickupService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub pickups: Arc<PickupService>,
    pub classifier: Arc<WasteClassifier>,
}

impl AppState {
    /// Wires services over the given repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        pickups: Arc<dyn PickupRepository>,
        config: &AppConfig,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(users.clone(), config.auth.clone())),
            pickups: Arc::new(PickupService::new(pickups, users)),
            classifier: Arc::new(WasteClassifier::new(config.classifier_url.clone())),
        }
    }

    /// State backed by fresh in-memory repositories
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPickupRepository::new()),
            config,
        )
    }
}
