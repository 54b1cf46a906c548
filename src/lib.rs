//! Fire Gear Tracker
//!
//! REST JSON API for fire department equipment tracking: stations,
//! equipment with an append-only history, individual and category-wide
//! inspections, and the derived inspection status of every item.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod inspection;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the repository and services over a connection pool
    pub fn new(config: AppConfig, pool: sqlx::PgPool) -> Self {
        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, config.auth.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
