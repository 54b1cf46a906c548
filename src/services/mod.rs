//! Business logic services

pub mod equipment;
pub mod inspections;
pub mod stations;
pub mod status;
pub mod users;
pub mod vendors;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub stations: stations::StationsService,
    pub equipment: equipment::EquipmentService,
    pub inspections: inspections::InspectionsService,
    pub status: status::StatusService,
    pub vendors: vendors::VendorsService,
    pub users: users::UsersService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            stations: stations::StationsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            inspections: inspections::InspectionsService::new(repository.clone()),
            status: status::StatusService::new(repository.clone()),
            vendors: vendors::VendorsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            repository,
        }
    }

    /// Check database connectivity
    pub async fn database_ready(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
