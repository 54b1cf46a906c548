//! Repository layer for database operations
//!
//! Methods taking `&mut PgConnection` are meant to run inside a transaction
//! opened with [`Repository::begin`]; the others use the pool directly.

pub mod category_inspections;
pub mod equipment;
pub mod inspections;
pub mod stations;
pub mod users;
pub mod vendors;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub stations: stations::StationsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub inspections: inspections::InspectionsRepository,
    pub category_inspections: category_inspections::CategoryInspectionsRepository,
    pub vendors: vendors::VendorsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            stations: stations::StationsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            inspections: inspections::InspectionsRepository::new(pool.clone()),
            category_inspections: category_inspections::CategoryInspectionsRepository::new(pool.clone()),
            vendors: vendors::VendorsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
