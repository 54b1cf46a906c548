//! Stations repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::station::{CreateStation, Station, UpdateStation},
};

#[derive(Clone)]
pub struct StationsRepository {
    pool: Pool<Postgres>,
}

impl StationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all stations
    pub async fn list(&self) -> AppResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, Station>("SELECT * FROM stations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get station by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Station> {
        sqlx::query_as::<_, Station>("SELECT * FROM stations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Station {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a station
    pub async fn create(&self, data: &CreateStation) -> AppResult<Station> {
        sqlx::query_as::<_, Station>(
            r#"
            INSERT INTO stations (name, address, phone, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, format!("Station '{}' already exists", data.name.trim())))
    }

    /// Update a station
    pub async fn update(&self, id: i32, data: &UpdateStation) -> AppResult<Station> {
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.address, "address");
        add_field!(data.phone, "phone");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE stations SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Station>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        let name = data.name.as_deref().map(str::trim);
        bind_field!(name);
        bind_field!(data.address);
        bind_field!(data.phone);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "A station with this name already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("Station {} not found", id)))
    }

    /// Delete a station together with its equipment, their inspections and the
    /// category inspections scoped to it. Returns the number of equipment
    /// items removed.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM equipment WHERE station_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Station {} not found", id)));
        }

        tx.commit().await?;
        Ok(removed)
    }
}
