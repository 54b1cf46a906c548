//! Vendors repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::vendor::{CreateVendor, UpdateVendor, Vendor},
};

#[derive(Clone)]
pub struct VendorsRepository {
    pool: Pool<Postgres>,
}

impl VendorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Vendor>> {
        let rows = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Vendor> {
        sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vendor {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateVendor) -> AppResult<Vendor> {
        sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (name, contact_name, email, phone, address, services, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.contact_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.services)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, format!("Vendor '{}' already exists", data.name.trim())))
    }

    pub async fn update(&self, id: i32, data: &UpdateVendor) -> AppResult<Vendor> {
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
        add_field!(data.contact_name, "contact_name");
        add_field!(data.email, "email");
        add_field!(data.phone, "phone");
        add_field!(data.address, "address");
        add_field!(data.services, "services");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE vendors SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Vendor>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        let name = data.name.as_deref().map(str::trim);
        bind_field!(name);
        bind_field!(data.contact_name);
        bind_field!(data.email);
        bind_field!(data.phone);
        bind_field!(data.address);
        bind_field!(data.services);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "A vendor with this name already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("Vendor {} not found", id)))
    }

    /// Delete a vendor; inspections referencing it keep their contact text
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vendor {} not found", id)));
        }
        Ok(())
    }
}
