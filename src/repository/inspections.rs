//! Individual inspections repository

use chrono::Utc;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    inspection::CompletionPlan,
    models::inspection::{CreateInspection, Inspection, InspectionQuery, UpdateInspection},
};

#[derive(Clone)]
pub struct InspectionsRepository {
    pool: Pool<Postgres>,
}

impl InspectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List inspections with optional filters, soonest due first
    pub async fn list(&self, query: &InspectionQuery) -> AppResult<Vec<Inspection>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.due_before.is_some() {
            conditions.push(format!("due_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("SELECT * FROM inspections {} ORDER BY due_date, id", where_clause);
        let mut builder = sqlx::query_as::<_, Inspection>(&select_q);
        if let Some(equipment_id) = query.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(status) = query.status { builder = builder.bind(status); }
        if let Some(due_before) = query.due_before { builder = builder.bind(due_before); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get inspection by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Inspection> {
        sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
    }

    /// Get inspection by ID and lock the row for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Inspection> {
        sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
    }

    /// Create an inspection; `name` and `external_vendor` must already be resolved
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        name: &str,
        data: &CreateInspection,
        external_vendor: bool,
    ) -> AppResult<Inspection> {
        let row = sqlx::query_as::<_, Inspection>(
            r#"
            INSERT INTO inspections (
                equipment_id, name, template_id, interval_months, due_date,
                notes, external_vendor, vendor_id, vendor_contact
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(name)
        .bind(&data.template_id)
        .bind(data.interval_months)
        .bind(data.due_date)
        .bind(&data.notes)
        .bind(external_vendor)
        .bind(data.vendor_id)
        .bind(&data.vendor_contact)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Update inspection fields
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateInspection,
    ) -> AppResult<Inspection> {
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
        add_field!(data.template_id, "template_id");
        add_field!(data.interval_months, "interval_months");
        add_field!(data.due_date, "due_date");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");
        add_field!(data.external_vendor, "external_vendor");
        add_field!(data.vendor_id, "vendor_id");
        add_field!(data.vendor_contact, "vendor_contact");

        let query = format!("UPDATE inspections SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Inspection>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.template_id);
        bind_field!(data.interval_months);
        bind_field!(data.due_date);
        bind_field!(data.status);
        bind_field!(data.notes);
        bind_field!(data.external_vendor);
        bind_field!(data.vendor_id);
        bind_field!(data.vendor_contact);

        builder
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
    }

    /// Persist the outcome of a completion
    pub async fn record_completion(
        &self,
        conn: &mut PgConnection,
        id: i32,
        plan: &CompletionPlan,
    ) -> AppResult<Inspection> {
        sqlx::query_as::<_, Inspection>(
            r#"
            UPDATE inspections
            SET due_date = $1, status = $2, last_completed = $3, updated_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(plan.due_date)
        .bind(plan.status)
        .bind(plan.last_completed)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
    }

    /// Delete an inspection, returning the removed row
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<Inspection> {
        sqlx::query_as::<_, Inspection>("DELETE FROM inspections WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", id)))
    }
}
