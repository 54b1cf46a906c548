//! Category inspections repository

use chrono::Utc;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    inspection::CompletionPlan,
    models::inspection::{
        CategoryInspection, CategoryInspectionRow, CreateCategoryInspection, UpdateCategoryInspection,
    },
};

#[derive(Clone)]
pub struct CategoryInspectionsRepository {
    pool: Pool<Postgres>,
}

impl CategoryInspectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all category inspections, soonest due first
    pub async fn list(&self) -> AppResult<Vec<CategoryInspection>> {
        let rows = sqlx::query_as::<_, CategoryInspectionRow>(
            "SELECT * FROM category_inspections ORDER BY due_date, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CategoryInspection::from).collect())
    }

    /// Get category inspection by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<CategoryInspection> {
        sqlx::query_as::<_, CategoryInspectionRow>("SELECT * FROM category_inspections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(CategoryInspection::from)
            .ok_or_else(|| AppError::NotFound(format!("Category inspection {} not found", id)))
    }

    /// Get category inspection by ID and lock the row for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<CategoryInspection> {
        sqlx::query_as::<_, CategoryInspectionRow>(
            "SELECT * FROM category_inspections WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(CategoryInspection::from)
        .ok_or_else(|| AppError::NotFound(format!("Category inspection {} not found", id)))
    }

    /// Create a category inspection; `name` must already be resolved
    pub async fn create(&self, name: &str, data: &CreateCategoryInspection) -> AppResult<CategoryInspection> {
        let station_id = data.scope.and_then(|scope| scope.station_id());
        let row = sqlx::query_as::<_, CategoryInspectionRow>(
            r#"
            INSERT INTO category_inspections (
                category, station_id, name, template_id, interval_months, due_date, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.category)
        .bind(station_id)
        .bind(name)
        .bind(&data.template_id)
        .bind(data.interval_months)
        .bind(data.due_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Update category inspection fields
    pub async fn update(&self, id: i32, data: &UpdateCategoryInspection) -> AppResult<CategoryInspection> {
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

        // scope maps to a nullable column, so it is bound as Option<i32>
        let station_id = data.scope.map(|scope| scope.station_id());

        add_field!(data.category, "category");
        add_field!(station_id, "station_id");
        add_field!(data.name, "name");
        add_field!(data.template_id, "template_id");
        add_field!(data.interval_months, "interval_months");
        add_field!(data.due_date, "due_date");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE category_inspections SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, CategoryInspectionRow>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.category);
        bind_field!(station_id);
        bind_field!(data.name);
        bind_field!(data.template_id);
        bind_field!(data.interval_months);
        bind_field!(data.due_date);
        bind_field!(data.status);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(CategoryInspection::from)
            .ok_or_else(|| AppError::NotFound(format!("Category inspection {} not found", id)))
    }

    /// Persist the outcome of a completion
    pub async fn record_completion(
        &self,
        conn: &mut PgConnection,
        id: i32,
        plan: &CompletionPlan,
    ) -> AppResult<CategoryInspection> {
        sqlx::query_as::<_, CategoryInspectionRow>(
            r#"
            UPDATE category_inspections
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
        .map(CategoryInspection::from)
        .ok_or_else(|| AppError::NotFound(format!("Category inspection {} not found", id)))
    }

    /// Delete a category inspection
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM category_inspections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category inspection {} not found", id)));
        }
        Ok(())
    }
}
