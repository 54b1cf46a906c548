//! Equipment repository
//!
//! History is only ever appended (`history || $n`); no statement here rewrites
//! or removes existing entries.

use chrono::Utc;
use sqlx::{types::Json, FromRow, PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    inspection::EquipmentKey,
    models::{
        enums::EquipmentCategory,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentRow, HistoryEntry, UpdateEquipment},
    },
};

/// `id, category, station_id` projection used when locking a category
#[derive(FromRow)]
struct EquipmentKeyRow {
    id: i32,
    category: EquipmentCategory,
    station_id: i32,
}

impl From<EquipmentKeyRow> for EquipmentKey {
    fn from(row: EquipmentKeyRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            station_id: row.station_id,
        }
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.station_id.is_some() {
            conditions.push(format!("station_id = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));
        if search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${0} OR serial_number ILIKE ${0} OR manufacturer ILIKE ${0} OR model ILIKE ${0})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("SELECT * FROM equipment {} ORDER BY name, id", where_clause);
        let mut builder = sqlx::query_as::<_, EquipmentRow>(&select_q);
        if let Some(station_id) = query.station_id { builder = builder.bind(station_id); }
        if let Some(category) = query.category { builder = builder.bind(category); }
        if let Some(status) = query.status { builder = builder.bind(status); }
        if let Some(ref pattern) = search { builder = builder.bind(pattern); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, EquipmentRow>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Equipment::from)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment by ID and lock the row for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, EquipmentRow>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(Equipment::from)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Lock every item of a category; scope filtering is left to the caller
    pub async fn lock_category(
        &self,
        conn: &mut PgConnection,
        category: EquipmentCategory,
    ) -> AppResult<Vec<EquipmentKey>> {
        let rows = sqlx::query_as::<_, EquipmentKeyRow>(
            "SELECT id, category, station_id FROM equipment WHERE category = $1 ORDER BY id FOR UPDATE",
        )
        .bind(category)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(EquipmentKey::from).collect())
    }

    /// Whether a serial number is already used, optionally ignoring one item
    pub async fn serial_exists(&self, serial_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE serial_number = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(serial_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create equipment with its initial history
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateEquipment,
        history: &[HistoryEntry],
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, EquipmentRow>(
            r#"
            INSERT INTO equipment (
                name, serial_number, manufacturer, model, category, subcategory,
                station_id, status, notes, purchase_date, manufacture_date, history
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.serial_number)
        .bind(&data.manufacturer)
        .bind(&data.model)
        .bind(data.category)
        .bind(&data.subcategory)
        .bind(data.station_id)
        .bind(data.status.unwrap_or_default())
        .bind(&data.notes)
        .bind(data.purchase_date)
        .bind(data.manufacture_date)
        .bind(Json(history))
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(e, format!("Serial number '{}' is already in use", data.serial_number))
        })?;
        Ok(row.into())
    }

    /// Update equipment fields and append history entries in one statement
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateEquipment,
        history: &[HistoryEntry],
    ) -> AppResult<Equipment> {
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
        add_field!(data.serial_number, "serial_number");
        add_field!(data.manufacturer, "manufacturer");
        add_field!(data.model, "model");
        add_field!(data.category, "category");
        add_field!(data.subcategory, "subcategory");
        add_field!(data.station_id, "station_id");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.manufacture_date, "manufacture_date");
        sets.push(format!("history = history || ${}", idx));
        idx += 1;

        let query = format!("UPDATE equipment SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, EquipmentRow>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.serial_number);
        bind_field!(data.manufacturer);
        bind_field!(data.model);
        bind_field!(data.category);
        bind_field!(data.subcategory);
        bind_field!(data.station_id);
        bind_field!(data.status);
        bind_field!(data.notes);
        bind_field!(data.purchase_date);
        bind_field!(data.manufacture_date);

        builder
            .bind(Json(history))
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Serial number is already in use"))?
            .map(Equipment::from)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Append one history entry to each of the given equipment items
    pub async fn append_history(
        &self,
        conn: &mut PgConnection,
        ids: &[i32],
        entry: &HistoryEntry,
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE equipment SET history = history || $1 WHERE id = ANY($2)")
            .bind(Json([entry]))
            .bind(ids)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete equipment; its individual inspections go with it. Returns the
    /// number of inspections removed.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM inspections WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }

        tx.commit().await?;
        Ok(removed)
    }
}
