//! Equipment model and its append-only history log

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{EquipmentCategory, EquipmentStatus};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Kind of event recorded in an equipment history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryAction {
    Created,
    Updated,
    StatusChanged,
    InspectionScheduled,
    InspectionCompleted,
    InspectionDeleted,
}

/// Immutable audit record. Entries are only ever appended to an equipment's
/// history, never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: HistoryAction,
    pub details: String,
    /// Email of the user who triggered the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<EquipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<EquipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_id: Option<i32>,
}

impl HistoryEntry {
    pub fn new(action: HistoryAction, details: impl Into<String>, user: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action,
            details: details.into(),
            user: user.map(str::to_string),
            previous_status: None,
            new_status: None,
            inspection_id: None,
        }
    }

    pub fn status_change(
        previous: EquipmentStatus,
        new: EquipmentStatus,
        note: &str,
        user: Option<&str>,
    ) -> Self {
        Self {
            previous_status: Some(previous),
            new_status: Some(new),
            ..Self::new(
                HistoryAction::StatusChanged,
                format!("Status changed from {} to {}: {}", previous, new, note),
                user,
            )
        }
    }

    pub fn inspection(
        action: HistoryAction,
        inspection_id: i32,
        details: impl Into<String>,
        user: Option<&str>,
    ) -> Self {
        Self {
            inspection_id: Some(inspection_id),
            ..Self::new(action, details, user)
        }
    }
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Equipment row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: EquipmentCategory,
    pub subcategory: Option<String>,
    pub station_id: i32,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
    pub history: Json<Vec<HistoryEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Serial number (unique across the department)
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: EquipmentCategory,
    pub subcategory: Option<String>,
    /// Station the item is assigned to
    pub station_id: i32,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
    /// Audit trail, oldest first
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            serial_number: row.serial_number,
            manufacturer: row.manufacturer,
            model: row.model,
            category: row.category,
            subcategory: row.subcategory,
            station_id: row.station_id,
            status: row.status,
            notes: row.notes,
            purchase_date: row.purchase_date,
            manufacture_date: row.manufacture_date,
            history: row.history.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200, message = "Equipment name is required"))]
    pub name: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: EquipmentCategory,
    pub subcategory: Option<String>,
    pub station_id: i32,
    /// Defaults to in-service
    pub status: Option<EquipmentStatus>,
    /// Required when the initial status is not in-service
    pub status_note: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200, message = "Equipment name cannot be empty"))]
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<EquipmentCategory>,
    pub subcategory: Option<String>,
    pub station_id: Option<i32>,
    pub status: Option<EquipmentStatus>,
    /// Required when moving the item out of service
    pub status_note: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
}

impl UpdateEquipment {
    /// Clear every field (status included) that already holds the stored
    /// value, so clients may send the whole record back on save.
    pub fn drop_unchanged(&mut self, current: &Equipment) {
        fn same<T: PartialEq>(field: &mut Option<T>, current: &T) {
            if field.as_ref() == Some(current) {
                *field = None;
            }
        }
        fn same_opt<T: PartialEq>(field: &mut Option<T>, current: &Option<T>) {
            if field.is_some() && *field == *current {
                *field = None;
            }
        }

        same(&mut self.name, &current.name);
        same(&mut self.serial_number, &current.serial_number);
        same_opt(&mut self.manufacturer, &current.manufacturer);
        same_opt(&mut self.model, &current.model);
        same(&mut self.category, &current.category);
        same_opt(&mut self.subcategory, &current.subcategory);
        same(&mut self.station_id, &current.station_id);
        same(&mut self.status, &current.status);
        same_opt(&mut self.notes, &current.notes);
        same_opt(&mut self.purchase_date, &current.purchase_date);
        same_opt(&mut self.manufacture_date, &current.manufacture_date);
    }

    /// Names of the plain (non-status) fields left in the request
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() { fields.push("name"); }
        if self.serial_number.is_some() { fields.push("serialNumber"); }
        if self.manufacturer.is_some() { fields.push("manufacturer"); }
        if self.model.is_some() { fields.push("model"); }
        if self.category.is_some() { fields.push("category"); }
        if self.subcategory.is_some() { fields.push("subcategory"); }
        if self.station_id.is_some() { fields.push("stationId"); }
        if self.notes.is_some() { fields.push("notes"); }
        if self.purchase_date.is_some() { fields.push("purchaseDate"); }
        if self.manufacture_date.is_some() { fields.push("manufactureDate"); }
        fields
    }
}

/// Query parameters for listing equipment
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    pub station_id: Option<i32>,
    pub category: Option<EquipmentCategory>,
    pub status: Option<EquipmentStatus>,
    /// Case-insensitive match on name, serial number, manufacturer or model
    pub search: Option<String>,
}
