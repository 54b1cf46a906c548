//! Inspection models: individual inspections and category inspection rules

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{EquipmentCategory, InspectionStatus};

// ---------------------------------------------------------------------------
// Inspection (individual)
// ---------------------------------------------------------------------------

/// Inspection scheduled for one specific equipment item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: i32,
    pub equipment_id: i32,
    pub name: String,
    /// Reference into the static template table
    pub template_id: Option<String>,
    /// Custom recurrence, used only when no template is set
    pub interval_months: Option<i32>,
    pub due_date: NaiveDate,
    pub last_completed: Option<DateTime<Utc>>,
    pub status: InspectionStatus,
    pub notes: Option<String>,
    /// Whether the inspection is performed by an outside vendor
    pub external_vendor: bool,
    pub vendor_id: Option<i32>,
    pub vendor_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create inspection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspection {
    pub equipment_id: i32,
    /// Defaults to the template name when a template is given
    #[validate(length(min = 1, max = 200, message = "Inspection name cannot be empty"))]
    pub name: Option<String>,
    pub template_id: Option<String>,
    #[validate(range(min = 1, max = 240, message = "Interval must be between 1 and 240 months"))]
    pub interval_months: Option<i32>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    /// Defaults to the template's external flag
    pub external_vendor: Option<bool>,
    pub vendor_id: Option<i32>,
    pub vendor_contact: Option<String>,
}

/// Update inspection request. Setting `status` to `completed` runs the
/// completion workflow.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInspection {
    #[validate(length(min = 1, max = 200, message = "Inspection name cannot be empty"))]
    pub name: Option<String>,
    pub template_id: Option<String>,
    #[validate(range(min = 1, max = 240, message = "Interval must be between 1 and 240 months"))]
    pub interval_months: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InspectionStatus>,
    pub notes: Option<String>,
    pub external_vendor: Option<bool>,
    pub vendor_id: Option<i32>,
    pub vendor_contact: Option<String>,
}

/// Query parameters for listing inspections
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InspectionQuery {
    pub equipment_id: Option<i32>,
    pub status: Option<InspectionStatus>,
    /// Only inspections due on or before this date (YYYY-MM-DD)
    pub due_before: Option<NaiveDate>,
}

/// Complete inspection request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInspection {
    /// Free-form result notes, recorded in the equipment history
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// CategoryInspection
// ---------------------------------------------------------------------------

/// Which stations a category inspection applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StationScope {
    AllStations,
    #[serde(rename_all = "camelCase")]
    Station { station_id: i32 },
}

impl StationScope {
    pub fn from_station_id(station_id: Option<i32>) -> Self {
        match station_id {
            Some(station_id) => StationScope::Station { station_id },
            None => StationScope::AllStations,
        }
    }

    /// Column value: NULL means all stations
    pub fn station_id(&self) -> Option<i32> {
        match self {
            StationScope::AllStations => None,
            StationScope::Station { station_id } => Some(*station_id),
        }
    }

    pub fn includes(&self, station_id: i32) -> bool {
        match self {
            StationScope::AllStations => true,
            StationScope::Station { station_id: scoped } => *scoped == station_id,
        }
    }
}

/// Category inspection row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct CategoryInspectionRow {
    pub id: i32,
    pub category: EquipmentCategory,
    pub station_id: Option<i32>,
    pub name: String,
    pub template_id: Option<String>,
    pub interval_months: Option<i32>,
    pub due_date: NaiveDate,
    pub last_completed: Option<DateTime<Utc>>,
    pub status: InspectionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inspection rule applied to every equipment item of a category, either
/// department-wide or at a single station
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInspection {
    pub id: i32,
    pub category: EquipmentCategory,
    /// `{"kind": "all-stations"}` or `{"kind": "station", "stationId": 3}`
    #[schema(value_type = Object)]
    pub scope: StationScope,
    pub name: String,
    pub template_id: Option<String>,
    pub interval_months: Option<i32>,
    pub due_date: NaiveDate,
    pub last_completed: Option<DateTime<Utc>>,
    pub status: InspectionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryInspectionRow> for CategoryInspection {
    fn from(row: CategoryInspectionRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            scope: StationScope::from_station_id(row.station_id),
            name: row.name,
            template_id: row.template_id,
            interval_months: row.interval_months,
            due_date: row.due_date,
            last_completed: row.last_completed,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create category inspection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInspection {
    pub category: EquipmentCategory,
    /// Defaults to all stations
    #[schema(value_type = Option<Object>)]
    pub scope: Option<StationScope>,
    #[validate(length(min = 1, max = 200, message = "Inspection name cannot be empty"))]
    pub name: Option<String>,
    pub template_id: Option<String>,
    #[validate(range(min = 1, max = 240, message = "Interval must be between 1 and 240 months"))]
    pub interval_months: Option<i32>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// Update category inspection request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInspection {
    pub category: Option<EquipmentCategory>,
    #[schema(value_type = Option<Object>)]
    pub scope: Option<StationScope>,
    #[validate(length(min = 1, max = 200, message = "Inspection name cannot be empty"))]
    pub name: Option<String>,
    pub template_id: Option<String>,
    #[validate(range(min = 1, max = 240, message = "Interval must be between 1 and 240 months"))]
    pub interval_months: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InspectionStatus>,
    pub notes: Option<String>,
}

/// Result of completing a category inspection
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInspectionCompletion {
    pub inspection: CategoryInspection,
    /// Equipment items that received a history entry
    pub affected_equipment_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_scope_json() {
        let all: StationScope = serde_json::from_str(r#"{"kind":"all-stations"}"#).unwrap();
        assert_eq!(all, StationScope::AllStations);

        let one: StationScope =
            serde_json::from_str(r#"{"kind":"station","stationId":4}"#).unwrap();
        assert_eq!(one, StationScope::Station { station_id: 4 });
        assert_eq!(
            serde_json::to_value(one).unwrap(),
            serde_json::json!({"kind": "station", "stationId": 4})
        );
    }

    #[test]
    fn test_station_scope_column_mapping() {
        assert_eq!(StationScope::from_station_id(None), StationScope::AllStations);
        assert_eq!(StationScope::AllStations.station_id(), None);
        assert_eq!(StationScope::from_station_id(Some(3)).station_id(), Some(3));
    }

    #[test]
    fn test_station_scope_includes() {
        assert!(StationScope::AllStations.includes(9));
        assert!(StationScope::Station { station_id: 2 }.includes(2));
        assert!(!StationScope::Station { station_id: 2 }.includes(3));
    }
}
