//! Vendor model (outside inspection and repair contractors)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Vendor record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Services offered (e.g. "SCBA flow testing", "hose testing")
    pub services: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create vendor request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendor {
    #[validate(length(min = 1, max = 200, message = "Vendor name is required"))]
    pub name: String,
    pub contact_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    pub notes: Option<String>,
}

/// Update vendor request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendor {
    #[validate(length(min = 1, max = 200, message = "Vendor name cannot be empty"))]
    pub name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub services: Option<Vec<String>>,
    pub notes: Option<String>,
}
