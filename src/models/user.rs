//! User model, role permissions and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::UserRole;
use crate::error::AppError;

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Read every resource
    View,
    ManageStations,
    ManageEquipment,
    /// Move equipment in or out of service
    ChangeEquipmentStatus,
    ManageInspections,
    CompleteInspections,
    ManageVendors,
    ManageUsers,
}

impl Permission {
    pub fn description(&self) -> &'static str {
        match self {
            Permission::View => "view records",
            Permission::ManageStations => "manage stations",
            Permission::ManageEquipment => "manage equipment",
            Permission::ChangeEquipmentStatus => "change equipment status",
            Permission::ManageInspections => "manage inspections",
            Permission::CompleteInspections => "complete inspections",
            Permission::ManageVendors => "manage vendors",
            Permission::ManageUsers => "manage users",
        }
    }
}

impl UserRole {
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;
        match self {
            UserRole::Admin => &[
                View,
                ManageStations,
                ManageEquipment,
                ChangeEquipmentStatus,
                ManageInspections,
                CompleteInspections,
                ManageVendors,
                ManageUsers,
            ],
            UserRole::Manager => &[
                View,
                ManageStations,
                ManageEquipment,
                ChangeEquipmentStatus,
                ManageInspections,
                CompleteInspections,
                ManageVendors,
            ],
            UserRole::User => &[View, ChangeEquipmentStatus, CompleteInspections],
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// User record (password hash is never serialized)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Home station, if any
    pub station_id: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub role: Option<UserRole>,
    pub station_id: Option<i32>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub station_id: Option<i32>,
    pub active: Option<bool>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// User email
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + (expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.role.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Insufficient rights to {}",
                permission.description()
            )))
        }
    }
}
