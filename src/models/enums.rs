//! Shared domain enums
//!
//! All enums are stored as TEXT columns using their kebab-case slug and
//! serialized with the same slug in JSON.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements `as_str`, `FromStr`, `Display` and the sqlx TEXT conversions
/// for a fieldless enum from a `Variant => "slug"` table.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $slug:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($slug => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// EquipmentCategory
// ---------------------------------------------------------------------------

/// Equipment category, shared by equipment, category inspections and templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentCategory {
    Scba,
    Ppe,
    Hose,
    Ladders,
    Apparatus,
    RescueTools,
    ThermalImaging,
    GasDetection,
    Medical,
    Communications,
    Extinguishers,
    PowerTools,
    Other,
}

text_enum!(EquipmentCategory {
    Scba => "scba",
    Ppe => "ppe",
    Hose => "hose",
    Ladders => "ladders",
    Apparatus => "apparatus",
    RescueTools => "rescue-tools",
    ThermalImaging => "thermal-imaging",
    GasDetection => "gas-detection",
    Medical => "medical",
    Communications => "communications",
    Extinguishers => "extinguishers",
    PowerTools => "power-tools",
    Other => "other",
});

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Operational status of an equipment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    InService,
    OutOfService,
    OutForRepair,
    CannotLocate,
    InTraining,
    Other,
}

text_enum!(EquipmentStatus {
    InService => "in-service",
    OutOfService => "out-of-service",
    OutForRepair => "out-for-repair",
    CannotLocate => "cannot-locate",
    InTraining => "in-training",
    Other => "other",
});

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::InService
    }
}

// ---------------------------------------------------------------------------
// InspectionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an inspection schedule.
///
/// Recurring inspections return to `Scheduled` after each completion; only
/// one-off inspections ever stay `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionStatus {
    Scheduled,
    InProgress,
    Completed,
}

text_enum!(InspectionStatus {
    Scheduled => "scheduled",
    InProgress => "in-progress",
    Completed => "completed",
});

impl Default for InspectionStatus {
    fn default() -> Self {
        InspectionStatus::Scheduled
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role; see `models::user::Permission` for what each role may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

text_enum!(UserRole {
    Admin => "admin",
    Manager => "manager",
    User => "user",
});

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}
