//! Data models for Fire Gear Tracker

pub mod enums;
pub mod equipment;
pub mod inspection;
pub mod station;
pub mod user;
pub mod vendor;

// Re-export commonly used types
pub use enums::{EquipmentCategory, EquipmentStatus, InspectionStatus, UserRole};
pub use equipment::{Equipment, HistoryAction, HistoryEntry};
pub use inspection::{CategoryInspection, Inspection, StationScope};
pub use station::Station;
pub use user::{Permission, User, UserClaims};
pub use vendor::Vendor;
