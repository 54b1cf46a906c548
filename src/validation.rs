//! Business rules enforced on every write, regardless of client

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    inspection::templates::{self, InspectionTemplate},
    models::enums::{EquipmentCategory, EquipmentStatus},
};

/// Letters, digits and `-_/.`, starting with a letter or digit
static SERIAL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9\-_/.]{1,49}$").unwrap());

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Normalize and validate a serial number
pub fn serial_number(raw: &str) -> AppResult<String> {
    let serial = raw.trim();
    if serial.is_empty() {
        return Err(AppError::Validation("Serial number is required".to_string()));
    }
    if !SERIAL_NUMBER_RE.is_match(serial) {
        return Err(AppError::Validation(format!(
            "Invalid serial number '{}': use 2-50 letters, digits, '-', '_', '/' or '.'",
            serial
        )));
    }
    Ok(serial.to_string())
}

/// A status other than in-service must come with an explanation.
/// Returns the trimmed note when one is required.
pub fn status_note(status: EquipmentStatus, note: Option<&str>) -> AppResult<Option<String>> {
    let note = note.map(str::trim).filter(|n| !n.is_empty());
    match (status, note) {
        (EquipmentStatus::InService, note) => Ok(note.map(str::to_string)),
        (_, Some(note)) => Ok(Some(note.to_string())),
        (status, None) => Err(AppError::Validation(format!(
            "A note is required when setting equipment status to {}",
            status
        ))),
    }
}

/// At least 8 characters with an uppercase letter, a lowercase letter,
/// a digit and a symbol
pub fn password(password: &str) -> AppResult<()> {
    let mut missing = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        missing.push(format!("at least {} characters", MIN_PASSWORD_LENGTH));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        missing.push("an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        missing.push("a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        missing.push("a symbol".to_string());
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Password must contain {}",
            missing.join(", ")
        )))
    }
}

/// Resolve a template id, checking it exists and, when a category is given,
/// that it belongs to that category
pub fn template(
    template_id: &str,
    category: Option<EquipmentCategory>,
) -> AppResult<&'static InspectionTemplate> {
    let template = templates::find(template_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown inspection template '{}'", template_id)))?;
    match category {
        Some(category) if template.category != category => Err(AppError::Validation(format!(
            "Template '{}' applies to {} equipment, not {}",
            template_id, template.category, category
        ))),
        _ => Ok(template),
    }
}

/// Trimmed non-empty name or a validation error
pub fn required_name(name: Option<&str>, what: &str) -> AppResult<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("{} name is required", what)))
}
