//! Equipment service: CRUD plus the history written on every change

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{
            CreateEquipment, Equipment, EquipmentQuery, HistoryAction, HistoryEntry, UpdateEquipment,
        },
        user::{Permission, UserClaims},
    },
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn history(&self, id: i32) -> AppResult<Vec<HistoryEntry>> {
        Ok(self.repository.equipment.get_by_id(id).await?.history)
    }

    /// Create equipment; the initial history entry is written with the row
    pub async fn create(&self, mut data: CreateEquipment, actor: &UserClaims) -> AppResult<Equipment> {
        data.validate()?;
        data.name = validation::required_name(Some(&data.name), "Equipment")?;
        data.serial_number = validation::serial_number(&data.serial_number)?;
        let status = data.status.unwrap_or_default();
        let note = validation::status_note(status, data.status_note.as_deref())?;

        if !self.repository.stations.exists(data.station_id).await? {
            return Err(AppError::Validation(format!("Station {} does not exist", data.station_id)));
        }
        self.ensure_serial_available(&data.serial_number, None).await?;

        let mut details = format!("Equipment '{}' created with status {}", data.name, status);
        if let Some(note) = note {
            details.push_str(": ");
            details.push_str(&note);
        }
        let entry = HistoryEntry::new(HistoryAction::Created, details, Some(&actor.sub));

        let mut tx = self.repository.begin().await?;
        let equipment = self.repository.equipment.create(&mut tx, &data, &[entry]).await?;
        tx.commit().await?;

        tracing::info!(equipment_id = equipment.id, serial = %equipment.serial_number, "Created equipment");
        Ok(equipment)
    }

    /// Update equipment. Only fields that differ from the stored row count:
    /// a real status change needs `ChangeEquipmentStatus`, any other real
    /// change needs `ManageEquipment`.
    pub async fn update(&self, id: i32, mut data: UpdateEquipment, actor: &UserClaims) -> AppResult<Equipment> {
        data.validate()?;
        if let Some(ref name) = data.name {
            data.name = Some(validation::required_name(Some(name), "Equipment")?);
        }
        if let Some(ref serial) = data.serial_number {
            data.serial_number = Some(validation::serial_number(serial)?);
        }

        let mut tx = self.repository.begin().await?;
        let current = self.repository.equipment.lock(&mut tx, id).await?;
        data.drop_unchanged(&current);

        let changed = data.changed_fields();
        if !changed.is_empty() {
            actor.require(Permission::ManageEquipment)?;
        }
        if data.status.is_some() {
            actor.require(Permission::ChangeEquipmentStatus)?;
        }

        if let Some(ref serial) = data.serial_number {
            self.ensure_serial_available(serial, Some(id)).await?;
        }
        if let Some(station_id) = data.station_id {
            if !self.repository.stations.exists(station_id).await? {
                return Err(AppError::Validation(format!("Station {} does not exist", station_id)));
            }
        }

        let mut entries = Vec::new();
        if !changed.is_empty() {
            entries.push(HistoryEntry::new(
                HistoryAction::Updated,
                format!("Updated {}", changed.join(", ")),
                Some(&actor.sub),
            ));
        }
        if let Some(status) = data.status {
            let note = validation::status_note(status, data.status_note.as_deref())?;
            let note = note.unwrap_or_else(|| "returned to service".to_string());
            entries.push(HistoryEntry::status_change(current.status, status, &note, Some(&actor.sub)));
        }

        if entries.is_empty() {
            return Ok(current);
        }

        let equipment = self.repository.equipment.update(&mut tx, id, &data, &entries).await?;
        tx.commit().await?;

        if let Some(status) = data.status {
            tracing::info!(equipment_id = id, status = %status, "Equipment status changed");
        }
        Ok(equipment)
    }

    /// Delete equipment and its individual inspections
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.repository.equipment.delete(id).await?;
        tracing::info!(equipment_id = id, inspections_removed = removed, "Deleted equipment");
        Ok(())
    }

    async fn ensure_serial_available(&self, serial: &str, exclude_id: Option<i32>) -> AppResult<()> {
        if self.repository.equipment.serial_exists(serial, exclude_id).await? {
            return Err(AppError::Conflict(format!("Serial number '{}' is already in use", serial)));
        }
        Ok(())
    }
}
