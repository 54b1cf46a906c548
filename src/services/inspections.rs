//! Inspections service: individual inspections, category inspection rules
//! and the completion workflow for both

use chrono::Utc;
use sqlx::PgConnection;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    inspection::{plan_completion, recurrence::recurrence_interval, CompletionOutcome},
    models::{
        enums::{EquipmentCategory, InspectionStatus},
        equipment::{HistoryAction, HistoryEntry},
        inspection::{
            CategoryInspection, CategoryInspectionCompletion, CreateCategoryInspection,
            CreateInspection, Inspection, InspectionQuery, UpdateCategoryInspection,
            UpdateInspection,
        },
        user::UserClaims,
    },
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct InspectionsService {
    repository: Repository,
}

impl InspectionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // -----------------------------------------------------------------------
    // Individual inspections
    // -----------------------------------------------------------------------

    pub async fn list(&self, query: &InspectionQuery) -> AppResult<Vec<Inspection>> {
        self.repository.inspections.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Inspection> {
        self.repository.inspections.get_by_id(id).await
    }

    /// Schedule an inspection for one equipment item
    pub async fn create(&self, data: CreateInspection, actor: &UserClaims) -> AppResult<Inspection> {
        data.validate()?;
        self.ensure_vendor_exists(data.vendor_id).await?;

        let mut tx = self.repository.begin().await?;
        let equipment = match self.repository.equipment.lock(&mut tx, data.equipment_id).await {
            Ok(equipment) => equipment,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Validation(format!(
                    "Equipment {} does not exist",
                    data.equipment_id
                )))
            }
            Err(e) => return Err(e),
        };

        let template = data
            .template_id
            .as_deref()
            .map(|id| validation::template(id, Some(equipment.category)))
            .transpose()?;
        let name = validation::required_name(
            data.name.as_deref().or(template.map(|t| t.name)),
            "Inspection",
        )?;
        let external_vendor = data
            .external_vendor
            .unwrap_or_else(|| template.map(|t| t.external).unwrap_or(false));

        let inspection = self
            .repository
            .inspections
            .create(&mut tx, &name, &data, external_vendor)
            .await?;

        let entry = HistoryEntry::inspection(
            HistoryAction::InspectionScheduled,
            inspection.id,
            format!("Inspection '{}' scheduled for {}", inspection.name, inspection.due_date),
            Some(&actor.sub),
        );
        self.repository
            .equipment
            .append_history(&mut tx, &[equipment.id], &entry)
            .await?;
        tx.commit().await?;

        Ok(inspection)
    }

    /// Update an inspection. Moving it to `completed` runs the completion
    /// workflow after the other fields are applied.
    pub async fn update(&self, id: i32, mut data: UpdateInspection, actor: &UserClaims) -> AppResult<Inspection> {
        data.validate()?;
        self.ensure_vendor_exists(data.vendor_id).await?;

        let mut tx = self.repository.begin().await?;
        let current = self.repository.inspections.lock(&mut tx, id).await?;

        if let Some(ref template_id) = data.template_id {
            let equipment = self.repository.equipment.get_by_id(current.equipment_id).await?;
            validation::template(template_id, Some(equipment.category))?;
        }
        if data.name.is_some() {
            data.name = Some(validation::required_name(data.name.as_deref(), "Inspection")?);
        }

        // Completion goes through the same path as POST /complete, including
        // the rejection of an already completed one-off
        let completing = data.status == Some(InspectionStatus::Completed);
        if completing {
            data.status = None;
        }

        let mut inspection = self.repository.inspections.update(&mut tx, id, &data).await?;
        if completing {
            inspection = self.complete_locked(&mut tx, inspection, None, actor).await?;
        }
        tx.commit().await?;

        Ok(inspection)
    }

    /// Mark an individual inspection complete
    pub async fn complete(&self, id: i32, notes: Option<&str>, actor: &UserClaims) -> AppResult<Inspection> {
        let mut tx = self.repository.begin().await?;
        let current = self.repository.inspections.lock(&mut tx, id).await?;
        let inspection = self.complete_locked(&mut tx, current, notes, actor).await?;
        tx.commit().await?;
        Ok(inspection)
    }

    /// Delete an inspection, noting it in the equipment history
    pub async fn delete(&self, id: i32, actor: &UserClaims) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        let deleted = self.repository.inspections.delete(&mut tx, id).await?;

        let entry = HistoryEntry::inspection(
            HistoryAction::InspectionDeleted,
            deleted.id,
            format!("Inspection '{}' deleted", deleted.name),
            Some(&actor.sub),
        );
        self.repository
            .equipment
            .append_history(&mut tx, &[deleted.equipment_id], &entry)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn complete_locked(
        &self,
        conn: &mut PgConnection,
        inspection: Inspection,
        notes: Option<&str>,
        actor: &UserClaims,
    ) -> AppResult<Inspection> {
        let interval = recurrence_interval(inspection.template_id.as_deref(), inspection.interval_months);
        let plan = plan_completion(inspection.due_date, inspection.status, interval, Utc::now())?;

        let updated = self
            .repository
            .inspections
            .record_completion(&mut *conn, inspection.id, &plan)
            .await?;

        let entry = HistoryEntry::inspection(
            HistoryAction::InspectionCompleted,
            inspection.id,
            plan.describe(&inspection.name, notes),
            Some(&actor.sub),
        );
        self.repository
            .equipment
            .append_history(&mut *conn, &[inspection.equipment_id], &entry)
            .await?;

        match plan.outcome {
            CompletionOutcome::Rescheduled { next_due_date } => tracing::info!(
                inspection_id = inspection.id,
                next_due_date = %next_due_date,
                "Inspection completed and rescheduled"
            ),
            CompletionOutcome::OneOff => {
                tracing::info!(inspection_id = inspection.id, "One-off inspection completed")
            }
        }
        Ok(updated)
    }

    async fn ensure_vendor_exists(&self, vendor_id: Option<i32>) -> AppResult<()> {
        if let Some(vendor_id) = vendor_id {
            if !self.repository.vendors.exists(vendor_id).await? {
                return Err(AppError::Validation(format!("Vendor {} does not exist", vendor_id)));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Category inspections
    // -----------------------------------------------------------------------

    pub async fn list_category(&self) -> AppResult<Vec<CategoryInspection>> {
        self.repository.category_inspections.list().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<CategoryInspection> {
        self.repository.category_inspections.get_by_id(id).await
    }

    pub async fn create_category(&self, data: CreateCategoryInspection) -> AppResult<CategoryInspection> {
        data.validate()?;
        let name = self
            .category_rule_name(data.category, data.template_id.as_deref(), data.name.as_deref())?;
        self.ensure_station_exists(data.scope.and_then(|s| s.station_id())).await?;

        let rule = self.repository.category_inspections.create(&name, &data).await?;
        tracing::info!(
            category_inspection_id = rule.id,
            category = %rule.category,
            "Created category inspection '{}'",
            rule.name
        );
        Ok(rule)
    }

    /// Update a category inspection rule. Completion goes through
    /// [`Self::complete_category`] so the fan-out is never skipped.
    pub async fn update_category(
        &self,
        id: i32,
        mut data: UpdateCategoryInspection,
    ) -> AppResult<CategoryInspection> {
        data.validate()?;
        if data.status == Some(InspectionStatus::Completed) {
            return Err(AppError::Validation(
                "Category inspections are completed through the complete endpoint".to_string(),
            ));
        }

        if data.template_id.is_some() || data.category.is_some() {
            let current = self.repository.category_inspections.get_by_id(id).await?;
            let category = data.category.unwrap_or(current.category);
            let template_id = data.template_id.as_deref().or(current.template_id.as_deref());
            if let Some(template_id) = template_id {
                validation::template(template_id, Some(category))?;
            }
        }
        if data.name.is_some() {
            data.name = Some(validation::required_name(data.name.as_deref(), "Inspection")?);
        }
        self.ensure_station_exists(data.scope.and_then(|s| s.station_id())).await?;

        self.repository.category_inspections.update(id, &data).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.category_inspections.delete(id).await
    }

    /// Complete a category inspection and record it on every equipment item
    /// the rule covers right now. The rule and the covered items are locked
    /// for the duration of the transaction.
    pub async fn complete_category(
        &self,
        id: i32,
        notes: Option<&str>,
        actor: &UserClaims,
    ) -> AppResult<CategoryInspectionCompletion> {
        let mut tx = self.repository.begin().await?;
        let rule = self.repository.category_inspections.lock(&mut tx, id).await?;

        let interval = recurrence_interval(rule.template_id.as_deref(), rule.interval_months);
        let plan = plan_completion(rule.due_date, rule.status, interval, Utc::now())?;

        let affected_equipment_ids: Vec<i32> = self
            .repository
            .equipment
            .lock_category(&mut tx, rule.category)
            .await?
            .iter()
            .filter(|key| rule.applies_to(key))
            .map(|key| key.id)
            .collect();

        let inspection = self
            .repository
            .category_inspections
            .record_completion(&mut tx, id, &plan)
            .await?;

        let entry = HistoryEntry::inspection(
            HistoryAction::InspectionCompleted,
            rule.id,
            plan.describe(&rule.name, notes),
            Some(&actor.sub),
        );
        let updated = self
            .repository
            .equipment
            .append_history(&mut tx, &affected_equipment_ids, &entry)
            .await?;
        tx.commit().await?;

        tracing::info!(
            category_inspection_id = id,
            category = %rule.category,
            equipment_updated = updated,
            "Category inspection completed"
        );

        Ok(CategoryInspectionCompletion {
            inspection,
            affected_equipment_ids,
        })
    }

    fn category_rule_name(
        &self,
        category: EquipmentCategory,
        template_id: Option<&str>,
        name: Option<&str>,
    ) -> AppResult<String> {
        let template = template_id
            .map(|id| validation::template(id, Some(category)))
            .transpose()?;
        validation::required_name(name.or(template.map(|t| t.name)), "Inspection")
    }

    async fn ensure_station_exists(&self, station_id: Option<i32>) -> AppResult<()> {
        if let Some(station_id) = station_id {
            if !self.repository.stations.exists(station_id).await? {
                return Err(AppError::Validation(format!("Station {} does not exist", station_id)));
            }
        }
        Ok(())
    }
}
