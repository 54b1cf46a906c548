//! Inspection status service: runs the resolver over stored data

use chrono::{Local, NaiveDate};

use crate::{
    api::status::{DashboardResponse, EquipmentStatusEntry},
    error::AppResult,
    inspection::{resolve, ResolvedStatus, StatusSummary},
    models::{equipment::EquipmentQuery, inspection::InspectionQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatusService {
    repository: Repository,
}

impl StatusService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Server-local calendar date
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Current status of one equipment item, `None` when nothing is scheduled
    pub async fn equipment_status(&self, equipment_id: i32) -> AppResult<Option<ResolvedStatus>> {
        let equipment = self.repository.equipment.get_by_id(equipment_id).await?;
        let inspections = self
            .repository
            .inspections
            .list(&InspectionQuery {
                equipment_id: Some(equipment_id),
                ..Default::default()
            })
            .await?;
        let category_inspections = self.repository.category_inspections.list().await?;

        Ok(resolve(&equipment, &inspections, &category_inspections, Self::today()))
    }

    /// Resolve every equipment item (optionally at one station) and count
    /// them per severity bucket. Entries come back most urgent first.
    pub async fn dashboard(&self, station_id: Option<i32>) -> AppResult<DashboardResponse> {
        let today = Self::today();
        let equipment = self
            .repository
            .equipment
            .list(&EquipmentQuery {
                station_id,
                ..Default::default()
            })
            .await?;
        let inspections = self.repository.inspections.list(&InspectionQuery::default()).await?;
        let category_inspections = self.repository.category_inspections.list().await?;

        let mut summary = StatusSummary::default();
        let mut items: Vec<EquipmentStatusEntry> = equipment
            .iter()
            .map(|item| {
                let status = resolve(item, &inspections, &category_inspections, today);
                summary.record(status.as_ref().map(|s| s.status));
                EquipmentStatusEntry {
                    equipment_id: item.id,
                    name: item.name.clone(),
                    serial_number: item.serial_number.clone(),
                    category: item.category,
                    station_id: item.station_id,
                    status,
                }
            })
            .collect();

        items.sort_by_key(|entry| {
            (
                entry.status.is_none(),
                entry.status.as_ref().map(|s| s.days_until_due),
                entry.equipment_id,
            )
        });

        Ok(DashboardResponse {
            today,
            station_id,
            summary,
            items,
        })
    }
}
