//! Inspection status resolution
//!
//! An equipment item's inspection status is never stored. It is derived from
//! the nearest-due inspection among the item's own inspections and every
//! category rule that covers it.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    enums::{EquipmentCategory, InspectionStatus},
    equipment::Equipment,
    inspection::{CategoryInspection, Inspection},
};

/// Severity bucket derived from days until due
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    PastDue,
    Critical,
    Warning,
    Attention,
    Normal,
    Upcoming,
}

impl Severity {
    /// First match wins: <0 past-due, 0..=3 critical, 4..=7 warning,
    /// 8..=14 attention, 15..=30 normal, >30 upcoming
    pub fn from_days_until_due(days: i64) -> Self {
        match days {
            d if d < 0 => Severity::PastDue,
            0..=3 => Severity::Critical,
            4..=7 => Severity::Warning,
            8..=14 => Severity::Attention,
            15..=30 => Severity::Normal,
            _ => Severity::Upcoming,
        }
    }
}

/// The fields of an equipment item the resolver matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentKey {
    pub id: i32,
    pub category: EquipmentCategory,
    pub station_id: i32,
}

impl From<&Equipment> for EquipmentKey {
    fn from(equipment: &Equipment) -> Self {
        Self {
            id: equipment.id,
            category: equipment.category,
            station_id: equipment.station_id,
        }
    }
}

impl CategoryInspection {
    /// Whether this rule covers the given equipment item
    pub fn applies_to(&self, equipment: &EquipmentKey) -> bool {
        self.category == equipment.category && self.scope.includes(equipment.station_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionKind {
    Individual,
    Category,
}

/// Either kind of inspection schedule
#[derive(Debug, Clone, Copy)]
pub enum ScheduledInspection<'a> {
    Individual(&'a Inspection),
    Category(&'a CategoryInspection),
}

impl<'a> ScheduledInspection<'a> {
    pub fn kind(&self) -> InspectionKind {
        match self {
            ScheduledInspection::Individual(_) => InspectionKind::Individual,
            ScheduledInspection::Category(_) => InspectionKind::Category,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ScheduledInspection::Individual(i) => i.id,
            ScheduledInspection::Category(c) => c.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            ScheduledInspection::Individual(i) => &i.name,
            ScheduledInspection::Category(c) => &c.name,
        }
    }

    pub fn due_date(&self) -> NaiveDate {
        match self {
            ScheduledInspection::Individual(i) => i.due_date,
            ScheduledInspection::Category(c) => c.due_date,
        }
    }

    fn status(&self) -> InspectionStatus {
        match self {
            ScheduledInspection::Individual(i) => i.status,
            ScheduledInspection::Category(c) => c.status,
        }
    }

    /// Completed one-off inspections no longer count toward status
    pub fn is_pending(&self) -> bool {
        self.status() != InspectionStatus::Completed
    }
}

/// Every pending inspection applicable to the equipment item
pub fn applicable<'a>(
    equipment: EquipmentKey,
    inspections: &'a [Inspection],
    category_inspections: &'a [CategoryInspection],
) -> impl Iterator<Item = ScheduledInspection<'a>> {
    let individual = inspections
        .iter()
        .filter(move |i| i.equipment_id == equipment.id)
        .map(ScheduledInspection::Individual);
    let category = category_inspections
        .iter()
        .filter(move |c| c.applies_to(&equipment))
        .map(ScheduledInspection::Category);
    individual.chain(category).filter(|s| s.is_pending())
}

/// The inspection a status was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRef {
    pub kind: InspectionKind,
    pub id: i32,
    pub name: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStatus {
    pub status: Severity,
    /// Magnitude of the distance to the due date (days overdue when past due)
    pub days: i64,
    /// Signed: negative when past due
    pub days_until_due: i64,
    pub inspection: InspectionRef,
}

/// Resolve the current inspection status of an equipment item.
///
/// Picks the earliest due date; ties go to individual inspections, then to
/// the lower id. Returns `None` when nothing applies.
pub fn resolve(
    equipment: impl Into<EquipmentKey>,
    inspections: &[Inspection],
    category_inspections: &[CategoryInspection],
    today: NaiveDate,
) -> Option<ResolvedStatus> {
    let nearest = applicable(equipment.into(), inspections, category_inspections)
        .min_by_key(|s| (s.due_date(), s.kind(), s.id()))?;

    let days_until_due = (nearest.due_date() - today).num_days();

    Some(ResolvedStatus {
        status: Severity::from_days_until_due(days_until_due),
        days: days_until_due.abs(),
        days_until_due,
        inspection: InspectionRef {
            kind: nearest.kind(),
            id: nearest.id(),
            name: nearest.name().to_string(),
            due_date: nearest.due_date(),
        },
    })
}

/// Count of equipment items per severity bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub past_due: u32,
    pub critical: u32,
    pub warning: u32,
    pub attention: u32,
    pub normal: u32,
    pub upcoming: u32,
    pub no_inspection: u32,
}

impl StatusSummary {
    pub fn record(&mut self, status: Option<Severity>) {
        let counter = match status {
            Some(Severity::PastDue) => &mut self.past_due,
            Some(Severity::Critical) => &mut self.critical,
            Some(Severity::Warning) => &mut self.warning,
            Some(Severity::Attention) => &mut self.attention,
            Some(Severity::Normal) => &mut self.normal,
            Some(Severity::Upcoming) => &mut self.upcoming,
            None => &mut self.no_inspection,
        };
        *counter += 1;
    }

    pub fn total(&self) -> u32 {
        self.past_due
            + self.critical
            + self.warning
            + self.attention
            + self.normal
            + self.upcoming
            + self.no_inspection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::StationScope;
    use chrono::{Duration, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn key(id: i32, category: EquipmentCategory, station_id: i32) -> EquipmentKey {
        EquipmentKey { id, category, station_id }
    }

    fn inspection(id: i32, equipment_id: i32, due_in: i64) -> Inspection {
        Inspection {
            id,
            equipment_id,
            name: format!("Inspection {}", id),
            template_id: None,
            interval_months: None,
            due_date: today() + Duration::days(due_in),
            last_completed: None,
            status: InspectionStatus::Scheduled,
            notes: None,
            external_vendor: false,
            vendor_id: None,
            vendor_contact: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rule(id: i32, category: EquipmentCategory, scope: StationScope, due_in: i64) -> CategoryInspection {
        CategoryInspection {
            id,
            category,
            scope,
            name: format!("Rule {}", id),
            template_id: None,
            interval_months: Some(12),
            due_date: today() + Duration::days(due_in),
            last_completed: None,
            status: InspectionStatus::Scheduled,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Severity::from_days_until_due(-30), Severity::PastDue);
        assert_eq!(Severity::from_days_until_due(-1), Severity::PastDue);
        assert_eq!(Severity::from_days_until_due(0), Severity::Critical);
        assert_eq!(Severity::from_days_until_due(3), Severity::Critical);
        assert_eq!(Severity::from_days_until_due(4), Severity::Warning);
        assert_eq!(Severity::from_days_until_due(7), Severity::Warning);
        assert_eq!(Severity::from_days_until_due(8), Severity::Attention);
        assert_eq!(Severity::from_days_until_due(14), Severity::Attention);
        assert_eq!(Severity::from_days_until_due(15), Severity::Normal);
        assert_eq!(Severity::from_days_until_due(30), Severity::Normal);
        assert_eq!(Severity::from_days_until_due(31), Severity::Upcoming);
        assert_eq!(Severity::from_days_until_due(400), Severity::Upcoming);
    }

    #[test]
    fn test_no_inspections_resolves_to_none() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        assert_eq!(resolve(equipment, &[], &[], today()), None);
    }

    #[test]
    fn test_other_equipment_inspections_ignored() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let inspections = vec![inspection(10, 2, 5)];
        assert_eq!(resolve(equipment, &inspections, &[], today()), None);
    }

    #[test]
    fn test_due_in_five_days_is_warning() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let inspections = vec![inspection(10, 1, 5)];
        let resolved = resolve(equipment, &inspections, &[], today()).unwrap();
        assert_eq!(resolved.status, Severity::Warning);
        assert_eq!(resolved.days, 5);
        assert_eq!(resolved.days_until_due, 5);
    }

    #[test]
    fn test_two_days_past_due() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let inspections = vec![inspection(10, 1, -2)];
        let resolved = resolve(equipment, &inspections, &[], today()).unwrap();
        assert_eq!(resolved.status, Severity::PastDue);
        assert_eq!(resolved.days, 2);
        assert_eq!(resolved.days_until_due, -2);
    }

    #[test]
    fn test_picks_minimum_due_date_across_both_kinds() {
        let equipment = key(1, EquipmentCategory::Hose, 3);
        let inspections = vec![inspection(10, 1, 40), inspection(11, 1, 20)];
        let rules = vec![
            rule(20, EquipmentCategory::Hose, StationScope::AllStations, 9),
            rule(21, EquipmentCategory::Hose, StationScope::Station { station_id: 3 }, 12),
        ];
        let resolved = resolve(equipment, &inspections, &rules, today()).unwrap();
        assert_eq!(resolved.inspection.kind, InspectionKind::Category);
        assert_eq!(resolved.inspection.id, 20);
        assert_eq!(resolved.status, Severity::Attention);
    }

    #[test]
    fn test_category_rule_scope_and_category_matching() {
        let equipment = key(1, EquipmentCategory::Hose, 3);
        let rules = vec![
            rule(20, EquipmentCategory::Hose, StationScope::Station { station_id: 4 }, 1),
            rule(21, EquipmentCategory::Ladders, StationScope::AllStations, 2),
        ];
        assert_eq!(resolve(equipment, &[], &rules, today()), None);

        let rules = vec![rule(22, EquipmentCategory::Hose, StationScope::Station { station_id: 3 }, 1)];
        let resolved = resolve(equipment, &[], &rules, today()).unwrap();
        assert_eq!(resolved.inspection.id, 22);
        assert_eq!(resolved.status, Severity::Critical);
    }

    #[test]
    fn test_tie_prefers_individual_then_lower_id() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let inspections = vec![inspection(12, 1, 6), inspection(11, 1, 6)];
        let rules = vec![rule(5, EquipmentCategory::Scba, StationScope::AllStations, 6)];
        let resolved = resolve(equipment, &inspections, &rules, today()).unwrap();
        assert_eq!(resolved.inspection.kind, InspectionKind::Individual);
        assert_eq!(resolved.inspection.id, 11);
    }

    #[test]
    fn test_completed_one_off_ignored() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let mut done = inspection(10, 1, -90);
        done.status = InspectionStatus::Completed;
        let inspections = vec![done, inspection(11, 1, 45)];
        let resolved = resolve(equipment, &inspections, &[], today()).unwrap();
        assert_eq!(resolved.inspection.id, 11);
        assert_eq!(resolved.status, Severity::Upcoming);
    }

    #[test]
    fn test_due_today_is_critical_not_past_due() {
        let equipment = key(1, EquipmentCategory::Scba, 1);
        let inspections = vec![inspection(10, 1, 0)];
        let resolved = resolve(equipment, &inspections, &[], today()).unwrap();
        assert_eq!(resolved.status, Severity::Critical);
        assert_eq!(resolved.days, 0);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = StatusSummary::default();
        summary.record(Some(Severity::PastDue));
        summary.record(Some(Severity::PastDue));
        summary.record(Some(Severity::Normal));
        summary.record(None);
        assert_eq!(summary.past_due, 2);
        assert_eq!(summary.normal, 1);
        assert_eq!(summary.no_inspection, 1);
        assert_eq!(summary.total(), 4);
    }
}
