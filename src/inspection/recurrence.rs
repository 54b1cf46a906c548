//! Recurring schedule advancement
//!
//! Completing a recurring inspection moves its due date forward by the
//! recurrence interval, counted in calendar months from the previous due
//! date (not from the completion date). One-off inspections have no
//! interval: they are stamped completed and keep their due date.

use chrono::{DateTime, Months, NaiveDate, Utc};

use super::templates;
use crate::{
    error::{AppError, AppResult},
    models::enums::InspectionStatus,
};

/// Add calendar months, clamping to the last day of shorter months
/// (2024-01-31 + 1 month = 2024-02-29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Recurrence interval in months: the template interval when a known template
/// is set, otherwise the inspection's own custom interval.
pub fn recurrence_interval(template_id: Option<&str>, custom_interval: Option<i32>) -> Option<u32> {
    template_id
        .and_then(templates::find)
        .map(|t| t.interval)
        .or_else(|| custom_interval.and_then(|m| u32::try_from(m).ok()).filter(|m| *m > 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Recurring: the schedule moved forward
    Rescheduled { next_due_date: NaiveDate },
    /// No interval: the inspection is done for good
    OneOff,
}

/// New state of an inspection after completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPlan {
    pub due_date: NaiveDate,
    pub status: InspectionStatus,
    pub last_completed: DateTime<Utc>,
    pub outcome: CompletionOutcome,
}

impl CompletionPlan {
    /// Text recorded in the equipment history
    pub fn describe(&self, inspection_name: &str, notes: Option<&str>) -> String {
        let mut text = match self.outcome {
            CompletionOutcome::Rescheduled { next_due_date } => format!(
                "Inspection '{}' completed; next due {}",
                inspection_name, next_due_date
            ),
            CompletionOutcome::OneOff => format!("Inspection '{}' completed", inspection_name),
        };
        if let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) {
            text.push_str(": ");
            text.push_str(notes);
        }
        text
    }
}

/// Compute the state of an inspection after it is marked complete at `now`.
pub fn plan_completion(
    due_date: NaiveDate,
    status: InspectionStatus,
    interval_months: Option<u32>,
    now: DateTime<Utc>,
) -> AppResult<CompletionPlan> {
    match interval_months {
        Some(months) => {
            let next_due_date = add_months(due_date, months).ok_or_else(|| {
                AppError::Validation(format!(
                    "Cannot advance due date {} by {} months",
                    due_date, months
                ))
            })?;
            Ok(CompletionPlan {
                due_date: next_due_date,
                status: InspectionStatus::Scheduled,
                last_completed: now,
                outcome: CompletionOutcome::Rescheduled { next_due_date },
            })
        }
        None if status == InspectionStatus::Completed => Err(AppError::Validation(
            "Inspection has already been completed".to_string(),
        )),
        None => Ok(CompletionPlan {
            due_date,
            status: InspectionStatus::Completed,
            last_completed: now,
            outcome: CompletionOutcome::OneOff,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_twelve_months_from_mid_january() {
        let plan = plan_completion(date(2024, 1, 15), InspectionStatus::Scheduled, Some(12), Utc::now()).unwrap();
        assert_eq!(plan.due_date, date(2025, 1, 15));
        assert_eq!(plan.status, InspectionStatus::Scheduled);
        assert_eq!(
            plan.outcome,
            CompletionOutcome::Rescheduled { next_due_date: date(2025, 1, 15) }
        );
    }

    #[test]
    fn test_calendar_months_not_fixed_days() {
        assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(add_months(date(2023, 1, 31), 1), Some(date(2023, 2, 28)));
        assert_eq!(add_months(date(2024, 3, 10), 3), Some(date(2024, 6, 10)));
        assert_eq!(add_months(date(2024, 11, 30), 60), Some(date(2029, 11, 30)));
    }

    #[test]
    fn test_advances_from_due_date_even_when_late() {
        let completed_at = "2024-03-20T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let plan = plan_completion(date(2024, 1, 15), InspectionStatus::Scheduled, Some(1), completed_at).unwrap();
        assert_eq!(plan.due_date, date(2024, 2, 15));
        assert_eq!(plan.last_completed, completed_at);
    }

    #[test]
    fn test_one_off_keeps_due_date() {
        let plan = plan_completion(date(2024, 5, 1), InspectionStatus::InProgress, None, Utc::now()).unwrap();
        assert_eq!(plan.due_date, date(2024, 5, 1));
        assert_eq!(plan.status, InspectionStatus::Completed);
        assert_eq!(plan.outcome, CompletionOutcome::OneOff);
    }

    #[test]
    fn test_completed_one_off_cannot_complete_again() {
        let err = plan_completion(date(2024, 5, 1), InspectionStatus::Completed, None, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_interval_prefers_template() {
        assert_eq!(recurrence_interval(Some("extinguisher-six-year"), Some(3)), Some(72));
        assert_eq!(recurrence_interval(Some("unknown-template"), Some(3)), Some(3));
        assert_eq!(recurrence_interval(None, Some(6)), Some(6));
        assert_eq!(recurrence_interval(None, Some(0)), None);
        assert_eq!(recurrence_interval(None, None), None);
    }

    #[test]
    fn test_describe() {
        let plan = plan_completion(date(2024, 1, 15), InspectionStatus::Scheduled, Some(12), Utc::now()).unwrap();
        assert_eq!(
            plan.describe("Hose test", Some("  all sections passed ")),
            "Inspection 'Hose test' completed; next due 2025-01-15: all sections passed"
        );
        let one_off = plan_completion(date(2024, 1, 15), InspectionStatus::Scheduled, None, Utc::now()).unwrap();
        assert_eq!(one_off.describe("Post-fire check", None), "Inspection 'Post-fire check' completed");
    }
}
