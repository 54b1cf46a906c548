//! Inspection scheduling engine
//!
//! Pure functions over in-memory records: nothing in this module touches the
//! database. The services fetch the rows, call into here, and persist the
//! outcome.
//!
//! - [`status`]: nearest-due resolution and severity buckets
//! - [`recurrence`]: due-date advancement on completion
//! - [`templates`]: static NFPA-derived inspection templates

pub mod recurrence;
pub mod status;
pub mod templates;

pub use recurrence::{plan_completion, CompletionOutcome, CompletionPlan};
pub use status::{resolve, EquipmentKey, InspectionKind, ResolvedStatus, ScheduledInspection, Severity, StatusSummary};
pub use templates::InspectionTemplate;
