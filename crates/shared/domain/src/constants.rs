//! Shared string constants used across slices.

/// Feature toggle key: show the theory-exam column and fieldset.
pub const CHECK_CTS_THEORY_EXAM: &str = "check_cts_theory_exam";
/// Feature toggle key: show the on-roster column.
pub const DISPLAY_ON_ROSTER: &str = "display_on_roster";

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for waiting list endpoints.
pub const WAITLIST_TAG: &str = "Waiting Lists";

/// Record table for waiting list aggregates.
pub const WAITING_LIST_TABLE: &str = "waiting_list";
/// Record table for removal audit rows.
pub const REMOVAL_TABLE: &str = "removal";
