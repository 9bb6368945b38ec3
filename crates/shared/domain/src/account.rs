use crate::flags::FlagAssignment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Join entity linking an external account to a waiting list.
///
/// An entry belongs to exactly one waiting list at a time; removal ends the
/// membership and there is no reactivation path. `theory_exam_passed` and
/// `on_roster` are derived by external collaborators and read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingListAccount {
    pub account_id: String,
    /// Display name of the associated account.
    pub name: String,
    /// Admission time; drives the canonical list ordering.
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub theory_exam_passed: bool,
    #[serde(default)]
    pub on_roster: bool,
    #[serde(default)]
    pub assignments: Vec<FlagAssignment>,
}

impl WaitingListAccount {
    /// Creates a fresh entry with no notes and no flag assignments.
    #[must_use]
    pub fn new(account_id: impl Into<String>, name: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            account_id: account_id.into(),
            name: name.into(),
            joined_at,
            notes: String::new(),
            theory_exam_passed: false,
            on_roster: false,
            assignments: Vec::new(),
        }
    }

    #[must_use]
    pub fn assignment(&self, flag_id: &str) -> Option<&FlagAssignment> {
        self.assignments.iter().find(|a| a.flag_id == flag_id)
    }

    pub fn assignment_mut(&mut self, flag_id: &str) -> Option<&mut FlagAssignment> {
        self.assignments.iter_mut().find(|a| a.flag_id == flag_id)
    }

    /// True iff the pivot for `flag_id` exists and carries a mark timestamp.
    #[must_use]
    pub fn is_marked(&self, flag_id: &str) -> bool {
        self.assignment(flag_id).is_some_and(FlagAssignment::is_marked)
    }
}
