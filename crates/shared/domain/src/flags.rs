use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named boolean attribute definable per waiting list.
///
/// A flag with an owning position group is *automatic*: its mark state is
/// derived by an external collaborator and must never be edited manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub id: String,
    pub name: String,
    /// Owning position group; `Some` marks the flag as automatic.
    #[serde(default)]
    pub position_group: Option<String>,
    /// Whether the flag gets its own roster column.
    #[serde(default)]
    pub display_in_table: bool,
}

impl Flag {
    /// Manual flags have no owning position group.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.position_group.is_none()
    }
}

/// Pivot record linking an account-within-list to a [`Flag`].
///
/// `marked_at == None` means unmarked/false; `Some(t)` means marked at `t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagAssignment {
    pub flag_id: String,
    #[serde(default)]
    pub marked_at: Option<DateTime<Utc>>,
}

impl FlagAssignment {
    /// Creates an unmarked assignment for `flag_id`.
    #[must_use]
    pub const fn unmarked(flag_id: String) -> Self {
        Self { flag_id, marked_at: None }
    }

    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.marked_at.is_some()
    }

    /// Marks the assignment at `now`. Idempotent: re-marking keeps the
    /// assignment marked and refreshes the timestamp.
    pub const fn mark(&mut self, now: DateTime<Utc>) {
        self.marked_at = Some(now);
    }

    /// Clears the mark timestamp. Idempotent.
    pub const fn unmark(&mut self) {
        self.marked_at = None;
    }
}
