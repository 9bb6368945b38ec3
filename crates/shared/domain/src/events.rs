//! Domain events published on the event bus by the waitlist slice.

use crate::removal::RemovalReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted after an account's membership has been removed from a list.
///
/// This is the audit artifact: the audit slice persists one record per
/// event. The removal itself is already committed when this is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRemoved {
    pub waitlist_id: String,
    pub account_id: String,
    pub reason: RemovalReason,
    pub actor: String,
    pub custom_reason: Option<String>,
    pub removed_at: DateTime<Utc>,
}

/// Broadcast whenever list state changed and read models should refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistChanged {
    pub waitlist_id: String,
}
