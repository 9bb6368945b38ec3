use crate::error::AuditError;
use chrono::DateTime;
use surrealdb::types::SurrealValue;
use whub_database::{Database, DatabaseError};
use whub_domain::constants::REMOVAL_TABLE;
use whub_domain::events::AccountRemoved;

/// One persisted removal record, as read back from the audit trail.
#[derive(Debug, Clone, SurrealValue)]
pub struct RemovalRecord {
    pub waitlist_id: String,
    pub account_id: String,
    /// Machine value of the removal reason (snake_case).
    pub reason: String,
    pub actor: String,
    pub custom_reason: Option<String>,
    /// Unix milliseconds.
    pub removed_at: i64,
}

/// Persistence for the removal audit trail.
#[derive(Debug, Clone)]
pub struct AuditStore {
    db: Database,
}

impl AuditStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Appends one removal record.
    ///
    /// # Errors
    /// Returns a database error on connection failure.
    pub async fn record_removal(&self, event: &AccountRemoved) -> Result<(), AuditError> {
        self.db
            .query("CREATE type::table($tb) CONTENT $doc")
            .bind(("tb", REMOVAL_TABLE))
            .bind((
                "doc",
                RemovalRecord {
                    waitlist_id: event.waitlist_id.clone(),
                    account_id: event.account_id.clone(),
                    reason: event.reason.value().to_owned(),
                    actor: event.actor.clone(),
                    custom_reason: event.custom_reason.clone(),
                    removed_at: event.removed_at.timestamp_millis(),
                },
            ))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// Removal history of one waiting list, oldest first.
    ///
    /// # Errors
    /// Returns a database error on connection failure.
    pub async fn removals_for(&self, waitlist_id: &str) -> Result<Vec<RemovalRecord>, AuditError> {
        let records = self
            .db
            .query(
                "SELECT waitlist_id, account_id, reason, actor, custom_reason, removed_at \
                 FROM type::table($tb) WHERE waitlist_id = $waitlist_id ORDER BY removed_at",
            )
            .bind(("tb", REMOVAL_TABLE))
            .bind(("waitlist_id", waitlist_id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take(0)
            .map_err(DatabaseError::from)?;
        Ok(records)
    }
}

impl RemovalRecord {
    /// Removal time as UTC; `None` when the stored value is out of range.
    #[must_use]
    pub fn removed_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        DateTime::from_timestamp_millis(self.removed_at)
    }
}
