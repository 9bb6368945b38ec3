use crate::error::WaitlistError;
use crate::list::WaitingList;
use chrono::DateTime;
use surrealdb::types::SurrealValue;
use whub_database::{Database, DatabaseError};
use whub_domain::account::WaitingListAccount;
use whub_domain::constants::WAITING_LIST_TABLE;
use whub_domain::flags::{Flag, FlagAssignment};
use whub_domain::toggles::FeatureToggles;

/// Persistence for waiting list aggregates.
///
/// Each list is stored as a single document, so every save is one atomic
/// `UPSERT ... CONTENT` statement. Flag resync and removal therefore commit
/// all-or-nothing without transaction choreography.
#[derive(Debug, Clone)]
pub struct WaitlistStore {
    db: Database,
}

#[derive(Debug, Clone, SurrealValue)]
struct AssignmentDoc {
    flag_id: String,
    marked_at: Option<i64>,
}

#[derive(Debug, Clone, SurrealValue)]
struct AccountDoc {
    account_id: String,
    name: String,
    joined_at: i64,
    notes: String,
    theory_exam_passed: bool,
    on_roster: bool,
    assignments: Vec<AssignmentDoc>,
}

#[derive(Debug, Clone, SurrealValue)]
struct FlagDoc {
    flag_id: String,
    name: String,
    position_group: Option<String>,
    display_in_table: bool,
}

#[derive(Debug, Clone, SurrealValue)]
struct ToggleDoc {
    key: String,
    enabled: bool,
}

#[derive(Debug, Clone, SurrealValue)]
struct WaitingListDoc {
    list_id: String,
    name: String,
    toggles: Vec<ToggleDoc>,
    flags: Vec<FlagDoc>,
    accounts: Vec<AccountDoc>,
}

impl WaitlistStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates the aggregate document; fails if the record already exists.
    ///
    /// # Errors
    /// Returns a database error on conflict or connection failure.
    pub async fn create(&self, list: &WaitingList) -> Result<(), WaitlistError> {
        self.db
            .query("CREATE type::thing($tb, $id) CONTENT $doc")
            .bind(("tb", WAITING_LIST_TABLE))
            .bind(("id", list.id().to_owned()))
            .bind(("doc", WaitingListDoc::from(list)))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    /// Loads an aggregate by list id.
    ///
    /// # Errors
    /// Returns `NotFound` when no such list exists.
    pub async fn load(&self, list_id: &str) -> Result<WaitingList, WaitlistError> {
        let mut response = self
            .db
            .query(
                "SELECT list_id, name, toggles, flags, accounts \
                 FROM type::thing($tb, $id)",
            )
            .bind(("tb", WAITING_LIST_TABLE))
            .bind(("id", list_id.to_owned()))
            .await
            .map_err(DatabaseError::from)?;

        let doc: Option<WaitingListDoc> =
            response.take(0).map_err(DatabaseError::from)?;
        doc.ok_or_else(|| WaitlistError::not_found(format!("waiting list '{list_id}'")))?
            .into_domain()
    }

    /// Persists the aggregate in one atomic statement.
    ///
    /// # Errors
    /// Returns a database error on connection failure.
    pub async fn save(&self, list: &WaitingList) -> Result<(), WaitlistError> {
        self.db
            .query("UPSERT type::thing($tb, $id) CONTENT $doc")
            .bind(("tb", WAITING_LIST_TABLE))
            .bind(("id", list.id().to_owned()))
            .bind(("doc", WaitingListDoc::from(list)))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}

impl From<&WaitingList> for WaitingListDoc {
    fn from(list: &WaitingList) -> Self {
        Self {
            list_id: list.id().to_owned(),
            name: list.name().to_owned(),
            toggles: list
                .feature_toggles()
                .iter()
                .map(|(key, enabled)| ToggleDoc { key: key.to_owned(), enabled })
                .collect(),
            flags: list
                .flags()
                .map(|flag| FlagDoc {
                    flag_id: flag.id.clone(),
                    name: flag.name.clone(),
                    position_group: flag.position_group.clone(),
                    display_in_table: flag.display_in_table,
                })
                .collect(),
            accounts: list
                .accounts()
                .map(|member| AccountDoc {
                    account_id: member.account_id.clone(),
                    name: member.name.clone(),
                    joined_at: member.joined_at.timestamp_millis(),
                    notes: member.notes.clone(),
                    theory_exam_passed: member.theory_exam_passed,
                    on_roster: member.on_roster,
                    assignments: member
                        .assignments
                        .iter()
                        .map(|pivot| AssignmentDoc {
                            flag_id: pivot.flag_id.clone(),
                            marked_at: pivot.marked_at.map(|at| at.timestamp_millis()),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl WaitingListDoc {
    fn into_domain(self) -> Result<WaitingList, WaitlistError> {
        let toggles: FeatureToggles =
            self.toggles.into_iter().map(|toggle| (toggle.key, toggle.enabled)).collect();
        let flags = self
            .flags
            .into_iter()
            .map(|doc| Flag {
                id: doc.flag_id,
                name: doc.name,
                position_group: doc.position_group,
                display_in_table: doc.display_in_table,
            })
            .collect();
        let accounts = self
            .accounts
            .into_iter()
            .map(|doc| {
                let joined_at = millis_to_utc(doc.joined_at)?;
                let assignments = doc
                    .assignments
                    .into_iter()
                    .map(|pivot| {
                        Ok(FlagAssignment {
                            flag_id: pivot.flag_id,
                            marked_at: pivot.marked_at.map(millis_to_utc).transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>, WaitlistError>>()?;
                Ok(WaitingListAccount {
                    account_id: doc.account_id,
                    name: doc.name,
                    joined_at,
                    notes: doc.notes,
                    theory_exam_passed: doc.theory_exam_passed,
                    on_roster: doc.on_roster,
                    assignments,
                })
            })
            .collect::<Result<Vec<_>, WaitlistError>>()?;

        Ok(WaitingList::from_parts(self.list_id, self.name, toggles, flags, accounts))
    }
}

fn millis_to_utc(millis: i64) -> Result<chrono::DateTime<chrono::Utc>, WaitlistError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| WaitlistError::validation(format!("timestamp out of range: {millis}")))
}
