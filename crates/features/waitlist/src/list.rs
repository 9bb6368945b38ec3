use crate::error::WaitlistError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use whub_domain::account::WaitingListAccount;
use whub_domain::events::AccountRemoved;
use whub_domain::flags::{Flag, FlagAssignment};
use whub_domain::removal::Removal;
use whub_domain::toggles::FeatureToggles;

/// A waiting list aggregate: ordered members, flag definitions and toggles.
///
/// Members are kept in canonical order at all times: ascending `joined_at`,
/// with insertion order preserved for equal timestamps. Every read
/// (`accounts`, `position_of`, roster projection) observes the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingList {
    id: String,
    name: String,
    feature_toggles: FeatureToggles,
    flags: Vec<Flag>,
    accounts: Vec<WaitingListAccount>,
}

impl WaitingList {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            feature_toggles: FeatureToggles::new(),
            flags: Vec::new(),
            accounts: Vec::new(),
        }
    }

    /// Reassembles an aggregate from stored parts. Members are re-sorted
    /// into canonical order in case the source did not preserve it.
    #[must_use]
    pub fn from_parts(
        id: String,
        name: String,
        feature_toggles: FeatureToggles,
        flags: Vec<Flag>,
        mut accounts: Vec<WaitingListAccount>,
    ) -> Self {
        accounts.sort_by_key(|account| account.joined_at);
        Self { id, name, feature_toggles, flags, accounts }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn feature_toggles(&self) -> &FeatureToggles {
        &self.feature_toggles
    }

    pub fn feature_toggles_mut(&mut self) -> &mut FeatureToggles {
        &mut self.feature_toggles
    }

    /// Registers a flag definition. Replaces any definition with the same id.
    pub fn define_flag(&mut self, flag: Flag) {
        if let Some(existing) = self.flags.iter_mut().find(|f| f.id == flag.id) {
            *existing = flag;
        } else {
            self.flags.push(flag);
        }
    }

    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    #[must_use]
    pub fn flag(&self, flag_id: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.id == flag_id)
    }

    /// Flags without an owning position group; the only ones editable by hand.
    pub fn manual_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter().filter(|flag| flag.is_manual())
    }

    /// Admits an account, slotting it after any member with the same
    /// `joined_at` so ties keep their admission order.
    pub fn add_account(&mut self, account: WaitingListAccount) {
        let at = self.accounts.partition_point(|member| member.joined_at <= account.joined_at);
        self.accounts.insert(at, account);
    }

    /// Members in canonical order.
    pub fn accounts(&self) -> impl Iterator<Item = &WaitingListAccount> {
        self.accounts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    #[must_use]
    pub fn account(&self, account_id: &str) -> Option<&WaitingListAccount> {
        self.accounts.iter().find(|member| member.account_id == account_id)
    }

    fn account_mut(&mut self, account_id: &str) -> Result<&mut WaitingListAccount, WaitlistError> {
        self.accounts
            .iter_mut()
            .find(|member| member.account_id == account_id)
            .ok_or_else(|| WaitlistError::not_found(format!("account '{account_id}'")))
    }

    /// 1-based rank of an active member; `None` when not a member.
    ///
    /// Agrees exactly with [`Self::accounts`] iteration order, so displayed
    /// positions always match the roster.
    #[must_use]
    pub fn position_of(&self, account_id: &str) -> Option<NonZeroUsize> {
        self.accounts
            .iter()
            .position(|member| member.account_id == account_id)
            .and_then(|index| NonZeroUsize::new(index + 1))
    }

    /// True iff the member's pivot for `flag_id` carries a mark timestamp.
    #[must_use]
    pub fn is_marked(&self, account_id: &str, flag_id: &str) -> bool {
        self.account(account_id).is_some_and(|member| member.is_marked(flag_id))
    }

    /// Sets the mark timestamp on a member's pivot, creating the pivot when
    /// absent. Idempotent: re-marking refreshes the timestamp.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown account or flag.
    pub fn mark(
        &mut self,
        account_id: &str,
        flag_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), WaitlistError> {
        self.ensure_flag(flag_id)?;
        let account = self.account_mut(account_id)?;
        if let Some(pivot) = account.assignment_mut(flag_id) {
            pivot.mark(now);
        } else {
            let mut pivot = FlagAssignment::unmarked(flag_id.to_owned());
            pivot.mark(now);
            account.assignments.push(pivot);
        }
        Ok(())
    }

    /// Clears the mark timestamp on a member's pivot. Idempotent.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown account or flag.
    pub fn unmark(&mut self, account_id: &str, flag_id: &str) -> Result<(), WaitlistError> {
        self.ensure_flag(flag_id)?;
        let account = self.account_mut(account_id)?;
        if let Some(pivot) = account.assignment_mut(flag_id) {
            pivot.unmark();
        }
        Ok(())
    }

    fn ensure_flag(&self, flag_id: &str) -> Result<(), WaitlistError> {
        if self.flag(flag_id).is_none() {
            return Err(WaitlistError::not_found(format!("flag '{flag_id}'")));
        }
        Ok(())
    }

    /// Updates a member's free-text notes.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown account.
    pub fn set_notes(
        &mut self,
        account_id: &str,
        notes: impl Into<String>,
    ) -> Result<(), WaitlistError> {
        self.account_mut(account_id)?.notes = notes.into();
        Ok(())
    }

    /// Applies a manual flag edit in one pass.
    ///
    /// For every *manual* flag the desired state is taken from `desired`;
    /// a missing entry means unmark. Automatic flags are never touched, even
    /// when present in the input. Afterwards the member's pivot set is
    /// resynchronized so exactly this list's flags remain associated.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown account.
    pub fn apply_manual_edits(
        &mut self,
        account_id: &str,
        desired: &BTreeMap<String, bool>,
        now: DateTime<Utc>,
    ) -> Result<(), WaitlistError> {
        let flags = self.flags.clone();
        let account = self.account_mut(account_id)?;

        for flag in &flags {
            if !flag.is_manual() {
                continue;
            }
            let wanted = desired.get(&flag.id).copied().unwrap_or(false);
            match account.assignment_mut(&flag.id) {
                Some(pivot) if wanted => pivot.mark(now),
                Some(pivot) => pivot.unmark(),
                None => {
                    let mut pivot = FlagAssignment::unmarked(flag.id.clone());
                    if wanted {
                        pivot.mark(now);
                    }
                    account.assignments.push(pivot);
                }
            }
        }

        // Resync: exactly the list's flags stay associated, keeping timestamps.
        account.assignments.retain(|pivot| flags.iter().any(|flag| flag.id == pivot.flag_id));
        for flag in &flags {
            if account.assignment(&flag.id).is_none() {
                account.assignments.push(FlagAssignment::unmarked(flag.id.clone()));
            }
        }
        Ok(())
    }

    /// Ends a membership, yielding the audit artifact.
    ///
    /// The mutation is all-or-nothing: validation runs before anything is
    /// touched, and the membership is terminal once removed.
    ///
    /// # Errors
    /// `Validation` when the reason is `Other` without custom text;
    /// `NotFound` when the account is not an active member (double removal).
    pub fn remove_account(
        &mut self,
        account_id: &str,
        removal: &Removal,
        now: DateTime<Utc>,
    ) -> Result<AccountRemoved, WaitlistError> {
        if !removal.has_valid_reason() {
            return Err(WaitlistError::validation(
                "a custom reason is required when the removal reason is 'other'",
            ));
        }
        let index = self
            .accounts
            .iter()
            .position(|member| member.account_id == account_id)
            .ok_or_else(|| WaitlistError::not_found(format!("account '{account_id}'")))?;

        self.accounts.remove(index);
        Ok(removal.recorded_at(&self.id, account_id, now))
    }
}
