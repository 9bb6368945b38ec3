use crate::list::WaitingList;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use whub_domain::constants::{CHECK_CTS_THEORY_EXAM, DISPLAY_ON_ROSTER};

/// A roster column generated from a flag definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
}

/// One roster row: an active member with position and mark states.
///
/// `theory_exam_passed` and `on_roster` are `None` when the owning list's
/// feature toggle hides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RosterEntry {
    /// 1-based rank in canonical order.
    pub position: usize,
    pub account_id: String,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theory_exam_passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_roster: Option<bool>,
    /// Mark state per displayable flag, keyed by flag id.
    pub flags: BTreeMap<String, bool>,
}

/// Read model for the roster UI: column descriptors plus ordered rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Roster {
    pub list_id: String,
    pub list_name: String,
    /// Columns built from flags with `display_in_table`; position-group
    /// flags are displayable here even though they are not editable.
    pub fields: Vec<FieldDescriptor>,
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Projects a list into its roster read model.
    #[must_use]
    pub fn project(list: &WaitingList) -> Self {
        let toggles = list.feature_toggles();
        let show_exam = toggles.is_enabled(CHECK_CTS_THEORY_EXAM);
        let show_roster = toggles.is_enabled(DISPLAY_ON_ROSTER);

        let displayable: Vec<_> = list.flags().filter(|flag| flag.display_in_table).collect();
        let fields = displayable
            .iter()
            .map(|flag| FieldDescriptor { key: flag.id.clone(), label: flag.name.clone() })
            .collect();

        let entries = list
            .accounts()
            .enumerate()
            .map(|(index, member)| RosterEntry {
                position: index + 1,
                account_id: member.account_id.clone(),
                name: member.name.clone(),
                joined_at: member.joined_at,
                notes: member.notes.clone(),
                theory_exam_passed: show_exam.then_some(member.theory_exam_passed),
                on_roster: show_roster.then_some(member.on_roster),
                flags: displayable
                    .iter()
                    .map(|flag| (flag.id.clone(), member.is_marked(&flag.id)))
                    .collect(),
            })
            .collect();

        Self {
            list_id: list.id().to_owned(),
            list_name: list.name().to_owned(),
            fields,
            entries,
        }
    }
}
