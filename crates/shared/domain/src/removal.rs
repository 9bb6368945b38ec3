use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Closed set of causes for leaving a waiting list.
///
/// The wire value is the snake_case variant name; [`RemovalReason::label`]
/// provides the human-readable form used to populate selection UIs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[derive(utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RemovalReason {
    TrainingPlaceOffered,
    NoLongerInterested,
    Inactivity,
    LeftCommunity,
    Duplicate,
    /// Requires an accompanying free-text reason.
    Other,
}

impl RemovalReason {
    /// Stable machine value (snake_case variant name).
    #[must_use]
    pub fn value(self) -> &'static str {
        self.into()
    }

    /// Human-readable label for presentation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TrainingPlaceOffered => "Training place offered",
            Self::NoLongerInterested => "No longer interested",
            Self::Inactivity => "Inactivity",
            Self::LeftCommunity => "Left the community",
            Self::Duplicate => "Duplicate entry",
            Self::Other => "Other",
        }
    }

    /// True iff this reason must be accompanied by free text.
    #[must_use]
    pub const fn requires_custom_reason(self) -> bool {
        matches!(self, Self::Other)
    }

    /// All reasons as `{value, label}` pairs, in declaration order.
    #[must_use]
    pub fn form_options() -> Vec<ReasonOption> {
        Self::iter().map(|reason| ReasonOption { value: reason.value(), label: reason.label() }).collect()
    }
}

/// A `{value, label}` pair for reason-selection UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReasonOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Value object describing one removal: who initiated it, why, and the
/// free-text explanation required when the reason is [`RemovalReason::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub reason: RemovalReason,
    /// Explicit pre-authorized actor; there is no ambient current user.
    pub actor: String,
    #[serde(default)]
    pub custom_reason: Option<String>,
}

impl Removal {
    #[must_use]
    pub fn new(reason: RemovalReason, actor: impl Into<String>, custom_reason: Option<String>) -> Self {
        Self { reason, actor: actor.into(), custom_reason }
    }

    /// True iff the custom-reason requirement is satisfied.
    #[must_use]
    pub fn has_valid_reason(&self) -> bool {
        !self.reason.requires_custom_reason()
            || self.custom_reason.as_deref().is_some_and(|text| !text.trim().is_empty())
    }

    /// Timestamped removal record, ready for the audit trail.
    #[must_use]
    pub fn recorded_at(&self, waitlist_id: &str, account_id: &str, removed_at: DateTime<Utc>) -> crate::events::AccountRemoved {
        crate::events::AccountRemoved {
            waitlist_id: waitlist_id.to_owned(),
            account_id: account_id.to_owned(),
            reason: self.reason,
            actor: self.actor.clone(),
            custom_reason: self.custom_reason.clone(),
            removed_at,
        }
    }
}
