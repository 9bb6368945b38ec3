use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named booleans controlling optional per-list behavior.
///
/// Keys are free-form; unset keys default to **true** so new toggles are
/// opt-out rather than silently disabling existing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureToggles(BTreeMap<String, bool>);

impl FeatureToggles {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the toggle state, defaulting to `true` when unset.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(true)
    }

    pub fn set(&mut self, key: impl Into<String>, enabled: bool) {
        self.0.insert(key.into(), enabled);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, enabled)| (key.as_str(), *enabled))
    }
}

impl FromIterator<(String, bool)> for FeatureToggles {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CHECK_CTS_THEORY_EXAM, DISPLAY_ON_ROSTER};

    #[test]
    fn unset_keys_default_to_true() {
        let toggles = FeatureToggles::new();
        assert!(toggles.is_enabled(CHECK_CTS_THEORY_EXAM));
        assert!(toggles.is_enabled(DISPLAY_ON_ROSTER));
    }

    #[test]
    fn explicit_false_wins() {
        let mut toggles = FeatureToggles::new();
        toggles.set(DISPLAY_ON_ROSTER, false);
        assert!(!toggles.is_enabled(DISPLAY_ON_ROSTER));
        assert!(toggles.is_enabled(CHECK_CTS_THEORY_EXAM));
    }
}
