//! Waiting list feature slice.
//!
//! Owns the queue semantics: canonical ordering and 1-based positions,
//! the per-list flag registry with manual edit rules, and the removal
//! recorder that yields audit artifacts.

mod error;
mod list;
mod roster;

#[cfg(feature = "server")]
mod api;
#[cfg(feature = "server")]
mod store;

pub use error::WaitlistError;
pub use list::WaitingList;
pub use roster::{FieldDescriptor, Roster, RosterEntry};

#[cfg(feature = "server")]
pub use api::{ACTOR_HEADER, CreateListRequest, RemoveAccountRequest, UpdateAccountRequest, router};
#[cfg(feature = "server")]
pub use store::WaitlistStore;

#[cfg(feature = "server")]
use whub_domain::registry::InitializedSlice;
use whub_domain::registry::FeatureSlice;

/// Waiting list feature state.
#[derive(Debug)]
pub struct Waitlist;

impl FeatureSlice for Waitlist {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Initialize the waiting list feature.
///
/// # Errors
/// Infallible today; the `Result` keeps slice bootstrap uniform across
/// features that do fail to start.
#[cfg(feature = "server")]
pub fn init() -> Result<InitializedSlice, WaitlistError> {
    tracing::info!("Waitlist slice initialized");

    Ok(InitializedSlice::new(Waitlist))
}
