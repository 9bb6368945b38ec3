//! Audit feature slice.
//!
//! Observes `AccountRemoved` events and persists one `removal` record per
//! event. The removal itself is already committed when the event arrives,
//! so recording failures are logged and never block anything.

mod error;
#[cfg(feature = "server")]
mod store;

pub use error::AuditError;
#[cfg(feature = "server")]
pub use store::{AuditStore, RemovalRecord};

use whub_domain::registry::FeatureSlice;
#[cfg(feature = "server")]
use whub_domain::registry::InitializedSlice;

/// Events queued beyond this bound are rejected at publish time.
#[cfg(feature = "server")]
const QUEUE_CAPACITY: usize = 256;

/// Audit feature state.
#[derive(Debug)]
pub struct Audit;

impl FeatureSlice for Audit {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Initialize the audit feature and start the removal recorder.
///
/// # Errors
/// Returns an error if the removal queue was already claimed.
#[cfg(feature = "server")]
pub fn init(
    db: whub_database::Database,
    events: &whub_event_bus::EventBus,
) -> Result<InitializedSlice, AuditError> {
    use whub_domain::events::AccountRemoved;

    let receiver = events.subscribe_mpsc::<AccountRemoved>(QUEUE_CAPACITY)?;
    tokio::spawn(run_recorder(AuditStore::new(db), receiver));

    tracing::info!("Audit slice initialized");
    Ok(InitializedSlice::new(Audit))
}

#[cfg(feature = "server")]
async fn run_recorder(
    store: AuditStore,
    mut receiver: tokio::sync::mpsc::Receiver<std::sync::Arc<whub_domain::events::AccountRemoved>>,
) {
    use whub_event_bus::EventReceiverExt;

    while let Some(event) = receiver.next_event().await {
        if let Err(error) = store.record_removal(&event).await {
            tracing::warn!(
                %error,
                waitlist_id = %event.waitlist_id,
                account_id = %event.account_id,
                "failed to record removal"
            );
        }
    }
    tracing::debug!("Removal recorder stopped");
}
