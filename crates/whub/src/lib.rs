//! Facade crate for `WaitHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `whub` with the desired feature flags (`server`).
//! - Call `whub::init` (server) to register feature slices; extend as new slices appear.

#[cfg(feature = "server")]
use whub_database::Database;
pub use whub_domain as domain;
#[cfg(feature = "server")]
use whub_domain::config::ApiConfig;
#[cfg(feature = "server")]
use whub_event_bus::EventBus;
pub use whub_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use whub_kernel::server::system_router;
        pub use whub_waitlist::router as waitlist_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use whub_audit as audit;
    pub use whub_waitlist as waitlist;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "waitlist",
        #[cfg(feature = "server")]
        "audit",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    _config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Waiting lists
    slices.push(features::waitlist::init()?);

    // Audit (claims the removal event queue, start it last)
    slices.push(features::audit::init(database.clone(), events)?);

    Ok(slices)
}
