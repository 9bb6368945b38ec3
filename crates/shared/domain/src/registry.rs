//! Registry primitives for feature slices.
//! Slices initialize once at bootstrap and hand the server a type-erased
//! handle; the API state downcasts back to the concrete slice on demand.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for per-slice state shared across the server.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Exposes the concrete type for downcasting out of the registry.
    fn as_any(&self) -> &dyn Any;
}

/// A slice that finished its bootstrap, keyed by its concrete [`TypeId`].
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Wraps freshly initialized slice state for registration.
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
