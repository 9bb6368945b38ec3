//! # Event Bus
//!
//! A type-safe, asynchronous event bus connecting decoupled feature slices.
//!
//! ## Overview
//!
//! Provides a centralized [`EventBus`] with two channel kinds: `broadcast`
//! (fan-out, e.g. read-model refresh triggers) and `mpsc` (bounded queue with
//! a single consumer, e.g. an audit worker draining removal events). Built on
//! `tokio` primitives with `FxHashMap` + `parking_lot::RwLock` bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use whub_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct ListChanged { list: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     // Default broadcast channel.
//!     let mut rx = bus.subscribe::<ListChanged>()?;
//!     bus.publish(ListChanged { list: 7 })?;
//!
//!     if let Ok(event) = rx.recv().await {
//!         assert_eq!(event.list, 7);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::EventBusError;
pub use receiver::EventReceiverExt;
