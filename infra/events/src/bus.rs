use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{trace, warn};

/// A safe default for channel buffers.
/// 128 is usually enough for domain events in a vertical slice.
const DEFAULT_CAPACITY: usize = 128;
const MIN_CAPACITY: usize = 1;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Broadcast (fan-out) semantics.
    Broadcast { capacity: usize },
    /// MPSC (single-consumer queue) semantics.
    Mpsc { capacity: usize },
}

impl ChannelKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Broadcast { .. } => "broadcast",
            Self::Mpsc { .. } => "mpsc",
        }
    }
}

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

#[derive(Debug)]
struct MpscChannel<T> {
    sender: mpsc::Sender<Arc<T>>,
    /// Present until the single consumer claims it.
    receiver: Option<mpsc::Receiver<Arc<T>>>,
}

/// A thread-safe event bus with channels indexed by the [`TypeId`] of the event.
///
/// Broadcast channels fan events out to every subscriber; MPSC channels queue
/// events for exactly one consumer (workers draining a backlog).
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to an event of type `T` using broadcast with default capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if an MPSC channel was
    /// already registered for `T`.
    ///
    /// # Examples
    /// ```rust
    /// use whub_event_bus::{EventBus, EventReceiverExt};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct EntryAdded(u64);
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), whub_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe::<EntryAdded>()?;
    /// bus.publish(EntryAdded(1))?;
    /// assert_eq!(rx.recv().await.unwrap().0, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to an event of type `T` with a specific broadcast buffer capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if an MPSC channel was
    /// already registered for `T`, or [`EventBusError::InvalidCapacity`] if
    /// `capacity` is zero.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        Ok(self.broadcast_sender::<T>(validate_capacity(capacity)?)?.subscribe())
    }

    /// Publishes a shared event instance via broadcast.
    ///
    /// Returns the number of subscribers the event reached; an event with no
    /// active subscribers is dropped, not an error.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if an MPSC channel was
    /// already registered for `T`.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance via broadcast without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if an MPSC channel was
    /// already registered for `T`.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;

        sender.send(event).map_or_else(
            |_| {
                trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
                Ok(0)
            },
            |count| {
                trace!(event = type_name::<T>(), count, "Event dispatched");
                Ok(count)
            },
        )
    }

    /// Claims the single consumer side of a bounded MPSC channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::ReceiverTaken`] if the receiver was already
    /// claimed, [`EventBusError::ChannelKindMismatch`] if a broadcast channel
    /// was already registered for `T`, or [`EventBusError::InvalidCapacity`]
    /// if `capacity` is zero.
    pub fn subscribe_mpsc<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        self.with_mpsc::<T, _>(capacity, |chan| {
            chan.receiver.take().ok_or(EventBusError::ReceiverTaken { event: type_name::<T>() })
        })
    }

    /// Publishes to a bounded MPSC channel (queue semantics).
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelFull`] if the queue is at capacity, or
    /// [`EventBusError::ChannelKindMismatch`] if a broadcast channel was
    /// already registered for `T`.
    pub fn publish_mpsc<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        self.publish_mpsc_arc(Arc::new(event))
    }

    /// Publishes to a bounded MPSC channel without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelFull`] if the queue is at capacity, or
    /// [`EventBusError::ChannelKindMismatch`] if a broadcast channel was
    /// already registered for `T`.
    pub fn publish_mpsc_arc<T: Event>(&self, event: Arc<T>) -> Result<(), EventBusError> {
        let sender = self.with_mpsc::<T, _>(DEFAULT_CAPACITY, |chan| Ok(chan.sender.clone()))?;
        sender.try_send(event).map_err(|_| EventBusError::ChannelFull { event: type_name::<T>() })
    }

    /// Gracefully shuts down the bus by dropping all underlying channels.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();
        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), capacity, "Initializing new broadcast channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState {
                kind: ChannelKind::Broadcast { capacity },
                sender: Box::new(tx),
            }
        });

        match state.kind {
            ChannelKind::Broadcast { capacity: existing } => {
                if existing != capacity {
                    warn!(
                        event = type_name::<T>(),
                        existing_capacity = existing,
                        requested_capacity = capacity,
                        "Broadcast channel already initialized with a different capacity"
                    );
                }
                state
                    .sender
                    .downcast_ref::<broadcast::Sender<Arc<T>>>()
                    .cloned()
                    .ok_or(EventBusError::TypeMismatch { event: type_name::<T>() })
            },
            other => Err(EventBusError::ChannelKindMismatch {
                event: type_name::<T>(),
                expected: "broadcast",
                found: other.name(),
            }),
        }
    }

    fn with_mpsc<T: Event, R>(
        &self,
        capacity: usize,
        access: impl FnOnce(&mut MpscChannel<T>) -> Result<R, EventBusError>,
    ) -> Result<R, EventBusError> {
        let id = TypeId::of::<T>();
        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), capacity, "Initializing new mpsc channel");
            let (tx, rx) = mpsc::channel::<Arc<T>>(capacity);
            ChannelState {
                kind: ChannelKind::Mpsc { capacity },
                sender: Box::new(MpscChannel { sender: tx, receiver: Some(rx) }),
            }
        });

        match state.kind {
            ChannelKind::Mpsc { capacity: existing } => {
                if existing != capacity {
                    warn!(
                        event = type_name::<T>(),
                        existing_capacity = existing,
                        requested_capacity = capacity,
                        "MPSC channel already initialized with a different capacity"
                    );
                }
                let chan = state
                    .sender
                    .downcast_mut::<MpscChannel<T>>()
                    .ok_or(EventBusError::TypeMismatch { event: type_name::<T>() })?;
                access(chan)
            },
            other => Err(EventBusError::ChannelKindMismatch {
                event: type_name::<T>(),
                expected: "mpsc",
                found: other.name(),
            }),
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity { requested: capacity, minimum: MIN_CAPACITY });
    }
    Ok(capacity)
}
