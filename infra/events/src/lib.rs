//! # Event Bus
//!
//! A small, type-safe broadcast bus that lets feature slices react to each other's
//! domain events without compile-time coupling.
//!
//! * Events are identified by their Rust type and shared as `Arc<T>`.
//! * Publishing is fire-and-forget; events with no subscribers are dropped.
//! * [`spawn_listener`] runs a handler per event on a background task and logs failures.
//!
//! # Example
//!
//! ```rust
//! use atelier_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Debug)]
//! struct ProductRequested { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<ProductRequested>()?;
//!     bus.publish(ProductRequested { id: 42 })?;
//!
//!     if let Some(event) = EventReceiverExt::recv(&mut rx).await {
//!         assert_eq!(event.id, 42);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod listener;
mod receiver;

pub use bus::{DEFAULT_CAPACITY, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use listener::spawn_listener;
pub use receiver::EventReceiverExt;
