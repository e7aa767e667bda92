use crate::bus::{Event, EventBus};
use crate::error::EventBusError;
use crate::receiver::EventReceiverExt;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Subscribes to `T` and runs `handler` for every event on a background task.
///
/// Handler failures are logged at `warn` and never stop the listener. The task ends when
/// the bus is shut down.
///
/// # Errors
/// Fails only if the subscription cannot be created.
///
/// # Examples
/// ```rust
/// use atelier_event_bus::{EventBus, spawn_listener};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct ContactSubmitted(String);
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), atelier_event_bus::EventBusError> {
/// let bus = EventBus::new();
/// let task = spawn_listener(&bus, "contact-alert", |event: Arc<ContactSubmitted>| async move {
///     println!("new message: {}", event.0);
///     Ok::<(), String>(())
/// })?;
/// bus.publish(ContactSubmitted("hello".into()))?;
/// bus.shutdown();
/// task.await.unwrap();
/// # Ok(())
/// # }
/// ```
pub fn spawn_listener<T, F, Fut, E>(
    bus: &EventBus,
    name: &'static str,
    handler: F,
) -> Result<JoinHandle<()>, EventBusError>
where
    T: Event,
    F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let mut rx = bus.subscribe::<T>()?;

    Ok(tokio::spawn(async move {
        debug!(listener = name, event = std::any::type_name::<T>(), "Event listener started");
        while let Some(event) = EventReceiverExt::recv(&mut rx).await {
            if let Err(error) = handler(event).await {
                warn!(listener = name, %error, "Event listener failed");
            }
        }
        debug!(listener = name, "Event listener stopped");
    }))
}
