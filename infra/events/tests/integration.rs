use atelier_event_bus::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
struct QuoteRequested(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
struct ContactSubmitted(usize);

#[tokio::test]
async fn published_event_reaches_subscriber() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<QuoteRequested>().unwrap();

    let delivered = bus.publish(QuoteRequested(42)).unwrap();
    assert_eq!(delivered, 1);

    let received = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(*received, QuoteRequested(42));
}

#[tokio::test]
async fn publishing_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(QuoteRequested(1)).unwrap(), 0);
    assert_eq!(bus.subscriber_count::<QuoteRequested>(), 0);
}

#[tokio::test]
async fn every_subscriber_gets_a_copy() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<QuoteRequested>().unwrap();
    let mut rx2 = bus.subscribe::<QuoteRequested>().unwrap();
    assert_eq!(bus.subscriber_count::<QuoteRequested>(), 2);

    bus.publish(QuoteRequested(100)).unwrap();

    let a = EventReceiverExt::recv(&mut rx1).await.unwrap();
    let b = EventReceiverExt::recv(&mut rx2).await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut quotes = bus.subscribe::<QuoteRequested>().unwrap();
    let mut contacts = bus.subscribe::<ContactSubmitted>().unwrap();

    bus.publish(QuoteRequested(7)).unwrap();
    bus.publish(ContactSubmitted(13)).unwrap();

    assert_eq!(EventReceiverExt::recv(&mut quotes).await.unwrap().0, 7);
    assert_eq!(EventReceiverExt::recv(&mut contacts).await.unwrap().0, 13);
}

#[tokio::test]
async fn lagged_receiver_skips_to_retained_events() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<QuoteRequested>(capacity).unwrap();

    let total = 100;
    for i in 0..total {
        bus.publish(QuoteRequested(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.expect("recovers from lag");
    assert!(first.0 >= total - capacity, "got {}", first.0);

    let second = EventReceiverExt::recv(&mut rx).await.expect("keeps receiving");
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<QuoteRequested>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}

#[tokio::test]
async fn shutdown_closes_all_channels() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<QuoteRequested>().unwrap();
    let _other = bus.subscribe::<ContactSubmitted>().unwrap();

    assert_eq!(bus.shutdown(), 2);
    assert!(EventReceiverExt::recv(&mut rx).await.is_none());
}

#[tokio::test]
async fn listener_survives_handler_failures() {
    let bus = EventBus::new();
    let handled = Arc::new(AtomicUsize::new(0));

    let counter = handled.clone();
    let task = spawn_listener(&bus, "test", move |event: Arc<QuoteRequested>| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            if event.0 % 2 == 0 { Err("even numbers are rejected") } else { Ok(()) }
        }
    })
    .unwrap();

    for i in 0..4 {
        bus.publish(QuoteRequested(i)).unwrap();
    }

    tokio::time::timeout(Duration::from_secs(2), async {
        while handled.load(Ordering::SeqCst) < 4 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("all events handled");

    bus.shutdown();
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("listener stops after shutdown")
        .unwrap();
}
