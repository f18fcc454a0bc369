//! Synchronous, type-keyed event bus
//!
//! Listeners subscribe to one concrete event type and are invoked in
//! subscription order at the moment the event is published. A failing listener
//! is logged and counted but never stops delivery to its siblings.
//!
//! Handler objects can register several methods at once with
//! [`event_handlers!`](crate::event_handlers), which expands to ordinary
//! [`EventBus::subscribe`] calls and returns a [`HandlerGroup`] for bulk removal.

mod engine_events;

pub use engine_events::{StateChangeRequested, UiButtonClicked};

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use thiserror::Error;

/// Marker for values that can travel over the [`EventBus`]
pub trait Event: 'static {}

/// Error returned by a listener
#[derive(Debug, Error)]
pub enum EventError {
    /// The listener could not handle the event
    #[error("listener failed: {reason}")]
    Listener {
        /// What went wrong
        reason: String,
    },

    /// The handler object was already borrowed when the event arrived
    #[error("handler for {event} is already borrowed")]
    HandlerBusy {
        /// Type name of the undelivered event
        event: &'static str,
    },
}

impl EventError {
    /// Shorthand for [`EventError::Listener`]
    pub fn listener(reason: impl Into<String>) -> Self {
        Self::Listener { reason: reason.into() }
    }
}

/// Identifies one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Outcome of a single [`EventBus::publish`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Listeners that handled the event
    pub delivered: usize,
    /// Listeners that returned an error
    pub failed: usize,
}

impl DeliveryReport {
    /// Whether any listener saw the event
    pub const fn was_heard(&self) -> bool {
        self.delivered + self.failed > 0
    }
}

type Listener<E> = Box<dyn FnMut(&E) -> Result<(), EventError>>;

struct ListenerSlot {
    id: ListenerId,
    // Always a `Listener<E>` for the `E` this slot is filed under
    callback: Box<dyn Any>,
}

/// Subscriptions made together through [`event_handlers!`](crate::event_handlers)
#[derive(Debug, Default)]
#[must_use = "dropping a HandlerGroup leaves its listeners registered with no way to remove them as a group"]
pub struct HandlerGroup {
    entries: Vec<(TypeId, ListenerId)>,
}

impl HandlerGroup {
    /// Empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a subscription for event type `E`
    pub fn push<E: Event>(&mut self, id: ListenerId) {
        self.entries.push((TypeId::of::<E>(), id));
    }

    /// Number of subscriptions in the group
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group holds no subscriptions
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Synchronous publish/subscribe channel
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<TypeId, Vec<ListenerSlot>>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.listeners.len())
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for events of exactly type `E`
    pub fn subscribe<E, F>(&mut self, listener: F) -> ListenerId
    where
        E: Event,
        F: FnMut(&E) -> Result<(), EventError> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let callback: Listener<E> = Box::new(listener);
        self.listeners
            .entry(TypeId::of::<E>())
            .or_default()
            .push(ListenerSlot {
                id,
                callback: Box::new(callback),
            });
        log::debug!("Subscribed listener {} to {}", id.0, type_name::<E>());
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed to `E`.
    pub fn unsubscribe<E: Event>(&mut self, id: ListenerId) -> bool {
        self.remove_listener(TypeId::of::<E>(), id)
    }

    /// Remove every listener of a group. Returns how many were removed.
    pub fn unregister_group(&mut self, group: HandlerGroup) -> usize {
        group
            .entries
            .into_iter()
            .filter(|&(type_id, id)| self.remove_listener(type_id, id))
            .count()
    }

    fn remove_listener(&mut self, type_id: TypeId, id: ListenerId) -> bool {
        let Some(slots) = self.listeners.get_mut(&type_id) else {
            return false;
        };
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        let removed = slots.len() != before;
        if slots.is_empty() {
            self.listeners.remove(&type_id);
        }
        removed
    }

    /// Deliver an event to every listener of its type, in subscription order
    pub fn publish<E: Event>(&mut self, event: &E) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let Some(slots) = self.listeners.get_mut(&TypeId::of::<E>()) else {
            log::trace!("No listeners for {}", type_name::<E>());
            return report;
        };

        for slot in slots.iter_mut() {
            let Some(listener) = slot.callback.downcast_mut::<Listener<E>>() else {
                log::error!("Listener {} is filed under the wrong event type", slot.id.0);
                report.failed += 1;
                continue;
            };
            match listener(event) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    log::warn!("Listener {} failed on {}: {err}", slot.id.0, type_name::<E>());
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Number of listeners subscribed to `E`
    pub fn listener_count<E: Event>(&self) -> usize {
        self.listeners.get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Subscribe several methods of a shared handler object in one go.
///
/// ```ignore
/// let group = event_handlers!(&mut bus, menu, {
///     UiButtonClicked => on_button_clicked,
///     StateChangeRequested => on_state_change,
/// });
/// ```
///
/// `menu` must be an `Rc<RefCell<T>>` and every method must have the
/// signature `fn(&mut self, &Event) -> Result<(), EventError>`. Listeners are
/// registered in the listed order.
#[macro_export]
macro_rules! event_handlers {
    ($bus:expr, $handler:expr, { $( $event:ty => $method:ident ),+ $(,)? }) => {{
        let bus: &mut $crate::events::EventBus = $bus;
        let handler = &$handler;
        let mut group = $crate::events::HandlerGroup::new();
        $(
            {
                let target = ::std::rc::Rc::clone(handler);
                let id = bus.subscribe::<$event, _>(move |event: &$event| {
                    target
                        .try_borrow_mut()
                        .map_err(|_| $crate::events::EventError::HandlerBusy {
                            event: ::std::any::type_name::<$event>(),
                        })?
                        .$method(event)
                });
                group.push::<$event>(id);
            }
        )+
        group
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Ping(u32);
    impl Event for Ping {}

    #[derive(Debug)]
    struct Pong;
    impl Event for Pong {}

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |ping: &Ping| {
                log.borrow_mut().push(format!("{tag}:{}", ping.0));
                Ok(())
            });
        }

        let report = bus.publish(&Ping(7));
        assert_eq!(report, DeliveryReport { delivered: 3, failed: 0 });
        assert_eq!(*log.borrow(), vec!["first:7", "second:7", "third:7"]);
    }

    #[test]
    fn test_exact_type_dispatch() {
        let mut bus = EventBus::new();
        let pongs = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&pongs);
        bus.subscribe(move |_: &Pong| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        let report = bus.publish(&Ping(1));
        assert!(!report.was_heard());
        assert_eq!(*pongs.borrow(), 0);
    }

    #[test]
    fn test_failing_listener_is_isolated() {
        let mut bus = EventBus::new();
        let reached = Rc::new(RefCell::new(false));

        bus.subscribe(|_: &Ping| Err(EventError::listener("boom")));
        let flag = Rc::clone(&reached);
        bus.subscribe(move |_: &Ping| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        let report = bus.publish(&Ping(0));
        assert_eq!(report, DeliveryReport { delivered: 1, failed: 1 });
        assert!(*reached.borrow());
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_: &Ping| Ok(()));
        assert_eq!(bus.listener_count::<Ping>(), 1);

        assert!(!bus.unsubscribe::<Pong>(id));
        assert!(bus.unsubscribe::<Ping>(id));
        assert!(!bus.unsubscribe::<Ping>(id));
        assert_eq!(bus.publish(&Ping(0)).delivered, 0);
    }

    #[derive(Default)]
    struct Recorder {
        pings: Vec<u32>,
        pongs: usize,
    }

    impl Recorder {
        fn on_ping(&mut self, ping: &Ping) -> Result<(), EventError> {
            self.pings.push(ping.0);
            Ok(())
        }

        fn on_pong(&mut self, _: &Pong) -> Result<(), EventError> {
            self.pongs += 1;
            Ok(())
        }
    }

    #[test]
    fn test_event_handlers_macro() {
        let mut bus = EventBus::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));

        let group = crate::event_handlers!(&mut bus, recorder, {
            Ping => on_ping,
            Pong => on_pong,
        });
        assert_eq!(group.len(), 2);

        bus.publish(&Ping(4));
        bus.publish(&Pong);
        bus.publish(&Ping(5));
        assert_eq!(recorder.borrow().pings, vec![4, 5]);
        assert_eq!(recorder.borrow().pongs, 1);

        assert_eq!(bus.unregister_group(group), 2);
        bus.publish(&Ping(6));
        assert_eq!(recorder.borrow().pings, vec![4, 5]);
    }

    #[test]
    fn test_borrowed_handler_reports_busy() {
        let mut bus = EventBus::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let sibling_hits = Rc::new(RefCell::new(0));

        let group = crate::event_handlers!(&mut bus, recorder, {
            Ping => on_ping,
        });
        let hits = Rc::clone(&sibling_hits);
        bus.subscribe(move |_: &Ping| {
            *hits.borrow_mut() += 1;
            Ok(())
        });

        {
            let held = recorder.borrow_mut();
            let report = bus.publish(&Ping(9));
            assert_eq!(report, DeliveryReport { delivered: 1, failed: 1 });
            assert!(held.pings.is_empty());
        }
        assert_eq!(*sibling_hits.borrow(), 1);

        let report = bus.publish(&Ping(10));
        assert_eq!(report, DeliveryReport { delivered: 2, failed: 0 });
        assert_eq!(recorder.borrow().pings, vec![10]);
        assert_eq!(bus.unregister_group(group), 1);
    }
}
