//! Observable - synchronous publish/subscribe
//!
//! Delivery works on a snapshot. `notify_observers` copies the subscriber
//! list before calling anyone, so observers may subscribe or unsubscribe from
//! inside a callback. Those changes take effect from the next notification.
//!
//! A panicking observer unwinds out of `notify_observers` and the rest of
//! that pass is skipped. No borrow is held across callbacks, so the
//! observable stays usable afterwards.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Token returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<E> = Rc<dyn Fn(&E)>;

/// Fan-out of events of type `E` to subscribed observers
pub struct Observable<E> {
    observers: RefCell<Vec<(SubscriptionId, Observer<E>)>>,
    next_id: Cell<u64>,
}

impl<E> Observable<E> {
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register an observer
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        tracing::trace!("Subscribed observer {:?}", id);
        id
    }

    /// Remove an observer; returns `false` if it was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        match observers.iter().position(|(sub, _)| *sub == id) {
            Some(pos) => {
                observers.remove(pos);
                tracing::trace!("Unsubscribed observer {:?}", id);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every observer subscribed right now, in order
    pub fn notify_observers(&self, event: &E) {
        let snapshot: Vec<Observer<E>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();

        tracing::trace!("Notifying {} observers", snapshot.len());
        for observer in snapshot {
            observer(event);
        }
    }

    /// Number of subscribed observers
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }

    /// Drop every observer
    pub fn clear(&self) {
        self.observers.borrow_mut().clear();
    }
}

impl<E> Default for Observable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.len())
            .finish()
    }
}
