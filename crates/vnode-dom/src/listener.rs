//! Native event listeners
//!
//! Listeners are reference-counted callbacks compared by identity, the same
//! way a browser compares function references in `removeEventListener`.

use std::fmt;
use std::rc::Rc;

/// Event delivered by a live document to its native listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEvent<E> {
    /// Event type name (e.g. "click")
    pub event_type: String,
    /// Element the event was dispatched on
    pub target: E,
    /// Element whose listener is currently running
    pub current_target: E,
}

/// Native event callback
pub struct Listener<E>(Rc<dyn Fn(&NativeEvent<E>)>);

impl<E> Listener<E> {
    /// Wrap a closure as a listener
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&NativeEvent<E>) + 'static,
    {
        Self(Rc::new(callback))
    }

    /// Invoke the callback
    #[inline]
    pub fn call(&self, event: &NativeEvent<E>) {
        (self.0)(event)
    }

    /// Identity comparison: true if both handles point at the same callback
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
