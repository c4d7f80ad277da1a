//! DOM Observable
//!
//! Bridges native events fired on rendered nodes into an [`Observable`]
//! stream of normalized [`DomEvent`] records.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use vnode_dom::{Document, Listener, NativeEvent};

use crate::{ElementNode, Observable, SubscriptionId};

/// Normalized document event
///
/// Serializes as `{"type": ..., "target": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomEvent<T> {
    #[serde(rename = "type")]
    pub event_type: String,
    /// Native target, carried as-is
    pub target: T,
}

impl<T: Clone> From<&NativeEvent<T>> for DomEvent<T> {
    fn from(event: &NativeEvent<T>) -> Self {
        Self {
            event_type: event.event_type.clone(),
            target: event.target.clone(),
        }
    }
}

/// Observable of document events
pub struct DomObservable<D: Document> {
    inner: Rc<Observable<DomEvent<D::Element>>>,
}

impl<D: Document> DomObservable<D> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Observable::new()),
        }
    }

    /// Forward every `event_type` fired on `node`'s rendered elements
    ///
    /// Each call installs one more bridge, so binding the same type twice
    /// yields two notifications per firing. The bridge is returned so it can
    /// be taken off again with
    /// [`ElementNode::remove_native_event_listener`]. Bridges only hold the
    /// observable weakly and go quiet once it is dropped.
    pub fn bind_event(&self, node: &mut ElementNode<D>, event_type: &str) -> Listener<D::Element> {
        let observable = Rc::downgrade(&self.inner);
        let bridge = Listener::new(move |event: &NativeEvent<D::Element>| {
            if let Some(observable) = observable.upgrade() {
                observable.notify_observers(&DomEvent::from(event));
            }
        });

        tracing::debug!("Bound {} on {} <{}>", event_type, node.id(), node.tag());
        node.add_native_event_listener(event_type, bridge.clone());
        bridge
    }

    /// Inject an event by hand, bypassing any native binding
    pub fn notify_event(&self, event: &DomEvent<D::Element>) {
        self.inner.notify_observers(event);
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&DomEvent<D::Element>) + 'static,
    {
        self.inner.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    pub fn notify_observers(&self, event: &DomEvent<D::Element>) {
        self.inner.notify_observers(event);
    }

    /// Underlying observable
    pub fn observable(&self) -> &Observable<DomEvent<D::Element>> {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<D: Document> Default for DomObservable<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> fmt::Debug for DomObservable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomObservable")
            .field("observers", &self.inner.len())
            .finish()
    }
}
