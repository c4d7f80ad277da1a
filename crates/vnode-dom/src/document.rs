//! Document - capability set of a live document runtime

use std::fmt::Debug;

use crate::Listener;

/// Live document runtime
///
/// Anything that can create elements, set attributes, build a child list and
/// route named events to listeners can host rendered virtual nodes.
pub trait Document {
    /// Handle to a live element
    type Element: Clone + Debug + 'static;
    /// Failure reported by the runtime
    type Error: std::error::Error;

    /// Create a detached element with the given tag name
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, Self::Error>;

    /// Tag name of an element
    fn tag_name(&self, element: &Self::Element) -> Option<&str>;

    /// Set (or overwrite) an attribute
    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// Read an attribute
    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<&str>;

    /// Append `child` as the last child of `parent`
    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), Self::Error>;

    /// Number of children
    fn child_count(&self, element: &Self::Element) -> usize;

    /// Child at position `index`
    fn child_at(&self, element: &Self::Element, index: usize) -> Option<Self::Element>;

    /// Register a listener for `event_type`
    fn add_event_listener(
        &mut self,
        element: &Self::Element,
        event_type: &str,
        listener: Listener<Self::Element>,
    ) -> Result<(), Self::Error>;

    /// Deregister a listener; no effect if it was never registered
    fn remove_event_listener(
        &mut self,
        element: &Self::Element,
        event_type: &str,
        listener: &Listener<Self::Element>,
    );

    /// Fire `event_type` on `element`, returning how many listeners ran
    ///
    /// The count is per registered listener. A forwarding listener whose target
    /// has been released still counts, even though nothing downstream runs.
    fn dispatch_event(&self, element: &Self::Element, event_type: &str) -> usize;

    /// Shorthand for dispatching a `click`
    fn click(&self, element: &Self::Element) -> usize {
        self.dispatch_event(element, "click")
    }
}
