//! Element Node - virtual representation of one renderable element
//!
//! A node owns its children outright. Detaching a child (remove, replace,
//! `set_children`) hands it back to the caller by value, so a subtree can
//! never hang off two parents at once.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use vnode_dom::{Document, Listener};

use crate::{NodeId, Props};

/// One listener registration
///
/// Documents never see the caller's listener directly. They get `bound`, which
/// forwards through `slot`. Removing the registration empties the slot, which
/// silences every element the node has rendered so far and releases the
/// caller's callback. Those elements still hold the (now empty) bound listener.
struct Registration<E> {
    listener: Listener<E>,
    bound: Listener<E>,
    slot: Rc<RefCell<Option<Listener<E>>>>,
}

impl<E: 'static> Registration<E> {
    fn new(listener: Listener<E>) -> Self {
        let slot = Rc::new(RefCell::new(Some(listener.clone())));
        let target = Rc::clone(&slot);
        let bound = Listener::new(move |event| {
            // Release the borrow before calling out
            let current = target.borrow().clone();
            if let Some(listener) = current {
                listener.call(event);
            }
        });
        Self { listener, bound, slot }
    }

    fn detach(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Virtual element node
pub struct ElementNode<D: Document> {
    id: NodeId,
    tag: String,
    props: Props,
    children: Vec<ElementNode<D>>,
    listeners: BTreeMap<String, Vec<Registration<D::Element>>>,
}

impl<D: Document> ElementNode<D> {
    /// Create a node with no props and no children
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_children(tag, Props::new(), Vec::new())
    }

    /// Create a node with props and no children
    pub fn with_props(tag: impl Into<String>, props: Props) -> Self {
        Self::with_children(tag, props, Vec::new())
    }

    /// Create a node with props and children
    pub fn with_children(
        tag: impl Into<String>,
        props: Props,
        children: Vec<ElementNode<D>>,
    ) -> Self {
        Self {
            id: NodeId::next(),
            tag: tag.into(),
            props,
            children,
            listeners: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Element tag name
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    // ---- Children ----

    pub fn children(&self) -> &[ElementNode<D>] {
        &self.children
    }

    /// Direct child by identity
    pub fn child(&self, id: NodeId) -> Option<&ElementNode<D>> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Direct child by identity, mutably
    pub fn child_mut(&mut self, id: NodeId) -> Option<&mut ElementNode<D>> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    pub fn contains_child(&self, id: NodeId) -> bool {
        self.position(id).is_some()
    }

    /// Append a child
    pub fn add_child(&mut self, child: ElementNode<D>) {
        tracing::trace!("{} add child {}", self.id, child.id);
        self.children.push(child);
    }

    /// Detach the first child with this id and return it
    ///
    /// Returns `None` and leaves the list untouched if there is no such child.
    pub fn remove_child(&mut self, id: NodeId) -> Option<ElementNode<D>> {
        let pos = self.position(id)?;
        tracing::trace!("{} remove child {}", self.id, id);
        Some(self.children.remove(pos))
    }

    /// Put `new_child` in the slot held by `old_id`
    ///
    /// On success the displaced child is returned in `Ok`. If `old_id` is not a
    /// child nothing changes and `new_child` comes back in `Err`; it is never
    /// appended.
    pub fn replace_child(
        &mut self,
        new_child: ElementNode<D>,
        old_id: NodeId,
    ) -> Result<ElementNode<D>, ElementNode<D>> {
        match self.position(old_id) {
            Some(pos) => {
                tracing::trace!("{} replace child {} with {}", self.id, old_id, new_child.id);
                Ok(std::mem::replace(&mut self.children[pos], new_child))
            }
            None => Err(new_child),
        }
    }

    /// Replace the whole child list, returning the previous children
    pub fn set_children(&mut self, children: Vec<ElementNode<D>>) -> Vec<ElementNode<D>> {
        std::mem::replace(&mut self.children, children)
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    // ---- Props ----

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    /// Replace all props
    pub fn set_props(&mut self, props: Props) {
        self.props = props;
    }

    /// Merge `partial` into the current props
    pub fn update_props(&mut self, partial: Props) {
        self.props.merge(partial);
    }

    // ---- Event listeners ----

    /// Register a listener for `event_type`
    ///
    /// Registering the same listener twice for one type is a no-op and
    /// returns `false`.
    pub fn add_native_event_listener(
        &mut self,
        event_type: &str,
        listener: Listener<D::Element>,
    ) -> bool {
        let registrations = self.listeners.entry(event_type.to_string()).or_default();
        if registrations.iter().any(|r| r.listener.ptr_eq(&listener)) {
            return false;
        }
        tracing::debug!("{} <{}> listen {}", self.id, self.tag, event_type);
        registrations.push(Registration::new(listener));
        true
    }

    /// Deregister a listener
    ///
    /// The listener also stops firing on elements rendered before the call.
    /// Returns `false` if it was not registered.
    pub fn remove_native_event_listener(
        &mut self,
        event_type: &str,
        listener: &Listener<D::Element>,
    ) -> bool {
        let Some(registrations) = self.listeners.get_mut(event_type) else {
            return false;
        };
        let Some(pos) = registrations.iter().position(|r| r.listener.ptr_eq(listener)) else {
            return false;
        };

        let registration = registrations.remove(pos);
        registration.detach();
        if registrations.is_empty() {
            self.listeners.remove(event_type);
        }
        tracing::debug!("{} <{}> unlisten {}", self.id, self.tag, event_type);
        true
    }

    pub fn has_native_event_listener(
        &self,
        event_type: &str,
        listener: &Listener<D::Element>,
    ) -> bool {
        self.listeners
            .get(event_type)
            .is_some_and(|regs| regs.iter().any(|r| r.listener.ptr_eq(listener)))
    }

    /// Number of listeners registered for `event_type`
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }

    /// Attach every registered listener to `element`
    pub fn apply_event_listeners(&self, doc: &mut D, element: &D::Element) -> Result<(), D::Error> {
        for (event_type, registrations) in &self.listeners {
            for registration in registrations {
                doc.add_event_listener(element, event_type, registration.bound.clone())?;
            }
        }
        Ok(())
    }

    // ---- Rendering ----

    /// Materialize this subtree into `doc`
    ///
    /// Every call creates a fresh live element; nothing is cached. Failures from
    /// the document are returned as-is.
    pub fn render(&self, doc: &mut D) -> Result<D::Element, D::Error> {
        tracing::trace!("Rendering <{}> {}", self.tag, self.id);

        let element = doc.create_element(&self.tag)?;
        for (name, value) in self.props.iter() {
            doc.set_attribute(&element, name, value)?;
        }
        for child in &self.children {
            let live = child.render(doc)?;
            doc.append_child(&element, &live)?;
        }
        self.apply_event_listeners(doc, &element)?;

        Ok(element)
    }
}

impl<D: Document> fmt::Debug for ElementNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: BTreeMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("ElementNode")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("props", &self.props)
            .field("children", &self.children)
            .field("listeners", &listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use vnode_dom::{DomError, ElementId, MemoryDocument, NativeEvent};

    type Node = ElementNode<MemoryDocument>;

    fn counter() -> (Rc<Cell<u32>>, Listener<ElementId>) {
        let hits = Rc::new(Cell::new(0));
        let c = Rc::clone(&hits);
        let listener = Listener::new(move |_: &NativeEvent<ElementId>| c.set(c.get() + 1));
        (hits, listener)
    }

    #[test]
    fn test_duplicate_listener_is_idempotent() {
        let mut node = Node::new("button");
        let (hits, listener) = counter();

        assert!(node.add_native_event_listener("click", listener.clone()));
        assert!(!node.add_native_event_listener("click", listener.clone()));
        assert_eq!(node.listener_count("click"), 1);

        let mut doc = MemoryDocument::new();
        let el = node.render(&mut doc).unwrap();
        doc.click(&el);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_apply_twice_does_not_double_fire() {
        let mut node = Node::new("div");
        let (hits, listener) = counter();
        node.add_native_event_listener("click", listener);

        let mut doc = MemoryDocument::new();
        let el = doc.create_element("div").unwrap();
        node.apply_event_listeners(&mut doc, &el).unwrap();
        node.apply_event_listeners(&mut doc, &el).unwrap();

        assert_eq!(doc.click(&el), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_remove_clears_empty_type() {
        let mut node = Node::new("div");
        let (_, listener) = counter();
        node.add_native_event_listener("click", listener.clone());

        assert!(node.remove_native_event_listener("click", &listener));
        assert!(!node.remove_native_event_listener("click", &listener));
        assert!(!node.has_native_event_listener("click", &listener));
        assert!(node.listeners.is_empty());
    }

    #[test]
    fn test_render_error_propagates() {
        let mut node = Node::new("div");
        node.add_child(Node::new("not a tag"));

        let mut doc = MemoryDocument::new();
        assert_eq!(
            node.render(&mut doc).unwrap_err(),
            DomError::InvalidCharacter("not a tag".to_string())
        );
    }

    #[test]
    fn test_debug_output() {
        let node = Node::with_props("p", Props::from([("class", "lead")]));
        let text = format!("{:?}", node);
        assert!(text.contains("ElementNode"));
        assert!(text.contains("lead"));
    }
}
