//! Memory Document - arena-backed live document
//!
//! Elements live in a flat `Vec` and are addressed by [`ElementId`]
//! (4 bytes) instead of pointers. Parent/child links are ids as well, so the
//! whole document drops in one go.
//!
//! The arena is append-only: elements are never reclaimed, and every
//! `render` adds a fresh subtree. Keep a document scoped to one test or one
//! session and drop it when done. Creation fails with [`DomError::ArenaFull`]
//! once `u32` ids run out.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::{Document, DocumentConfig, DomError, ElementId, Listener, NativeEvent};

/// Element storage
#[derive(Debug)]
struct ElementData {
    tag: String,
    /// Attributes in insertion order
    attrs: Vec<Attribute>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    listeners: HashMap<String, Vec<Listener<ElementId>>>,
}

impl ElementData {
    fn new(tag: String) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        // Overwrite in place to keep attribute order stable
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

#[derive(Debug)]
struct Attribute {
    name: String,
    value: String,
}

/// In-memory live document
#[derive(Debug, Default)]
pub struct MemoryDocument {
    config: DocumentConfig,
    elements: Vec<ElementData>,
}

impl MemoryDocument {
    /// Create an empty document with default configuration
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create an empty document with the given configuration
    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    /// Document configuration
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Number of elements ever created
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if no element has been created
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Parent of an element, if attached
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.get(element)?.parent
    }

    /// Number of listeners registered on `element` for `event_type`
    pub fn listener_count(&self, element: ElementId, event_type: &str) -> usize {
        self.get(element)
            .and_then(|data| data.listeners.get(event_type))
            .map_or(0, Vec::len)
    }

    /// Serialize an element and its subtree as markup
    pub fn outer_html(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_html(element, &mut out);
        out
    }

    fn write_html(&self, element: ElementId, out: &mut String) {
        let Some(data) = self.get(element) else {
            return;
        };
        out.push('<');
        out.push_str(&data.tag);
        for attr in &data.attrs {
            let _ = write!(out, " {}=\"{}\"", attr.name, escape_attr(&attr.value));
        }
        out.push('>');
        for &child in &data.children {
            self.write_html(child, out);
        }
        let _ = write!(out, "</{}>", data.tag);
    }

    fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id.index())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.elements.get_mut(id.index())
    }

    fn require(&self, id: ElementId) -> Result<&ElementData, DomError> {
        self.get(id).ok_or_else(|| {
            tracing::debug!("Rejected unknown element {:?}", id);
            DomError::UnknownElement(id)
        })
    }

    fn require_mut(&mut self, id: ElementId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id).ok_or_else(|| {
            tracing::debug!("Rejected unknown element {:?}", id);
            DomError::UnknownElement(id)
        })
    }

    /// True if `ancestor` is `node` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|data| data.parent);
        }
        false
    }
}

impl Document for MemoryDocument {
    type Element = ElementId;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> Result<ElementId, DomError> {
        validate_name(tag)?;
        let tag = if self.config.lowercase_tag_names {
            tag.to_ascii_lowercase()
        } else {
            tag.to_string()
        };

        let index = u32::try_from(self.elements.len()).map_err(|_| {
            tracing::debug!("Rejected element {:?}: arena full", tag);
            DomError::ArenaFull
        })?;
        let id = ElementId(index);
        self.elements.push(ElementData::new(tag));
        Ok(id)
    }

    fn tag_name(&self, element: &ElementId) -> Option<&str> {
        self.get(*element).map(|data| data.tag.as_str())
    }

    fn set_attribute(
        &mut self,
        element: &ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        validate_name(name)?;
        self.require_mut(*element)?.set_attr(name, value);
        Ok(())
    }

    fn get_attribute(&self, element: &ElementId, name: &str) -> Option<&str> {
        self.get(*element)?.get_attr(name)
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) -> Result<(), DomError> {
        let (parent, child) = (*parent, *child);
        self.require(parent)?;
        let old_parent = self.require(child)?.parent;

        if self.is_inclusive_ancestor(child, parent) {
            tracing::debug!("Rejected append of {:?} into its own subtree {:?}", child, parent);
            return Err(DomError::HierarchyRequest { parent, child });
        }

        // Appending an attached element moves it
        if let Some(old) = old_parent {
            if let Some(data) = self.get_mut(old) {
                data.children.retain(|&c| c != child);
            }
        }

        self.require_mut(child)?.parent = Some(parent);
        self.require_mut(parent)?.children.push(child);
        Ok(())
    }

    fn child_count(&self, element: &ElementId) -> usize {
        self.get(*element).map_or(0, |data| data.children.len())
    }

    fn child_at(&self, element: &ElementId, index: usize) -> Option<ElementId> {
        self.get(*element)?.children.get(index).copied()
    }

    fn add_event_listener(
        &mut self,
        element: &ElementId,
        event_type: &str,
        listener: Listener<ElementId>,
    ) -> Result<(), DomError> {
        let dedupe = self.config.dedupe_listeners;
        let listeners = self
            .require_mut(*element)?
            .listeners
            .entry(event_type.to_string())
            .or_default();

        if dedupe && listeners.iter().any(|l| l.ptr_eq(&listener)) {
            return Ok(());
        }
        listeners.push(listener);
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        element: &ElementId,
        event_type: &str,
        listener: &Listener<ElementId>,
    ) {
        let Some(listeners) = self
            .get_mut(*element)
            .and_then(|data| data.listeners.get_mut(event_type))
        else {
            return;
        };
        if let Some(pos) = listeners.iter().position(|l| l.ptr_eq(listener)) {
            listeners.remove(pos);
        }
    }

    fn dispatch_event(&self, element: &ElementId, event_type: &str) -> usize {
        let target = *element;
        if self.get(target).is_none() {
            tracing::debug!("Dropped {} dispatched on unknown element {:?}", event_type, target);
            return 0;
        }

        let mut invoked = 0;
        let mut current = Some(target);
        while let Some(id) = current {
            let Some(data) = self.get(id) else {
                break;
            };

            // Snapshot: registrations made by a running listener apply to the next dispatch
            let snapshot: Vec<Listener<ElementId>> = data
                .listeners
                .get(event_type)
                .cloned()
                .unwrap_or_default();

            if !snapshot.is_empty() {
                let event = NativeEvent {
                    event_type: event_type.to_string(),
                    target,
                    current_target: id,
                };
                for listener in &snapshot {
                    listener.call(&event);
                    invoked += 1;
                }
            }

            if !self.config.bubble_events {
                break;
            }
            current = data.parent;
        }

        tracing::trace!("Dispatched {} on {:?} to {} listeners", event_type, target, invoked);
        invoked
    }
}

/// Reject names the markup could not round-trip
fn validate_name(name: &str) -> Result<(), DomError> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '=' | '"' | '\''));
    if invalid {
        tracing::debug!("Rejected invalid name {:?}", name);
        return Err(DomError::InvalidCharacter(name.to_string()));
    }
    Ok(())
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
