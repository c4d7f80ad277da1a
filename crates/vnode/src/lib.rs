//! vnode - Virtual element nodes
//!
//! A lightweight in-memory tree mirroring renderable elements. Nodes are
//! edited freely and materialized into any [`Document`] on demand, with their
//! event listeners reattached on every render. [`DomObservable`] turns native
//! events on those elements into a notification stream.
//!
//! # Example
//! ```rust
//! use vnode::{ElementNode, Props};
//! use vnode::dom::{Document, MemoryDocument};
//!
//! let mut doc = MemoryDocument::new();
//! let props = Props::from([("class", "menu")]);
//! let mut list = ElementNode::<MemoryDocument>::with_props("ul", props);
//! list.add_child(ElementNode::new("li"));
//!
//! let live = list.render(&mut doc)?;
//! assert_eq!(doc.child_count(&live), 1);
//! # Ok::<(), vnode::dom::DomError>(())
//! ```

mod dom_observable;
mod id;
mod node;
mod observable;
mod props;

pub use dom_observable::{DomEvent, DomObservable};
pub use id::NodeId;
pub use node::ElementNode;
pub use observable::{Observable, SubscriptionId};
pub use props::Props;

/// Live document boundary
pub use vnode_dom as dom;
pub use vnode_dom::{Document, Listener, NativeEvent};
