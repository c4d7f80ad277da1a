//! vnode DOM - Live document boundary
//!
//! The capability set a live document runtime must provide so virtual nodes
//! can be materialized into it, plus an arena-backed in-memory runtime.

mod config;
mod document;
mod listener;
mod memory;

pub use config::DocumentConfig;
pub use document::Document;
pub use listener::{Listener, NativeEvent};
pub use memory::MemoryDocument;

use serde::{Deserialize, Serialize};

/// Handle to a live element in a [`MemoryDocument`] (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised by [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Invalid character in name: {0:?}")]
    InvalidCharacter(String),

    #[error("Unknown element: {0:?}")]
    UnknownElement(ElementId),

    #[error("Hierarchy request: cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: ElementId, child: ElementId },

    #[error("Element arena is full")]
    ArenaFull,
}
