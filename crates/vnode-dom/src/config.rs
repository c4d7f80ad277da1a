//! Document Configuration

/// In-memory document configuration options
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Normalize tag names to lowercase (HTML documents do)
    pub lowercase_tag_names: bool,

    /// Ignore a second registration of the same listener for the same type
    pub dedupe_listeners: bool,

    /// Propagate dispatched events up the ancestor chain
    pub bubble_events: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            lowercase_tag_names: true,
            dedupe_listeners: true,
            bubble_events: true,
        }
    }
}
