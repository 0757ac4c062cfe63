//! Content trees, panel identity and cleanup hooks
//!
//! A cell's content is an owned list of nodes. Structural operations move
//! content between containers; they never copy it.

use std::fmt;

/// A single node of panel content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Plain text
    Text(String),
    /// A nested element produced by a content module
    Element {
        tag: String,
        children: Vec<ContentNode>,
    },
    /// Visible stand-in for a panel that could not be loaded
    Placeholder { panel_type: String, reason: String },
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            tag: tag.into(),
            children,
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Element { children, .. } => {
                for child in children {
                    child.write_text(out);
                }
            }
            ContentNode::Placeholder { panel_type, reason } => {
                out.push_str(&format!("{} ({})", panel_type, reason));
            }
        }
    }
}

/// The content subtree installed into a cell or floating panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRoot {
    nodes: Vec<ContentNode>,
}

impl ContentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: ContentNode) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Move all nodes out, leaving this root empty
    pub fn take(&mut self) -> ContentRoot {
        std::mem::take(self)
    }

    /// Append another root's nodes after this root's nodes
    pub fn append(&mut self, mut other: ContentRoot) {
        self.nodes.append(&mut other.nodes);
    }

    /// Concatenated text of every node, in order
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_text(&mut out);
        }
        out
    }
}

/// Opaque key identifying which panel a cell shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelIdentity {
    pub id: String,
    pub class: String,
}

impl PanelIdentity {
    pub fn new(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
        }
    }
}

impl fmt::Display for PanelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.class)
    }
}

/// Callback a content module registers to release its resources.
///
/// Runs at most once. Dropping a hook that was never invoked is logged,
/// since it means a content module's timers or subscriptions leaked.
pub struct CleanupHook {
    callback: Option<Box<dyn FnOnce()>>,
}

impl CleanupHook {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Run the hook, consuming it
    pub fn invoke(mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }

    /// Drop the hook without running it
    pub fn discard(mut self) {
        self.callback = None;
    }
}

impl fmt::Debug for CleanupHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupHook")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

impl Drop for CleanupHook {
    fn drop(&mut self) {
        if self.callback.is_some() {
            tracing::warn!("cleanup hook dropped without being invoked");
        }
    }
}

/// Identity and cleanup of a panel, kept together so no operation can move
/// one without the other
#[derive(Debug)]
pub struct PanelBinding {
    pub identity: PanelIdentity,
    pub cleanup: Option<CleanupHook>,
}

impl PanelBinding {
    pub fn new(identity: PanelIdentity, cleanup: Option<CleanupHook>) -> Self {
        Self { identity, cleanup }
    }

    /// Invoke the cleanup hook (if any) and return the identity
    pub fn release(self) -> PanelIdentity {
        if let Some(cleanup) = self.cleanup {
            cleanup.invoke();
        }
        self.identity
    }

    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }
}
