//! Errors raised by structural layout operations
//!
//! Every variant is a precondition failure: the operation that returned it
//! made no change to the workspace. Handlers turn them into user notices via
//! `user_message()`.

use crate::model::{CellId, NodeId};

/// Why a structural operation was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The operation needs an active cell and there is none
    NoActiveCell,
    /// Nothing (cell or floating panel) is active
    NoActiveTarget,
    /// Split count of zero
    InvalidCount(usize),
    /// The active cell has no cell siblings to merge with
    NothingToMerge,
    /// A floating panel already exists
    FloatingExists,
    /// Undock source has no content
    EmptySource,
    /// No floating panel exists
    NoFloating,
    /// Another cell is already fullscreen
    FullscreenBusy(CellId),
    /// The operation is unavailable while a floating panel exists
    FloatingOpen,
    /// A node id does not resolve to a live node
    UnknownNode(NodeId),
    /// The node is not attached where the operation expects it
    Detached(NodeId),
}

impl LayoutError {
    /// Notice text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::NoActiveCell => "Please click on a cell first.".to_string(),
            Self::NoActiveTarget => "Nothing is active.".to_string(),
            Self::InvalidCount(_) => "Invalid number.".to_string(),
            Self::NothingToMerge => "No other cells to merge with.".to_string(),
            Self::FloatingExists => {
                "Only one undocked panel is supported. Dock it before undocking another."
                    .to_string()
            }
            Self::EmptySource => "The active panel is empty.".to_string(),
            Self::NoFloating => "There is no undocked panel.".to_string(),
            Self::FullscreenBusy(_) => "Another panel is already fullscreen.".to_string(),
            Self::FloatingOpen => "Dock or close the undocked panel first.".to_string(),
            Self::UnknownNode(node) | Self::Detached(node) => {
                format!("Layout node {:?} is no longer available.", node)
            }
        }
    }
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveCell => write!(f, "no active cell"),
            Self::NoActiveTarget => write!(f, "no active target"),
            Self::InvalidCount(count) => write!(f, "invalid split count: {}", count),
            Self::NothingToMerge => write!(f, "fewer than two cells to merge"),
            Self::FloatingExists => write!(f, "a floating panel already exists"),
            Self::EmptySource => write!(f, "undock source is empty"),
            Self::NoFloating => write!(f, "no floating panel"),
            Self::FullscreenBusy(id) => write!(f, "cell {:?} is already fullscreen", id),
            Self::FloatingOpen => write!(f, "a floating panel is open"),
            Self::UnknownNode(node) => write!(f, "unknown node {:?}", node),
            Self::Detached(node) => write!(f, "node {:?} is detached", node),
        }
    }
}

impl std::error::Error for LayoutError {}
