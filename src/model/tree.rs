//! Container primitives - cells, rows and dividers
//!
//! These are plain data. All structural edits go through `Workspace`, which
//! owns every node in an arena keyed by the ids defined here.

use crate::geometry::Axis;
use crate::panel::{ContentRoot, PanelBinding, PanelIdentity};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

/// Unique identifier for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Unique identifier for a divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DividerId(pub u64);

/// A node that occupies space in a row: a cell or a nested row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Cell(CellId),
    Row(RowId),
}

impl From<CellId> for NodeId {
    fn from(id: CellId) -> Self {
        NodeId::Cell(id)
    }
}

impl From<RowId> for NodeId {
    fn from(id: RowId) -> Self {
        NodeId::Row(id)
    }
}

/// One entry of a row's child sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Node(NodeId),
    Divider(DividerId),
}

impl Slot {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Slot::Node(node) => Some(*node),
            Slot::Divider(_) => None,
        }
    }

    pub fn divider(&self) -> Option<DividerId> {
        match self {
            Slot::Divider(id) => Some(*id),
            Slot::Node(_) => None,
        }
    }
}

/// Owner of a child sequence: the workspace root or a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Row(RowId),
}

// ============================================================================
// Cell
// ============================================================================

/// What a fullscreen cell needs to put everything back
#[derive(Debug, Clone, PartialEq)]
pub struct FullscreenRestore {
    pub share: f32,
    pub parent: Parent,
    pub index: usize,
    /// Nodes hidden on entry, unhidden on exit
    pub hidden: Vec<NodeId>,
}

/// A leaf container holding one panel's content
#[derive(Debug)]
pub struct Cell {
    pub id: CellId,
    pub parent: Parent,
    /// Percent of the parent's main-axis extent
    pub share: f32,
    pub content: ContentRoot,
    pub binding: Option<PanelBinding>,
    pub hidden: bool,
    /// Content was undocked from here and has not been docked anywhere yet
    pub undocked_origin: bool,
    pub fullscreen: Option<FullscreenRestore>,
}

impl Cell {
    pub fn new(id: CellId, share: f32) -> Self {
        Self {
            id,
            parent: Parent::Root,
            share,
            content: ContentRoot::new(),
            binding: None,
            hidden: false,
            undocked_origin: false,
            fullscreen: None,
        }
    }

    pub fn identity(&self) -> Option<&PanelIdentity> {
        self.binding.as_ref().map(|b| &b.identity)
    }

    /// No identity and no content
    pub fn is_vacant(&self) -> bool {
        self.binding.is_none() && self.content.is_empty()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    /// Move content and binding out, leaving the cell vacated
    pub fn take_payload(&mut self) -> (ContentRoot, Option<PanelBinding>) {
        (self.content.take(), self.binding.take())
    }

    /// Release the current binding (running its cleanup) and clear content
    pub fn release(&mut self) -> Option<PanelIdentity> {
        self.content.clear();
        self.binding.take().map(PanelBinding::release)
    }
}

// ============================================================================
// Row
// ============================================================================

/// An axis-locked sequence alternating node, divider, node, ...
#[derive(Debug, Clone)]
pub struct Row {
    pub id: RowId,
    pub parent: Parent,
    pub axis: Axis,
    /// Percent of the parent's main-axis extent
    pub share: f32,
    pub items: Vec<Slot>,
    pub hidden: bool,
}

impl Row {
    pub fn new(id: RowId, axis: Axis, share: f32) -> Self {
        Self {
            id,
            parent: Parent::Root,
            axis,
            share,
            items: Vec::new(),
            hidden: false,
        }
    }

    /// Child nodes in order, skipping dividers
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().filter_map(Slot::node)
    }

    /// Cell children in order (nested rows are skipped)
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.nodes().filter_map(|node| match node {
            NodeId::Cell(id) => Some(id),
            NodeId::Row(_) => None,
        })
    }

    pub fn dividers(&self) -> impl Iterator<Item = DividerId> + '_ {
        self.items.iter().filter_map(Slot::divider)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }
}

// ============================================================================
// Divider
// ============================================================================

/// Draggable boundary bound to two adjacent siblings
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    pub id: DividerId,
    pub parent: Parent,
    /// Main axis of the parent; drags move along it
    pub axis: Axis,
    /// Left or top sibling
    pub before: NodeId,
    /// Right or bottom sibling
    pub after: NodeId,
}
