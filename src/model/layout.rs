//! Layout computation - turns shares into rectangles
//!
//! Each container's available extent is its main-axis extent minus the
//! dividers it holds. Nodes receive `share` percent of that; dividers get a
//! fixed width.

use std::collections::HashMap;

use super::tree::{CellId, DividerId, NodeId, Parent, RowId, Slot};
use super::workspace::Workspace;
use crate::geometry::{Axis, Point, Rect};

/// Default divider thickness in layout units
pub const DIVIDER_WIDTH: f32 = 6.0;

/// A divider's hit/draw rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerBar {
    pub id: DividerId,
    pub axis: Axis,
    pub rect: Rect,
}

/// Rectangles for everything visible in the workspace
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    pub viewport: Rect,
    pub cells: HashMap<CellId, Rect>,
    pub rows: HashMap<RowId, Rect>,
    pub dividers: Vec<DividerBar>,
    /// Main-axis extent left for nodes after dividers, per container
    pub available: HashMap<Parent, f32>,
    pub floating: Option<Rect>,
}

impl LayoutSnapshot {
    pub fn cell_rect(&self, id: CellId) -> Option<Rect> {
        self.cells.get(&id).copied()
    }

    pub fn node_rect(&self, node: NodeId) -> Option<Rect> {
        match node {
            NodeId::Cell(id) => self.cells.get(&id).copied(),
            NodeId::Row(id) => self.rows.get(&id).copied(),
        }
    }

    pub fn available_extent(&self, parent: Parent) -> Option<f32> {
        self.available.get(&parent).copied()
    }

    /// Divider under the point, if any
    pub fn divider_at(&self, point: Point) -> Option<DividerId> {
        self.dividers
            .iter()
            .find(|bar| bar.rect.contains_point(point))
            .map(|bar| bar.id)
    }

    /// Cell under the point, if any
    pub fn cell_at(&self, point: Point) -> Option<CellId> {
        self.cells
            .iter()
            .find(|(_, rect)| rect.contains_point(point))
            .map(|(id, _)| *id)
    }
}

impl Workspace {
    /// Compute rectangles for the whole workspace within `viewport`.
    ///
    /// A fullscreen cell covers the entire viewport and nothing else is laid
    /// out.
    pub fn compute_layout(&self, viewport: Rect, divider_width: f32) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot {
            viewport,
            floating: self.floating.as_ref().map(|f| f.rect),
            ..Default::default()
        };

        if let Some(id) = self.fullscreen.filter(|id| self.cell(*id).is_some()) {
            snapshot.cells.insert(id, viewport);
            return snapshot;
        }

        self.layout_sequence(Parent::Root, viewport, divider_width, &mut snapshot);
        snapshot
    }

    fn layout_sequence(
        &self,
        parent: Parent,
        rect: Rect,
        divider_width: f32,
        snapshot: &mut LayoutSnapshot,
    ) {
        let (Some(items), Some(axis)) = (self.items(parent), self.axis_of(parent)) else {
            return;
        };
        if items.is_empty() {
            return;
        }

        let divider_count = items.iter().filter_map(Slot::divider).count();
        let available = (rect.extent(axis) - divider_count as f32 * divider_width).max(0.0);
        snapshot.available.insert(parent, available);

        let mut offset = 0.0;
        for slot in items {
            match *slot {
                Slot::Node(node) => {
                    let size = available * self.share_of(node).unwrap_or(0.0) / 100.0;
                    let child = rect.slice(axis, offset, size);
                    match node {
                        NodeId::Cell(id) => {
                            snapshot.cells.insert(id, child);
                        }
                        NodeId::Row(id) => {
                            snapshot.rows.insert(id, child);
                            self.layout_sequence(Parent::Row(id), child, divider_width, snapshot);
                        }
                    }
                    offset += size;
                }
                Slot::Divider(id) => {
                    snapshot.dividers.push(DividerBar {
                        id,
                        axis,
                        rect: rect.slice(axis, offset, divider_width),
                    });
                    offset += divider_width;
                }
            }
        }
    }
}
