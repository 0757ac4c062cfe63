//! Workspace - owned arena of rows, cells and dividers
//!
//! The workspace is the context object every command handler receives. It
//! owns the top-level rows (stacked vertically and separated by dividers),
//! the active target, the optional floating panel and the fullscreen marker.
//!
//! All structural edits go through the small edit API below
//! (`push_node`, `replace_node`, `remove_node`, `insert_sibling`), which keeps
//! every row an alternating node/divider sequence and every divider bound to
//! the two siblings adjacent to it.

use std::collections::{HashMap, HashSet};

use super::floating::FloatingPanel;
use super::tree::{Cell, CellId, Divider, DividerId, NodeId, Parent, Row, RowId, Slot};
use crate::error::LayoutError;
use crate::geometry::Axis;

/// Axis the workspace stacks its top-level rows along
pub const ROOT_AXIS: Axis = Axis::Vertical;

/// Tolerance for the share-sum invariant
pub const SHARE_EPSILON: f32 = 0.01;

/// What structural operations act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTarget {
    Cell(CellId),
    Floating,
}

/// A node taken out of the tree by `remove_node`
#[derive(Debug)]
pub enum Detached {
    Cell(Cell),
    Row(Row),
}

#[derive(Debug, Default)]
pub struct Workspace {
    cells: HashMap<CellId, Cell>,
    rows: HashMap<RowId, Row>,
    dividers: HashMap<DividerId, Divider>,
    /// Top-level rows and the dividers between them
    root: Vec<Slot>,

    pub active: Option<ActiveTarget>,
    pub floating: Option<FloatingPanel>,
    pub fullscreen: Option<CellId>,

    next_cell_id: u64,
    next_row_id: u64,
    next_divider_id: u64,
}

impl Workspace {
    /// An empty workspace with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// One horizontal top-level row holding one empty, active cell
    pub fn single_cell() -> Self {
        let mut workspace = Self::new();
        let row = workspace.alloc_row(Axis::Horizontal, 100.0);
        let cell = workspace.alloc_cell(100.0);
        // Both pushes target containers that were just created
        let _ = workspace.push_node(Parent::Root, row.into());
        let _ = workspace.push_node(Parent::Row(row), cell.into());
        workspace.active = Some(ActiveTarget::Cell(cell));
        workspace
    }

    // =========================================================================
    // ID allocation
    // =========================================================================

    pub fn next_cell_id(&mut self) -> CellId {
        let id = CellId(self.next_cell_id);
        self.next_cell_id += 1;
        id
    }

    pub fn next_row_id(&mut self) -> RowId {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    pub fn next_divider_id(&mut self) -> DividerId {
        let id = DividerId(self.next_divider_id);
        self.next_divider_id += 1;
        id
    }

    /// Create a detached cell; attach it with `push_node`, `replace_node`
    /// or `insert_sibling`
    pub fn alloc_cell(&mut self, share: f32) -> CellId {
        let id = self.next_cell_id();
        self.cells.insert(id, Cell::new(id, share));
        id
    }

    /// Create a detached, empty row
    pub fn alloc_row(&mut self, axis: Axis, share: f32) -> RowId {
        let id = self.next_row_id();
        self.rows.insert(id, Row::new(id, axis, share));
        id
    }

    fn make_divider(
        &mut self,
        parent: Parent,
        axis: Axis,
        before: NodeId,
        after: NodeId,
    ) -> DividerId {
        let id = self.next_divider_id();
        self.dividers.insert(
            id,
            Divider {
                id,
                parent,
                axis,
                before,
                after,
            },
        );
        id
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.get_mut(&id)
    }

    pub fn divider(&self, id: DividerId) -> Option<&Divider> {
        self.dividers.get(&id)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn dividers(&self) -> impl Iterator<Item = &Divider> {
        self.dividers.values()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn divider_count(&self) -> usize {
        self.dividers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn root_items(&self) -> &[Slot] {
        &self.root
    }

    /// Top-level rows in order
    pub fn top_rows(&self) -> Vec<RowId> {
        self.root
            .iter()
            .filter_map(|slot| match slot {
                Slot::Node(NodeId::Row(id)) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        match node {
            NodeId::Cell(id) => self.cells.contains_key(&id),
            NodeId::Row(id) => self.rows.contains_key(&id),
        }
    }

    /// Child sequence of a container
    pub fn items(&self, parent: Parent) -> Option<&[Slot]> {
        match parent {
            Parent::Root => Some(&self.root),
            Parent::Row(id) => self.rows.get(&id).map(|row| row.items.as_slice()),
        }
    }

    fn items_mut(&mut self, parent: Parent) -> Option<&mut Vec<Slot>> {
        match parent {
            Parent::Root => Some(&mut self.root),
            Parent::Row(id) => self.rows.get_mut(&id).map(|row| &mut row.items),
        }
    }

    /// Nodes of a container in order, skipping dividers
    pub fn child_nodes(&self, parent: Parent) -> Vec<NodeId> {
        self.items(parent)
            .map(|items| items.iter().filter_map(Slot::node).collect())
            .unwrap_or_default()
    }

    /// Main axis of a container
    pub fn axis_of(&self, parent: Parent) -> Option<Axis> {
        match parent {
            Parent::Root => Some(ROOT_AXIS),
            Parent::Row(id) => self.rows.get(&id).map(|row| row.axis),
        }
    }

    pub fn parent_of(&self, node: NodeId) -> Option<Parent> {
        match node {
            NodeId::Cell(id) => self.cells.get(&id).map(|c| c.parent),
            NodeId::Row(id) => self.rows.get(&id).map(|r| r.parent),
        }
    }

    fn set_parent(&mut self, node: NodeId, parent: Parent) {
        match node {
            NodeId::Cell(id) => {
                if let Some(cell) = self.cells.get_mut(&id) {
                    cell.parent = parent;
                }
            }
            NodeId::Row(id) => {
                if let Some(row) = self.rows.get_mut(&id) {
                    row.parent = parent;
                }
            }
        }
    }

    pub fn share_of(&self, node: NodeId) -> Option<f32> {
        match node {
            NodeId::Cell(id) => self.cells.get(&id).map(|c| c.share),
            NodeId::Row(id) => self.rows.get(&id).map(|r| r.share),
        }
    }

    pub fn set_share(&mut self, node: NodeId, share: f32) {
        match node {
            NodeId::Cell(id) => {
                if let Some(cell) = self.cells.get_mut(&id) {
                    cell.share = share;
                }
            }
            NodeId::Row(id) => {
                if let Some(row) = self.rows.get_mut(&id) {
                    row.share = share;
                }
            }
        }
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        match node {
            NodeId::Cell(id) => self.cells.get(&id).is_some_and(|c| c.hidden),
            NodeId::Row(id) => self.rows.get(&id).is_some_and(|r| r.hidden),
        }
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        match node {
            NodeId::Cell(id) => {
                if let Some(cell) = self.cells.get_mut(&id) {
                    cell.hidden = hidden;
                }
            }
            NodeId::Row(id) => {
                if let Some(row) = self.rows.get_mut(&id) {
                    row.hidden = hidden;
                }
            }
        }
    }

    /// Parent and slot index of an attached node
    pub fn position_of(&self, node: NodeId) -> Option<(Parent, usize)> {
        let parent = self.parent_of(node)?;
        let index = self
            .items(parent)?
            .iter()
            .position(|slot| *slot == Slot::Node(node))?;
        Some((parent, index))
    }

    /// Rows enclosing `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> Vec<RowId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(node);
        while let Some(Parent::Row(id)) = current {
            chain.push(id);
            current = self.rows.get(&id).map(|r| r.parent);
        }
        chain
    }

    /// Every cell under `node` in document order
    pub fn cells_under(&self, node: NodeId) -> Vec<CellId> {
        let mut out = Vec::new();
        self.collect_cells(node, &mut out);
        out
    }

    fn collect_cells(&self, node: NodeId, out: &mut Vec<CellId>) {
        match node {
            NodeId::Cell(id) => out.push(id),
            NodeId::Row(id) => {
                if let Some(row) = self.rows.get(&id) {
                    for child in row.nodes() {
                        self.collect_cells(child, out);
                    }
                }
            }
        }
    }

    /// Every attached cell in document order
    pub fn cells_in_order(&self) -> Vec<CellId> {
        let mut out = Vec::new();
        for node in self.root.iter().filter_map(Slot::node) {
            self.collect_cells(node, &mut out);
        }
        out
    }

    /// Cell children of a row, nested rows skipped
    pub fn cell_children(&self, row: RowId) -> Vec<CellId> {
        self.rows
            .get(&row)
            .map(|r| r.cells().collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Active target
    // =========================================================================

    pub fn active_cell(&self) -> Option<CellId> {
        match self.active {
            Some(ActiveTarget::Cell(id)) if self.cells.contains_key(&id) => Some(id),
            _ => None,
        }
    }

    pub fn is_active(&self, id: CellId) -> bool {
        self.active == Some(ActiveTarget::Cell(id))
    }

    /// Make `id` the active target; false if it is not a live cell
    pub fn activate_cell(&mut self, id: CellId) -> bool {
        if !self.cells.contains_key(&id) {
            return false;
        }
        self.active = Some(ActiveTarget::Cell(id));
        true
    }

    /// Cell currently bound to panel `id`
    pub fn find_panel(&self, panel_id: &str) -> Option<CellId> {
        self.cells_in_order().into_iter().find(|id| {
            self.cells
                .get(id)
                .and_then(Cell::identity)
                .is_some_and(|identity| identity.id == panel_id)
        })
    }

    // =========================================================================
    // Edit API
    // =========================================================================

    /// Append `node` to the end of `parent`, wiring a divider to the
    /// previous last node. Shares are left as they are.
    pub fn push_node(
        &mut self,
        parent: Parent,
        node: NodeId,
    ) -> Result<Option<DividerId>, LayoutError> {
        if !self.contains_node(node) {
            return Err(LayoutError::UnknownNode(node));
        }
        let axis = self.axis_of(parent).ok_or_else(|| parent_error(parent))?;
        let last = self
            .items(parent)
            .ok_or_else(|| parent_error(parent))?
            .iter()
            .rev()
            .find_map(Slot::node);

        self.set_parent(node, parent);
        let divider = last.map(|before| self.make_divider(parent, axis, before, node));
        let items = self.items_mut(parent).ok_or_else(|| parent_error(parent))?;
        if let Some(divider) = divider {
            items.push(Slot::Divider(divider));
        }
        items.push(Slot::Node(node));
        Ok(divider)
    }

    /// Put `new` in `old`'s slot. `new` inherits the share and every divider
    /// binding of `old`; `old` is left detached in the arena.
    pub fn replace_node(&mut self, old: NodeId, new: NodeId) -> Result<(), LayoutError> {
        let (parent, index) = self.position_of(old).ok_or(LayoutError::Detached(old))?;
        if !self.contains_node(new) {
            return Err(LayoutError::UnknownNode(new));
        }

        let share = self.share_of(old).unwrap_or(100.0);
        self.set_share(new, share);
        self.set_parent(new, parent);
        if let Some(items) = self.items_mut(parent) {
            items[index] = Slot::Node(new);
        }
        for divider in self.dividers.values_mut() {
            if divider.parent != parent {
                continue;
            }
            if divider.before == old {
                divider.before = new;
            }
            if divider.after == old {
                divider.after = new;
            }
        }
        Ok(())
    }

    /// Insert `new` beside `anchor` with a divider between them. The two split
    /// the anchor's former share evenly.
    pub fn insert_sibling(
        &mut self,
        anchor: NodeId,
        new: NodeId,
        after: bool,
    ) -> Result<DividerId, LayoutError> {
        let (parent, index) = self.position_of(anchor).ok_or(LayoutError::Detached(anchor))?;
        if !self.contains_node(new) {
            return Err(LayoutError::UnknownNode(new));
        }
        let axis = self.axis_of(parent).ok_or_else(|| parent_error(parent))?;

        let half = self.share_of(anchor).unwrap_or(100.0) / 2.0;
        self.set_share(anchor, half);
        self.set_share(new, half);
        self.set_parent(new, parent);

        // The divider on the far side of the insertion now borders `new`
        let neighbour = if after {
            self.items(parent).and_then(|items| items.get(index + 1)).copied()
        } else if index > 0 {
            self.items(parent).and_then(|items| items.get(index - 1)).copied()
        } else {
            None
        };
        if let Some(Slot::Divider(id)) = neighbour {
            if let Some(divider) = self.dividers.get_mut(&id) {
                if after {
                    divider.before = new;
                } else {
                    divider.after = new;
                }
            }
        }

        let divider = if after {
            self.make_divider(parent, axis, anchor, new)
        } else {
            self.make_divider(parent, axis, new, anchor)
        };
        let items = self.items_mut(parent).ok_or_else(|| parent_error(parent))?;
        if after {
            items.insert(index + 1, Slot::Node(new));
            items.insert(index + 1, Slot::Divider(divider));
        } else {
            items.insert(index, Slot::Divider(divider));
            items.insert(index, Slot::Node(new));
        }
        Ok(divider)
    }

    /// Detach `node` together with exactly one adjacent divider (the preceding
    /// one when present), renormalize the remaining shares to 100 and prune
    /// rows left empty, recursively.
    ///
    /// A removed row takes its whole subtree with it; cells in that subtree
    /// are released (cleanup hooks run) before they are dropped.
    pub fn remove_node(&mut self, node: NodeId) -> Result<Detached, LayoutError> {
        let (parent, index) = self.position_of(node).ok_or(LayoutError::Detached(node))?;
        let items = self.items_mut(parent).ok_or_else(|| parent_error(parent))?;
        items.remove(index);

        let divider_index = if index > 0 {
            Some(index - 1)
        } else if index < items.len() {
            Some(index)
        } else {
            None
        };
        let removed_divider = divider_index.and_then(|i| match items.remove(i) {
            Slot::Divider(id) => Some(id),
            other => {
                // Not a divider; put it back untouched
                items.insert(i, other);
                None
            }
        });

        // Removing the preceding divider leaves the following one bordering
        // the node that preceded the removed one
        if index > 0 {
            let rebind = items
                .get(index - 1)
                .and_then(Slot::divider)
                .zip(index.checked_sub(2).and_then(|i| items.get(i)).and_then(Slot::node));
            if let Some((following, before)) = rebind {
                if let Some(divider) = self.dividers.get_mut(&following) {
                    divider.before = before;
                }
            }
        }
        if let Some(id) = removed_divider {
            self.dividers.remove(&id);
        }

        self.renormalize(parent);

        let detached = match node {
            NodeId::Cell(id) => self.cells.remove(&id).map(Detached::Cell),
            NodeId::Row(id) => self.discard_row(id).map(Detached::Row),
        }
        .ok_or(LayoutError::UnknownNode(node))?;

        if let Parent::Row(row) = parent {
            let emptied = self.rows.get(&row).is_some_and(|r| r.items.is_empty());
            if emptied {
                tracing::debug!("Pruning empty row {:?}", row);
                self.remove_node(NodeId::Row(row))?;
            }
        }

        self.forget_missing_targets();
        Ok(detached)
    }

    /// Remove a row and everything below it from the arena
    fn discard_row(&mut self, id: RowId) -> Option<Row> {
        let row = self.rows.remove(&id)?;
        for slot in &row.items {
            match *slot {
                Slot::Divider(divider) => {
                    self.dividers.remove(&divider);
                }
                Slot::Node(NodeId::Cell(cell)) => {
                    if let Some(mut cell) = self.cells.remove(&cell) {
                        cell.release();
                    }
                }
                Slot::Node(NodeId::Row(child)) => {
                    self.discard_row(child);
                }
            }
        }
        Some(row)
    }

    /// Take a detached cell out of the arena
    pub fn take_cell(&mut self, id: CellId) -> Option<Cell> {
        if self.position_of(NodeId::Cell(id)).is_some() {
            return None;
        }
        self.cells.remove(&id)
    }

    /// Drop every divider of a container and wire fresh ones between the
    /// remaining nodes
    pub fn rebuild_dividers(&mut self, parent: Parent) {
        let Some(axis) = self.axis_of(parent) else {
            return;
        };
        let nodes = self.child_nodes(parent);
        let stale: Vec<DividerId> = self
            .items(parent)
            .map(|items| items.iter().filter_map(Slot::divider).collect())
            .unwrap_or_default();
        for id in stale {
            self.dividers.remove(&id);
        }

        let mut items = Vec::with_capacity(nodes.len() * 2);
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                items.push(Slot::Divider(self.make_divider(parent, axis, nodes[i - 1], *node)));
            }
            items.push(Slot::Node(*node));
        }
        if let Some(slot) = self.items_mut(parent) {
            *slot = items;
        }
    }

    /// Scale the shares of a container's nodes so they sum to 100
    pub fn renormalize(&mut self, parent: Parent) {
        let nodes = self.child_nodes(parent);
        if nodes.is_empty() {
            return;
        }
        let total: f32 = nodes.iter().filter_map(|n| self.share_of(*n)).sum();
        for node in &nodes {
            let share = if total > f32::EPSILON {
                self.share_of(*node).unwrap_or(0.0) * 100.0 / total
            } else {
                100.0 / nodes.len() as f32
            };
            self.set_share(*node, share);
        }
    }

    /// Clear active and fullscreen markers that point at removed cells
    fn forget_missing_targets(&mut self) {
        if let Some(ActiveTarget::Cell(id)) = self.active {
            if !self.cells.contains_key(&id) {
                self.active = None;
            }
        }
        if self.active == Some(ActiveTarget::Floating) && self.floating.is_none() {
            self.active = None;
        }
        if let Some(id) = self.fullscreen {
            if !self.cells.contains_key(&id) {
                self.fullscreen = None;
            }
        }
    }

    // =========================================================================
    // Dividers
    // =========================================================================

    /// A divider is live when both bound siblings are attached to its parent
    /// and sit immediately on either side of it
    pub fn divider_is_live(&self, id: DividerId) -> bool {
        let Some(divider) = self.dividers.get(&id) else {
            return false;
        };
        let Some(items) = self.items(divider.parent) else {
            return false;
        };
        let Some(index) = items.iter().position(|slot| *slot == Slot::Divider(id)) else {
            return false;
        };
        index > 0
            && items.get(index - 1) == Some(&Slot::Node(divider.before))
            && items.get(index + 1) == Some(&Slot::Node(divider.after))
            && self.parent_of(divider.before) == Some(divider.parent)
            && self.parent_of(divider.after) == Some(divider.parent)
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check every structural invariant, describing the first violation
    pub fn validate(&self) -> Result<(), String> {
        let mut seen_cells = HashSet::new();
        let mut seen_rows = HashSet::new();
        let mut seen_dividers = HashSet::new();

        if self
            .root
            .iter()
            .any(|slot| matches!(slot, Slot::Node(NodeId::Cell(_))))
        {
            return Err("cell attached directly to the workspace root".to_string());
        }
        self.validate_sequence(
            Parent::Root,
            &mut seen_cells,
            &mut seen_rows,
            &mut seen_dividers,
        )?;

        if seen_cells.len() != self.cells.len() {
            return Err(format!(
                "{} cells in arena but {} attached",
                self.cells.len(),
                seen_cells.len()
            ));
        }
        if seen_rows.len() != self.rows.len() {
            return Err(format!(
                "{} rows in arena but {} attached",
                self.rows.len(),
                seen_rows.len()
            ));
        }
        if seen_dividers.len() != self.dividers.len() {
            return Err(format!(
                "{} dividers in arena but {} attached",
                self.dividers.len(),
                seen_dividers.len()
            ));
        }

        match self.active {
            Some(ActiveTarget::Cell(id)) if !self.cells.contains_key(&id) => {
                return Err(format!("active cell {:?} does not exist", id));
            }
            Some(ActiveTarget::Floating) if self.floating.is_none() => {
                return Err("floating panel active but none exists".to_string());
            }
            _ => {}
        }
        if let Some(id) = self.fullscreen {
            match self.cells.get(&id) {
                Some(cell) if cell.is_fullscreen() => {}
                _ => return Err(format!("fullscreen cell {:?} has no restore record", id)),
            }
        }
        Ok(())
    }

    fn validate_sequence(
        &self,
        parent: Parent,
        seen_cells: &mut HashSet<CellId>,
        seen_rows: &mut HashSet<RowId>,
        seen_dividers: &mut HashSet<DividerId>,
    ) -> Result<(), String> {
        let items = self
            .items(parent)
            .ok_or_else(|| format!("missing container {:?}", parent))?;
        if items.is_empty() {
            return match parent {
                Parent::Root => Ok(()),
                Parent::Row(id) => Err(format!("row {:?} is empty", id)),
            };
        }
        if items.len() % 2 == 0 {
            return Err(format!("{:?} has an even-length sequence", parent));
        }

        let mut total = 0.0;
        for (i, slot) in items.iter().enumerate() {
            match (i % 2 == 0, *slot) {
                (true, Slot::Node(node)) => {
                    if self.parent_of(node) != Some(parent) {
                        return Err(format!("{:?} does not point back to {:?}", node, parent));
                    }
                    total += self.share_of(node).unwrap_or(0.0);
                    match node {
                        NodeId::Cell(id) => {
                            if !seen_cells.insert(id) {
                                return Err(format!("cell {:?} attached twice", id));
                            }
                        }
                        NodeId::Row(id) => {
                            if !seen_rows.insert(id) {
                                return Err(format!("row {:?} attached twice", id));
                            }
                            self.validate_sequence(
                                Parent::Row(id),
                                seen_cells,
                                seen_rows,
                                seen_dividers,
                            )?;
                        }
                    }
                }
                (false, Slot::Divider(id)) => {
                    if !self.divider_is_live(id) {
                        return Err(format!("divider {:?} in {:?} is stale", id, parent));
                    }
                    seen_dividers.insert(id);
                }
                (_, slot) => {
                    return Err(format!("{:?} breaks alternation in {:?} at {}", slot, parent, i));
                }
            }
        }

        if (total - 100.0).abs() > SHARE_EPSILON {
            return Err(format!("shares in {:?} sum to {}", parent, total));
        }
        Ok(())
    }

    /// Panics in debug builds if any invariant is violated
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("workspace invariant violated: {}", violation);
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

fn parent_error(parent: Parent) -> LayoutError {
    match parent {
        Parent::Root => LayoutError::NoActiveCell,
        Parent::Row(id) => LayoutError::UnknownNode(NodeId::Row(id)),
    }
}
