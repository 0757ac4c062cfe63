//! Layout message handlers (split, merge, close, activation)

use crate::commands::{Cmd, LayoutEvent};
use crate::config::MergeCleanupPolicy;
use crate::error::LayoutError;
use crate::geometry::Axis;
use crate::messages::LayoutMsg;
use crate::model::{ActiveTarget, AppModel, CellId, NodeId, Parent, Workspace};
use crate::panel::{ContentRoot, PanelBinding, PanelIdentity};

use super::{dock, fullscreen};

/// Handle layout messages
pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::SplitActive { axis, count } => {
            match split_active_cell(&mut model.workspace, axis, count) {
                Ok(Some(first)) => Some(Cmd::redraw_with(activation_event(model, first))),
                Ok(None) => None,
                Err(e) => Some(model.notify(e.user_message())),
            }
        }

        LayoutMsg::MergeActive => {
            let policy = model.config.merge_cleanup;
            match merge_active_cells(&mut model.workspace, policy) {
                Ok(merged) => Some(Cmd::redraw_with(activation_event(model, merged))),
                Err(e) => Some(model.notify(e.user_message())),
            }
        }

        LayoutMsg::CloseActive => match close_active(&mut model.workspace) {
            Ok(identity) => Some(Cmd::redraw_with(LayoutEvent::ActivePanelClosed {
                identity,
            })),
            Err(e) => Some(model.notify(e.user_message())),
        },

        LayoutMsg::ToggleFullscreen => fullscreen::toggle_active(model),

        LayoutMsg::UndockActive => dock::undock_active(model),

        LayoutMsg::Dock(target) => dock::dock_into(model, target),

        LayoutMsg::Activate(cell) => activate(model, cell),

        LayoutMsg::AppendCell => {
            append_cell(&mut model.workspace);
            Some(Cmd::Redraw)
        }
    }
}

/// Make `cell` active, emitting an event when the active target changes
pub fn activate(model: &mut AppModel, cell: CellId) -> Option<Cmd> {
    if model.workspace.is_active(cell) {
        return None;
    }
    if !model.workspace.activate_cell(cell) {
        return None;
    }
    tracing::debug!("Activated cell {:?}", cell);
    Some(Cmd::redraw_with(activation_event(model, cell)))
}

pub(crate) fn activation_event(model: &AppModel, cell: CellId) -> LayoutEvent {
    LayoutEvent::ActivePanelChanged {
        cell: Some(cell),
        identity: model
            .workspace
            .cell(cell)
            .and_then(|c| c.identity().cloned()),
    }
}

// ============================================================================
// Splitter
// ============================================================================

/// Replace the active cell with a row of `count` cells along `axis`.
///
/// The first new cell inherits the old cell's content and binding and becomes
/// active. Returns `None` for a count of one, which changes nothing.
pub fn split_active_cell(
    workspace: &mut Workspace,
    axis: Axis,
    count: usize,
) -> Result<Option<CellId>, LayoutError> {
    let active = workspace.active_cell().ok_or(LayoutError::NoActiveCell)?;
    if count == 0 {
        return Err(LayoutError::InvalidCount(count));
    }
    if count == 1 {
        return Ok(None);
    }
    let node = NodeId::Cell(active);
    workspace
        .position_of(node)
        .ok_or(LayoutError::Detached(node))?;

    fullscreen::exit_fullscreen(workspace);

    let share = 100.0 / count as f32;
    let row = workspace.alloc_row(axis, 0.0);
    let cells: Vec<CellId> = (0..count).map(|_| workspace.alloc_cell(share)).collect();
    for cell in &cells {
        workspace.push_node(Parent::Row(row), NodeId::Cell(*cell))?;
    }
    workspace.replace_node(node, NodeId::Row(row))?;

    let mut old = workspace
        .take_cell(active)
        .ok_or(LayoutError::UnknownNode(node))?;
    let (content, binding) = old.take_payload();
    let first = cells[0];
    if let Some(cell) = workspace.cell_mut(first) {
        cell.content = content;
        cell.binding = binding;
        cell.undocked_origin = old.undocked_origin;
    }
    if let Some(floating) = workspace.floating.as_mut() {
        if floating.origin == active {
            floating.origin = first;
        }
    }
    workspace.activate_cell(first);

    tracing::info!("Split cell {:?} into {} along {}", active, count, axis.name());
    Ok(Some(first))
}

// ============================================================================
// Merger
// ============================================================================

/// Collapse the active cell and its cell siblings into one new cell.
///
/// Content is concatenated in row order; identity and cleanup come from the
/// first cell only. The other cells' cleanups follow `policy`. Nested rows in
/// the same parent are left in place.
pub fn merge_active_cells(
    workspace: &mut Workspace,
    policy: MergeCleanupPolicy,
) -> Result<CellId, LayoutError> {
    let active = workspace.active_cell().ok_or(LayoutError::NoActiveCell)?;
    let Some(Parent::Row(row)) = workspace.parent_of(NodeId::Cell(active)) else {
        return Err(LayoutError::NothingToMerge);
    };
    let collected = workspace.cell_children(row);
    if collected.len() < 2 {
        return Err(LayoutError::NothingToMerge);
    }

    fullscreen::exit_fullscreen(workspace);

    let parent = Parent::Row(row);
    let original_shares: Vec<(NodeId, f32)> = workspace
        .child_nodes(parent)
        .into_iter()
        .filter_map(|node| workspace.share_of(node).map(|share| (node, share)))
        .collect();

    let mut content = ContentRoot::new();
    let mut binding: Option<PanelBinding> = None;
    let mut merged_share = 0.0;
    for (i, id) in collected.iter().enumerate() {
        let Some(cell) = workspace.cell_mut(*id) else {
            continue;
        };
        merged_share += cell.share;
        let (cell_content, cell_binding) = cell.take_payload();
        content.append(cell_content);
        if i == 0 {
            binding = cell_binding;
        } else if let Some(extra) = cell_binding {
            settle_merged_binding(extra, policy);
        }
    }

    let merged = workspace.alloc_cell(merged_share);
    workspace.replace_node(NodeId::Cell(collected[0]), NodeId::Cell(merged))?;
    workspace.take_cell(collected[0]);
    for id in &collected[1..] {
        workspace.remove_node(NodeId::Cell(*id))?;
    }

    // remove_node renormalizes as it goes; put the pre-merge proportions back
    for (node, share) in original_shares {
        workspace.set_share(node, share);
    }
    workspace.set_share(NodeId::Cell(merged), merged_share);
    workspace.renormalize(parent);
    workspace.rebuild_dividers(parent);

    if let Some(cell) = workspace.cell_mut(merged) {
        cell.content = content;
        cell.binding = binding;
    }
    workspace.activate_cell(merged);

    tracing::info!("Merged {} cells into {:?}", collected.len(), merged);
    Ok(merged)
}

fn settle_merged_binding(binding: PanelBinding, policy: MergeCleanupPolicy) {
    let PanelBinding { identity, cleanup } = binding;
    let Some(cleanup) = cleanup else {
        return;
    };
    match policy {
        MergeCleanupPolicy::Drop => {
            tracing::warn!(
                "Merge dropped the cleanup hook of {} without invoking it",
                identity
            );
            cleanup.discard();
        }
        MergeCleanupPolicy::Invoke => {
            tracing::debug!("Merge invoking cleanup hook of {}", identity);
            cleanup.invoke();
        }
    }
}

// ============================================================================
// Close controller
// ============================================================================

/// Close the active target. A docked cell runs its cleanup, then leaves the
/// tree along with one adjacent divider; emptied rows are pruned.
pub fn close_active(workspace: &mut Workspace) -> Result<Option<PanelIdentity>, LayoutError> {
    let active = workspace.active;
    match active {
        Some(ActiveTarget::Floating) => dock::close_floating(workspace),
        Some(ActiveTarget::Cell(id)) if workspace.cell(id).is_some() => {
            let node = NodeId::Cell(id);
            workspace
                .position_of(node)
                .ok_or(LayoutError::Detached(node))?;
            fullscreen::exit_fullscreen(workspace);

            let identity = workspace.cell_mut(id).and_then(|cell| cell.release());
            workspace.remove_node(node)?;
            workspace.active = None;

            tracing::info!("Closed cell {:?}", id);
            Ok(identity)
        }
        _ => Err(LayoutError::NoActiveTarget),
    }
}

// ============================================================================
// Append
// ============================================================================

/// Add an empty cell at the end of the first top-level row, creating the row
/// when the workspace is empty
pub fn append_cell(workspace: &mut Workspace) -> CellId {
    fullscreen::exit_fullscreen(workspace);

    let last = workspace
        .top_rows()
        .first()
        .and_then(|row| workspace.child_nodes(Parent::Row(*row)).last().copied());

    let cell = workspace.alloc_cell(100.0);
    let attached = match last {
        Some(anchor) => workspace
            .insert_sibling(anchor, NodeId::Cell(cell), true)
            .map(|_| ()),
        None => {
            let row = workspace.alloc_row(Axis::Horizontal, 100.0);
            workspace
                .push_node(Parent::Root, NodeId::Row(row))
                .and_then(|_| workspace.push_node(Parent::Row(row), NodeId::Cell(cell)))
                .map(|_| ())
        }
    };
    if let Err(e) = attached {
        tracing::warn!("Failed to append cell: {}", e);
    }
    if workspace.active.is_none() {
        workspace.activate_cell(cell);
    }
    cell
}
