//! Fullscreen controller
//!
//! Entering hides every top row that does not contain the cell and every
//! sibling along the cell's ancestor chain, then lets the cell cover the whole
//! viewport. Exiting undoes exactly what entering recorded.

use crate::commands::Cmd;
use crate::error::LayoutError;
use crate::model::{AppModel, CellId, FullscreenRestore, NodeId, Parent, Workspace};

/// Handle `LayoutMsg::ToggleFullscreen`
pub fn toggle_active(model: &mut AppModel) -> Option<Cmd> {
    match toggle_fullscreen(&mut model.workspace) {
        Ok(entered) => {
            tracing::info!(
                "Fullscreen {}",
                if entered { "entered" } else { "exited" }
            );
            Some(Cmd::Redraw)
        }
        Err(e) => Some(model.notify(e.user_message())),
    }
}

/// Enter fullscreen for the active cell, or leave it if that cell is the
/// fullscreen one. Returns whether fullscreen was entered.
pub fn toggle_fullscreen(workspace: &mut Workspace) -> Result<bool, LayoutError> {
    let active = workspace.active_cell().ok_or(LayoutError::NoActiveCell)?;
    match workspace.fullscreen {
        Some(id) if id == active => {
            exit_fullscreen(workspace);
            Ok(false)
        }
        Some(other) => Err(LayoutError::FullscreenBusy(other)),
        None => {
            if workspace.floating.is_some() {
                return Err(LayoutError::FloatingOpen);
            }
            enter_fullscreen(workspace, active)?;
            Ok(true)
        }
    }
}

/// Make `cell` fullscreen. A cell that already is fullscreen is left alone.
pub fn enter_fullscreen(workspace: &mut Workspace, cell: CellId) -> Result<(), LayoutError> {
    let node = NodeId::Cell(cell);
    let current = workspace.cell(cell).ok_or(LayoutError::UnknownNode(node))?;
    if current.is_fullscreen() {
        return Ok(());
    }
    if let Some(other) = workspace.fullscreen {
        return Err(LayoutError::FullscreenBusy(other));
    }
    let share = current.share;
    let (parent, index) = workspace
        .position_of(node)
        .ok_or(LayoutError::Detached(node))?;

    // Siblings at every level, up to and including the other top rows
    let mut hidden = Vec::new();
    let mut current = node;
    while let Some(container) = workspace.parent_of(current) {
        for sibling in workspace.child_nodes(container) {
            if sibling != current && !workspace.is_hidden(sibling) {
                workspace.set_hidden(sibling, true);
                hidden.push(sibling);
            }
        }
        match container {
            Parent::Row(row) => current = NodeId::Row(row),
            Parent::Root => break,
        }
    }

    tracing::debug!("Cell {:?} fullscreen, {} nodes hidden", cell, hidden.len());
    if let Some(target) = workspace.cell_mut(cell) {
        target.fullscreen = Some(FullscreenRestore {
            share,
            parent,
            index,
            hidden,
        });
    }
    workspace.fullscreen = Some(cell);
    Ok(())
}

/// Leave fullscreen, if any cell is fullscreen
pub fn exit_fullscreen(workspace: &mut Workspace) {
    let Some(cell) = workspace.fullscreen.take() else {
        return;
    };
    let Some(restore) = workspace.cell_mut(cell).and_then(|c| c.fullscreen.take()) else {
        return;
    };

    for node in &restore.hidden {
        workspace.set_hidden(*node, false);
    }
    workspace.set_share(NodeId::Cell(cell), restore.share);
    if workspace.position_of(NodeId::Cell(cell)) != Some((restore.parent, restore.index)) {
        tracing::warn!("Fullscreen cell {:?} moved while fullscreen", cell);
    }
    tracing::debug!("Cell {:?} left fullscreen", cell);
}
