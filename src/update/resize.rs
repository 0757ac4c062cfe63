//! Divider drag (resizer)
//!
//! Press captures both siblings' extents and shares from the current layout.
//! Each move rewrites the pair's shares so their sum is unchanged, unless the
//! step would shrink either sibling below `min_cell_size`, in which case the
//! step is dropped and nothing changes.

use crate::commands::Cmd;
use crate::geometry::Point;
use crate::model::{AppModel, DividerDrag, DividerId, DragSession, NodeId, ResizePlaceholder};

/// Start dragging `divider` from `point`. Returns false for a stale divider
/// or one missing from the current layout.
pub fn begin_divider_drag(model: &mut AppModel, divider: DividerId, point: Point) -> bool {
    if !model.workspace.divider_is_live(divider) {
        tracing::debug!("Ignoring press on stale divider {:?}", divider);
        return false;
    }
    let Some(bound) = model.workspace.divider(divider).cloned() else {
        return false;
    };
    let layout = &model.layout;
    let (Some(before_rect), Some(after_rect), Some(available)) = (
        layout.node_rect(bound.before),
        layout.node_rect(bound.after),
        layout.available_extent(bound.parent),
    ) else {
        return false;
    };

    let drag = DividerDrag {
        divider,
        parent: bound.parent,
        axis: bound.axis,
        before: bound.before,
        after: bound.after,
        start: point.along(bound.axis),
        start_before: before_rect.extent(bound.axis),
        start_after: after_rect.extent(bound.axis),
        start_share_before: model.workspace.share_of(bound.before).unwrap_or(0.0),
        start_share_after: model.workspace.share_of(bound.after).unwrap_or(0.0),
        available,
    };
    tracing::debug!(
        "Divider drag started on {:?}: {} / {}",
        divider,
        drag.start_before,
        drag.start_after
    );

    model.ui.resize_placeholders = placeholders_for(model, &[bound.before, bound.after]);
    model.drag = Some(DragSession::Divider(drag));
    true
}

/// Apply one pointer move to the active divider drag
pub fn drag_divider(model: &mut AppModel, point: Point) -> Option<Cmd> {
    let Some(DragSession::Divider(drag)) = model.drag.as_ref() else {
        return None;
    };
    if !model.workspace.divider_is_live(drag.divider) {
        // Siblings changed under the drag; wait for release
        return None;
    }

    let (before, _after) = drag.extents_at(point.along(drag.axis), model.config.min_cell_size)?;
    let (share_before, share_after) = drag.shares_for(before);
    let (before_node, after_node) = (drag.before, drag.after);
    model.workspace.set_share(before_node, share_before);
    model.workspace.set_share(after_node, share_after);
    Some(Cmd::Redraw)
}

/// End the divider drag
pub fn release_divider(model: &mut AppModel) -> Option<Cmd> {
    if let Some(DragSession::Divider(drag)) = model.drag.take() {
        tracing::debug!("Divider drag ended on {:?}", drag.divider);
    }
    model.ui.resize_placeholders.clear();
    Some(Cmd::Redraw)
}

/// Track the divider under the pointer. Returns true if the hover changed.
pub fn hover(model: &mut AppModel, point: Point) -> bool {
    let hovered = model
        .layout
        .divider_at(point)
        .filter(|id| model.workspace.divider_is_live(*id));
    if hovered == model.ui.hovered_divider {
        return false;
    }
    model.ui.hovered_divider = hovered;
    true
}

/// One placeholder per cell under the dragged siblings
fn placeholders_for(model: &AppModel, nodes: &[NodeId]) -> Vec<ResizePlaceholder> {
    nodes
        .iter()
        .flat_map(|node| model.workspace.cells_under(*node))
        .enumerate()
        .map(|(index, cell)| {
            let label = model
                .workspace
                .cell(cell)
                .and_then(|c| c.identity())
                .map(|identity| identity.id.clone())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| "Panel".to_string());
            ResizePlaceholder::new(cell, label, index)
        })
        .collect()
}
