//! Undock/dock controller and the floating panel's pointer sessions
//!
//! Undocking moves a cell's content and binding into the single floating
//! panel and leaves the cell vacated. Dragging the panel by its header
//! highlights a snap target whenever the pointer is over a cell but outside
//! that cell's inner region; releasing there docks the panel.

use crate::commands::{Cmd, LayoutEvent};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geometry::{Point, Rect};
use crate::model::{
    ActiveTarget, AppModel, CellId, DragSession, FloatingDrag, FloatingPanel, FloatingResize,
    LayoutSnapshot, Workspace,
};
use crate::panel::PanelIdentity;

use super::fullscreen;

/// Margin kept between a resized floating panel and the viewport edge
const FLOATING_VIEWPORT_MARGIN: f32 = 20.0;

// ============================================================================
// Undock
// ============================================================================

/// Handle `LayoutMsg::UndockActive`
pub fn undock_active(model: &mut AppModel) -> Option<Cmd> {
    match undock(model) {
        Ok(origin) => {
            let identity = model
                .workspace
                .floating
                .as_ref()
                .and_then(|f| f.identity().cloned());
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::Emit(LayoutEvent::Undocked {
                    origin,
                    identity: identity.clone(),
                }),
                Cmd::Emit(LayoutEvent::ActivePanelChanged {
                    cell: None,
                    identity,
                }),
            ]))
        }
        Err(e) => Some(model.notify(e.user_message())),
    }
}

/// Move the active cell's content into a new floating panel.
///
/// Returns the origin cell. The floating panel becomes the active target.
pub fn undock(model: &mut AppModel) -> Result<CellId, LayoutError> {
    let workspace = &mut model.workspace;
    if workspace.floating.is_some() {
        return Err(LayoutError::FloatingExists);
    }
    let source = workspace.active_cell().ok_or(LayoutError::NoActiveCell)?;
    if workspace.cell(source).is_some_and(|c| c.is_vacant()) {
        return Err(LayoutError::EmptySource);
    }

    fullscreen::exit_fullscreen(workspace);
    let layout = workspace.compute_layout(model.viewport, model.config.divider_width);
    let source_rect = layout.cell_rect(source).unwrap_or(model.viewport);
    let rect = floating_rect_for(source_rect, model.viewport, &model.config);

    let Some(cell) = workspace.cell_mut(source) else {
        return Err(LayoutError::UnknownNode(source.into()));
    };
    let (content, binding) = cell.take_payload();
    cell.undocked_origin = true;

    workspace.floating = Some(FloatingPanel::new(
        rect,
        model.config.floating_header_height,
        content,
        binding,
        source,
    ));
    workspace.active = Some(ActiveTarget::Floating);

    tracing::info!("Undocked cell {:?}", source);
    Ok(source)
}

/// Where a panel undocked from `source` appears: offset from the source's
/// corner, at least `floating_margin` from the viewport's top-left
pub fn floating_rect_for(source: Rect, viewport: Rect, config: &LayoutConfig) -> Rect {
    let margin = config.floating_margin;
    let width = config
        .floating_size
        .width
        .min((viewport.width - 2.0 * margin).max(config.floating_min_size.width));
    let height = config
        .floating_size
        .height
        .min((viewport.height - 2.0 * margin).max(config.floating_min_size.height));
    let x = (viewport.x + margin).max(source.x + config.floating_offset);
    let y = (viewport.y + margin).max(source.y + config.floating_offset);
    Rect::new(x, y, width, height)
}

// ============================================================================
// Dock
// ============================================================================

/// Handle `LayoutMsg::Dock`
pub fn dock_into(model: &mut AppModel, target: CellId) -> Option<Cmd> {
    match dock(&mut model.workspace, target) {
        Ok(identity) => {
            model.ui.snap_highlight = None;
            Some(Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::Emit(LayoutEvent::Docked {
                    cell: target,
                    identity: identity.clone(),
                }),
                Cmd::Emit(LayoutEvent::ActivePanelChanged {
                    cell: Some(target),
                    identity,
                }),
            ]))
        }
        Err(e) => Some(model.notify(e.user_message())),
    }
}

/// Move the floating panel's content into `target`.
///
/// The target's own cleanup runs first. Docking into the origin cell returns
/// the content where it came from.
pub fn dock(
    workspace: &mut Workspace,
    target: CellId,
) -> Result<Option<PanelIdentity>, LayoutError> {
    if workspace.cell(target).is_none() {
        return Err(LayoutError::UnknownNode(target.into()));
    }
    let floating = workspace.floating.take().ok_or(LayoutError::NoFloating)?;
    let origin = floating.origin;
    let FloatingPanel {
        content, binding, ..
    } = floating;
    let identity = binding.as_ref().map(|b| b.identity.clone());

    if let Some(cell) = workspace.cell_mut(target) {
        if let Some(previous) = cell.release() {
            tracing::debug!("Docking replaced {}", previous);
        }
        cell.content = content;
        cell.binding = binding;
    }
    if let Some(cell) = workspace.cell_mut(origin) {
        cell.undocked_origin = false;
    }
    workspace.activate_cell(target);

    if origin == target {
        tracing::info!("Floating panel returned to {:?}", target);
    } else {
        tracing::info!("Floating panel docked into {:?}", target);
    }
    Ok(identity)
}

/// Run the floating panel's close hook and discard it
pub fn close_floating(workspace: &mut Workspace) -> Result<Option<PanelIdentity>, LayoutError> {
    let floating = workspace.floating.take().ok_or(LayoutError::NoFloating)?;
    let origin = floating.origin;
    let identity = floating.release();
    if let Some(cell) = workspace.cell_mut(origin) {
        cell.undocked_origin = false;
    }
    if workspace.active == Some(ActiveTarget::Floating) {
        workspace.active = None;
    }
    tracing::info!("Closed floating panel");
    Ok(identity)
}

/// Cell under `point` that a floating panel may dock into: the pointer must
/// be outside the centered `inner_fraction` of the cell
pub fn snap_candidate(
    layout: &LayoutSnapshot,
    point: Point,
    inner_fraction: f32,
) -> Option<CellId> {
    let cell = layout.cell_at(point)?;
    let rect = layout.cell_rect(cell)?;
    if rect.inset(inner_fraction).contains_point(point) {
        return None;
    }
    Some(cell)
}

// ============================================================================
// Floating pointer sessions
// ============================================================================

/// Whether `point` is over the floating panel
pub fn hits_floating(model: &AppModel, point: Point) -> bool {
    model
        .workspace
        .floating
        .as_ref()
        .is_some_and(|f| f.rect.contains_point(point))
}

/// Press on the floating panel: activate it, and start a drag from the
/// header or a resize from an edge
pub fn press_floating(model: &mut AppModel, point: Point) -> Option<Cmd> {
    let floating = model.workspace.floating.as_ref()?;

    let session = if floating.header_rect().contains_point(point) {
        Some(DragSession::Floating(FloatingDrag {
            grab_offset: Point::new(point.x - floating.rect.x, point.y - floating.rect.y),
            candidate: None,
        }))
    } else if floating
        .body_rect()
        .near_edge(point, model.config.floating_edge_threshold)
    {
        Some(DragSession::FloatingResize(FloatingResize {
            start: point,
            start_rect: floating.rect,
        }))
    } else {
        None
    };
    let identity = floating.identity().cloned();

    if let Some(session) = session {
        tracing::debug!("Floating session started: {:?}", session);
        model.drag = Some(session);
    }

    if model.workspace.active == Some(ActiveTarget::Floating) {
        return None;
    }
    model.workspace.active = Some(ActiveTarget::Floating);
    Some(Cmd::redraw_with(LayoutEvent::ActivePanelChanged {
        cell: None,
        identity,
    }))
}

/// Follow the pointer while dragging by the header
pub fn drag_floating(model: &mut AppModel, point: Point) -> Option<Cmd> {
    let Some(DragSession::Floating(drag)) = model.drag.as_mut() else {
        return None;
    };
    let floating = model.workspace.floating.as_mut()?;
    floating.rect.x = point.x - drag.grab_offset.x;
    floating.rect.y = point.y - drag.grab_offset.y;

    drag.candidate = snap_candidate(&model.layout, point, model.config.snap_inner_fraction);
    model.ui.snap_highlight = drag.candidate;
    Some(Cmd::Redraw)
}

/// End a header drag: dock into the cell under the pointer if it is a valid
/// target, otherwise keep floating
pub fn release_floating(model: &mut AppModel, point: Point) -> Option<Cmd> {
    if !matches!(model.drag, Some(DragSession::Floating(_))) {
        return None;
    }
    model.drag = None;
    model.ui.snap_highlight = None;
    if model.workspace.floating.is_none() {
        tracing::debug!("Floating panel went away mid-drag, ignoring release");
        return Some(Cmd::Redraw);
    }

    match snap_candidate(&model.layout, point, model.config.snap_inner_fraction) {
        Some(target) => dock_into(model, target),
        None => {
            tracing::debug!("Floating panel released without a dock target");
            Some(Cmd::Redraw)
        }
    }
}

/// Resize from an edge, clamped to the minimum size and the viewport
pub fn resize_floating(model: &mut AppModel, point: Point) -> Option<Cmd> {
    let Some(DragSession::FloatingResize(resize)) = model.drag.as_ref() else {
        return None;
    };
    let floating = model.workspace.floating.as_mut()?;
    let min = model.config.floating_min_size;
    let viewport = model.viewport;
    let start = resize.start_rect;

    let max_width = min
        .width
        .max(viewport.right() - start.x - FLOATING_VIEWPORT_MARGIN);
    let max_height = min
        .height
        .max(viewport.bottom() - start.y - FLOATING_VIEWPORT_MARGIN);
    floating.rect.width = (start.width + point.x - resize.start.x).clamp(min.width, max_width);
    floating.rect.height = (start.height + point.y - resize.start.y).clamp(min.height, max_height);
    Some(Cmd::Redraw)
}
