//! Panel message handlers - loading content into cells

use crate::commands::Cmd;
use crate::error::LayoutError;
use crate::messages::PanelMsg;
use crate::model::{AppModel, CellId, Workspace};
use crate::panel::{
    LoadOutcome, PanelArgs, PanelBinding, PanelFactory, PanelIdentity, PanelSource,
};

use super::{fullscreen, layout};

/// Handle panel messages
pub fn update_panel(model: &mut AppModel, msg: PanelMsg) -> Option<Cmd> {
    match msg {
        PanelMsg::Load {
            id,
            class,
            args,
            replace_active,
        } => load_panel(model, &id, &class, &args, replace_active),
    }
}

/// Load panel `class` as `id` into the active cell.
///
/// Unless `replace_active` is set, a cell already showing `id` is brought
/// forward and activated instead.
pub fn load_panel(
    model: &mut AppModel,
    id: &str,
    class: &str,
    args: &PanelArgs,
    replace_active: bool,
) -> Option<Cmd> {
    if !replace_active {
        if let Some(existing) = model.workspace.find_panel(id) {
            if model.workspace.cell(existing).is_some_and(|c| c.hidden) {
                fullscreen::exit_fullscreen(&mut model.workspace);
            }
            tracing::debug!("Panel {} already open in {:?}", id, existing);
            return layout::activate(model, existing).or(Some(Cmd::Redraw));
        }
    }

    let Some(cell) = model.workspace.active_cell() else {
        return Some(model.notify(LayoutError::NoActiveCell.user_message()));
    };
    let class = if class.is_empty() {
        model.config.default_panel_class.clone()
    } else {
        class.to_string()
    };

    let outcome = install_panel(&model.factory, &mut model.workspace, cell, id, &class, args);
    if let Some(LoadOutcome::Placeholder { reason }) = &outcome {
        tracing::warn!("Panel {} ({}) shown as placeholder: {}", id, class, reason);
    }
    Some(Cmd::redraw_with(layout::activation_event(model, cell)))
}

/// Release whatever `cell` shows, then instantiate `class` into it under
/// identity `id`. Returns `None` if the cell does not exist.
pub fn install_panel(
    factory: &PanelFactory,
    workspace: &mut Workspace,
    cell: CellId,
    id: &str,
    class: &str,
    args: &PanelArgs,
) -> Option<LoadOutcome> {
    let cell = workspace.cell_mut(cell)?;
    if let Some(previous) = cell.release() {
        tracing::debug!("Replacing {} in {:?}", previous, cell.id);
    }

    let args = PanelArgs::new().with("id", id).merged(args);
    let handle = factory.instantiate(PanelSource::Named(class), &args, &mut cell.content);
    cell.binding = Some(PanelBinding::new(
        PanelIdentity::new(id, class),
        handle.cleanup,
    ));
    tracing::info!("Loaded {} ({}) into {:?}", id, class, cell.id);
    Some(handle.outcome)
}
