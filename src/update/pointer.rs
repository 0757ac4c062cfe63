//! Pointer routing
//!
//! A press starts at most one session: on the floating panel, on a live
//! divider, or (failing both) it simply activates the cell underneath. Moves
//! and the release go to whichever session is in progress.

use crate::commands::Cmd;
use crate::messages::PointerMsg;
use crate::model::{AppModel, DragSession};

use super::{dock, layout, resize};

pub fn update_pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Press(point) => {
            if model.drag.is_some() {
                tracing::debug!("Press ignored, a pointer session is in progress");
                return None;
            }
            if dock::hits_floating(model, point) {
                return dock::press_floating(model, point);
            }
            if let Some(divider) = model.layout.divider_at(point) {
                return resize::begin_divider_drag(model, divider, point).then_some(Cmd::Redraw);
            }
            let cell = model.layout.cell_at(point)?;
            layout::activate(model, cell)
        }

        PointerMsg::Move(point) => match model.drag {
            Some(DragSession::Divider(_)) => resize::drag_divider(model, point),
            Some(DragSession::Floating(_)) => dock::drag_floating(model, point),
            Some(DragSession::FloatingResize(_)) => dock::resize_floating(model, point),
            None => resize::hover(model, point).then_some(Cmd::Redraw),
        },

        PointerMsg::Release(point) => match model.drag {
            Some(DragSession::Divider(_)) => resize::release_divider(model),
            Some(DragSession::Floating(_)) => dock::release_floating(model, point),
            Some(DragSession::FloatingResize(_)) => {
                model.drag = None;
                Some(Cmd::Redraw)
            }
            None => None,
        },
    }
}
