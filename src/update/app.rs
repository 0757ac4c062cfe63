//! App message handlers (viewport, ticks)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            tracing::debug!("Viewport resized to {}x{}", width, height);
            model.resize(width, height);
            Some(Cmd::Redraw)
        }
        AppMsg::Tick => model.ui.expire_notice().then_some(Cmd::Redraw),
    }
}
