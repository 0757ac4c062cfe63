//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. After every
//! message the layout snapshot is recomputed from the tree.

mod app;
pub mod dock;
pub mod fullscreen;
pub mod layout;
pub mod panel;
mod pointer;
pub mod resize;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::TreeSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use layout::update_layout;
pub use panel::update_panel;
pub use pointer::update_pointer;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Panel(m) => panel::update_panel(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    model.relayout();
    result
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after tree shape and logs diffs for debugging.
/// Pointer moves are too frequent to log individually.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::PointerMsg;

    let is_noisy = matches!(&msg, Msg::Pointer(PointerMsg::Move(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = TreeSnapshot::from_workspace(&model.workspace);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = TreeSnapshot::from_workspace(&model.workspace);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "layout", %diff, "tree changed");
    }

    model.workspace.assert_invariants();
    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Layout::SplitActive { axis: Horizontal, count: 3 }`
/// - `Pointer::Press(Point { x: 10.0, y: 10.0 })`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
