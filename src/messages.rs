//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::geometry::{Axis, Point};
use crate::model::CellId;
use crate::panel::PanelArgs;

/// Structural layout commands, usually issued from a toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Replace the active cell with a row of `count` cells
    SplitActive { axis: Axis, count: usize },
    /// Collapse the active cell and its cell siblings into one
    MergeActive,
    /// Close the active cell or floating panel
    CloseActive,
    /// Enter or leave fullscreen for the active cell
    ToggleFullscreen,
    /// Move the active cell's content into a floating panel
    UndockActive,
    /// Dock the floating panel into a cell
    Dock(CellId),
    /// Make a cell the active target
    Activate(CellId),
    /// Add an empty cell at the end of the first top-level row
    AppendCell,
}

/// Pointer input in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMsg {
    Press(Point),
    Move(Point),
    Release(Point),
}

/// Panel content messages
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    /// Load panel `class` with identity `id` into the active cell
    Load {
        id: String,
        class: String,
        args: PanelArgs,
        /// Load even if a cell already shows panel `id`
        replace_active: bool,
    },
}

/// Host-level messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMsg {
    /// Viewport resized
    Resize(f32, f32),
    /// Periodic tick, used to expire notices
    Tick,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Layout(LayoutMsg),
    Pointer(PointerMsg),
    Panel(PanelMsg),
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn split(axis: Axis, count: usize) -> Self {
        Msg::Layout(LayoutMsg::SplitActive { axis, count })
    }

    pub fn press(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Press(Point::new(x, y)))
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Move(Point::new(x, y)))
    }

    pub fn release(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Release(Point::new(x, y)))
    }

    /// Load `class` as panel `id` with no arguments
    pub fn load(id: impl Into<String>, class: impl Into<String>) -> Self {
        Msg::Panel(PanelMsg::Load {
            id: id.into(),
            class: class.into(),
            args: PanelArgs::new(),
            replace_active: false,
        })
    }
}
