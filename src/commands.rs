//! Commands returned by `update` for the host to act on

use crate::model::CellId;
use crate::panel::PanelIdentity;

/// Layout events the host may forward to interested panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The active target changed; `cell` is `None` for the floating panel
    ActivePanelChanged {
        cell: Option<CellId>,
        identity: Option<PanelIdentity>,
    },
    /// The active cell or floating panel was closed
    ActivePanelClosed { identity: Option<PanelIdentity> },
    /// Floating content was docked into `cell`
    Docked {
        cell: CellId,
        identity: Option<PanelIdentity>,
    },
    /// A cell's content moved into the floating panel
    Undocked {
        origin: CellId,
        identity: Option<PanelIdentity>,
    },
}

/// Side effects requested by an update
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Layout or content changed; repaint
    Redraw,
    /// Show a notice to the user
    Notice(String),
    /// Deliver a layout event
    Emit(LayoutEvent),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Cmd::Notice(text.into())
    }

    /// Redraw plus an event
    pub fn redraw_with(event: LayoutEvent) -> Self {
        Cmd::Batch(vec![Cmd::Redraw, Cmd::Emit(event)])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Notices are painted on top of the layout
            Cmd::Notice(_) => true,
            Cmd::Emit(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::needs_redraw),
        }
    }

    /// Every notice in this command, in order
    pub fn notices(&self) -> Vec<&str> {
        match self {
            Cmd::Notice(text) => vec![text.as_str()],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::notices).collect(),
            _ => Vec::new(),
        }
    }

    /// Every event in this command, in order
    pub fn events(&self) -> Vec<&LayoutEvent> {
        match self {
            Cmd::Emit(event) => vec![event],
            Cmd::Batch(cmds) => cmds.iter().flat_map(Cmd::events).collect(),
            _ => Vec::new(),
        }
    }
}
