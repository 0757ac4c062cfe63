//! Application model - the complete state of the layout engine
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod drag;
pub mod floating;
pub mod layout;
pub mod tree;
pub mod ui;
pub mod workspace;

pub use drag::{DividerDrag, DragSession, FloatingDrag, FloatingResize};
pub use floating::FloatingPanel;
pub use layout::{DividerBar, LayoutSnapshot, DIVIDER_WIDTH};
pub use tree::{
    Cell, CellId, Divider, DividerId, FullscreenRestore, NodeId, Parent, Row, RowId, Slot,
};
pub use ui::{placeholder_hue, ResizePlaceholder, TransientMessage, UiState};
pub use workspace::{ActiveTarget, Detached, Workspace, ROOT_AXIS, SHARE_EPSILON};

use crate::commands::Cmd;
use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::panel::PanelFactory;
use crate::panels::register_builtin_panels;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Rows, cells, dividers, active target and floating panel
    pub workspace: Workspace,
    /// Notices and highlights
    pub ui: UiState,
    pub config: LayoutConfig,
    /// Registry used whenever content is (re)installed
    pub factory: PanelFactory,
    /// Area the workspace is laid out in
    pub viewport: Rect,
    /// Rectangles from the last relayout
    pub layout: LayoutSnapshot,
    /// The single pointer session, if one is in progress
    pub drag: Option<DragSession>,
}

impl AppModel {
    /// A single empty cell filling a `width` x `height` viewport, with the
    /// built-in panels registered
    pub fn new(width: f32, height: f32, config: LayoutConfig) -> Self {
        let mut factory = PanelFactory::new();
        register_builtin_panels(&mut factory);
        Self::with_workspace(Workspace::single_cell(), factory, config, width, height)
    }

    pub fn with_workspace(
        workspace: Workspace,
        factory: PanelFactory,
        config: LayoutConfig,
        width: f32,
        height: f32,
    ) -> Self {
        let mut model = Self {
            workspace,
            ui: UiState::new(),
            config,
            factory,
            viewport: Rect::new(0.0, 0.0, width, height),
            layout: LayoutSnapshot::default(),
            drag: None,
        };
        model.relayout();
        model
    }

    /// Recompute the layout snapshot from the current tree
    pub fn relayout(&mut self) {
        self.layout = self
            .workspace
            .compute_layout(self.viewport, self.config.divider_width);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Rect::new(self.viewport.x, self.viewport.y, width, height);
        self.relayout();
    }

    /// Record a notice and return the command that surfaces it
    pub fn notify(&mut self, text: impl Into<String>) -> Cmd {
        let text = text.into();
        self.ui.notify(text.clone());
        Cmd::Notice(text)
    }
}
