//! Text and JSON views of the model
//!
//! The layout engine never paints. These views are what the command-line
//! driver prints after a script has run, and what tests compare against.

use std::fmt::Write as _;

use serde::Serialize;

use crate::geometry::{Axis, Rect};
use crate::model::{ActiveTarget, AppModel, NodeId, Slot};

/// Serializable mirror of the visible tree
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeView {
    Row {
        id: u64,
        axis: Axis,
        share: f32,
        hidden: bool,
        rect: Option<Rect>,
        children: Vec<NodeView>,
    },
    Cell {
        id: u64,
        share: f32,
        hidden: bool,
        active: bool,
        rect: Option<Rect>,
        #[serde(skip_serializing_if = "Option::is_none")]
        panel: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        content: String,
    },
    Divider {
        id: u64,
        axis: Axis,
        rect: Option<Rect>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingView {
    pub title: String,
    pub rect: Rect,
    pub origin: u64,
    pub active: bool,
    pub content: String,
}

/// Everything the driver reports
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    pub viewport: Rect,
    pub rows: Vec<NodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating: Option<FloatingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<u64>,
    pub notices: Vec<String>,
}

impl WorkspaceView {
    pub fn capture(model: &AppModel) -> Self {
        let workspace = &model.workspace;
        let rows = workspace
            .root_items()
            .iter()
            .filter_map(|slot| slot_view(model, *slot))
            .collect();
        let floating = workspace.floating.as_ref().map(|panel| FloatingView {
            title: panel.title(),
            rect: panel.rect,
            origin: panel.origin.0,
            active: workspace.active == Some(ActiveTarget::Floating),
            content: panel.content.text(),
        });
        Self {
            viewport: model.viewport,
            rows,
            floating,
            fullscreen: workspace.fullscreen.map(|id| id.0),
            notices: model.ui.notice_log.iter().cloned().collect(),
        }
    }
}

fn slot_view(model: &AppModel, slot: Slot) -> Option<NodeView> {
    let workspace = &model.workspace;
    let layout = &model.layout;
    match slot {
        Slot::Divider(id) => {
            let divider = workspace.divider(id)?;
            let rect = layout
                .dividers
                .iter()
                .find(|bar| bar.id == id)
                .map(|bar| bar.rect);
            Some(NodeView::Divider {
                id: id.0,
                axis: divider.axis,
                rect,
            })
        }
        Slot::Node(NodeId::Row(id)) => {
            let row = workspace.row(id)?;
            let children = row
                .items
                .iter()
                .filter_map(|slot| slot_view(model, *slot))
                .collect();
            Some(NodeView::Row {
                id: id.0,
                axis: row.axis,
                share: row.share,
                hidden: row.hidden,
                rect: layout.rows.get(&id).copied(),
                children,
            })
        }
        Slot::Node(NodeId::Cell(id)) => {
            let cell = workspace.cell(id)?;
            let identity = cell.identity();
            Some(NodeView::Cell {
                id: id.0,
                share: cell.share,
                hidden: cell.hidden,
                active: workspace.is_active(id),
                rect: layout.cell_rect(id),
                panel: identity.map(|i| i.id.clone()),
                class: identity.map(|i| i.class.clone()),
                content: cell.content.text(),
            })
        }
    }
}

/// Render the workspace as an indented outline
pub fn render_outline(model: &AppModel) -> String {
    let view = WorkspaceView::capture(model);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "workspace {} ({})",
        format_rect(Some(view.viewport)),
        crate::model::ROOT_AXIS.name()
    );
    for node in &view.rows {
        outline_node(&mut out, node, 1);
    }
    if let Some(floating) = &view.floating {
        let _ = writeln!(
            out,
            "floating \"{}\" {}{}",
            floating.title,
            format_rect(Some(floating.rect)),
            if floating.active { " *" } else { "" }
        );
    }
    if let Some(cell) = view.fullscreen {
        let _ = writeln!(out, "fullscreen cell#{}", cell);
    }
    for notice in &view.notices {
        let _ = writeln!(out, "notice: {}", notice);
    }
    out
}

fn outline_node(out: &mut String, node: &NodeView, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        NodeView::Row {
            id,
            axis,
            share,
            hidden,
            rect,
            children,
        } => {
            let _ = writeln!(
                out,
                "{}row#{} {} {:.1}% {}{}",
                indent,
                id,
                axis.name(),
                share,
                format_rect(*rect),
                if *hidden { " hidden" } else { "" }
            );
            for child in children {
                outline_node(out, child, depth + 1);
            }
        }
        NodeView::Cell {
            id,
            share,
            hidden,
            active,
            rect,
            panel,
            class,
            content,
        } => {
            let mut line = format!("{}cell#{} {:.1}% {}", indent, id, share, format_rect(*rect));
            if let (Some(panel), Some(class)) = (panel, class) {
                let _ = write!(line, " [{}: {}]", class, panel);
            } else if !content.is_empty() {
                let _ = write!(line, " \"{}\"", content);
            }
            if *hidden {
                line.push_str(" hidden");
            }
            if *active {
                line.push_str(" *");
            }
            let _ = writeln!(out, "{}", line);
        }
        NodeView::Divider { id, rect, .. } => {
            let _ = writeln!(out, "{}| divider#{} {}", indent, id, format_rect(*rect));
        }
    }
}

fn format_rect(rect: Option<Rect>) -> String {
    match rect {
        Some(r) => format!("@{:.0},{:.0} {:.0}x{:.0}", r.x, r.y, r.width, r.height),
        None => "-".to_string(),
    }
}

/// Render the workspace as pretty-printed JSON
pub fn render_json(model: &AppModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&WorkspaceView::capture(model))
}
