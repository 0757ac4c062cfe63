//! Declarative layout presets
//!
//! A preset describes the initial tree: rows with an axis and children, cells
//! with a panel id and class. Flex weights become shares, dividers are wired
//! between siblings and every cell's panel is instantiated through the
//! factory. Presets are read-only; the engine never writes them back.
//!
//! ```yaml
//! type: row
//! axis: vertical
//! children:
//!   - type: row
//!     axis: horizontal
//!     flex: 3
//!     children:
//!       - { type: cell, id: Files, panel_class: InfoPanel }
//!       - { type: cell, id: Notes, panel_class: Notes, flex: 2 }
//!   - { type: cell, id: Console }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LayoutConfig;
use crate::geometry::Axis;
use crate::model::{CellId, NodeId, Parent, Workspace};
use crate::panel::{PanelArgs, PanelFactory};
use crate::update::panel::install_panel;

/// Errors from reading or building a preset
#[derive(Debug, Clone, PartialEq)]
pub enum PresetError {
    Io(String),
    Parse(String),
    /// A row with no children
    EmptyRow,
    /// A flex weight that is not a positive number
    InvalidFlex(f32),
}

impl PresetError {
    pub fn user_message(&self, source: &str) -> String {
        match self {
            Self::Io(msg) => format!("Could not read layout {}: {}", source, msg),
            Self::Parse(msg) => format!("Invalid layout {}: {}", source, msg),
            Self::EmptyRow => format!("Layout {} contains an empty row", source),
            Self::InvalidFlex(value) => {
                format!("Layout {} has an invalid flex weight {}", source, value)
            }
        }
    }
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::EmptyRow => write!(f, "row has no children"),
            Self::InvalidFlex(value) => write!(f, "invalid flex weight: {}", value),
        }
    }
}

impl std::error::Error for PresetError {}

fn default_axis() -> Axis {
    Axis::Horizontal
}

/// A node of a preset tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresetNode {
    Row {
        #[serde(default = "default_axis", alias = "direction")]
        axis: Axis,
        #[serde(default)]
        flex: Option<f32>,
        children: Vec<PresetNode>,
    },
    Cell(PresetCell),
}

/// A leaf of a preset tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetCell {
    #[serde(alias = "instanceName", alias = "instance_name")]
    pub id: String,
    /// Panel module to load; the configured default when absent
    #[serde(default, alias = "panelClass")]
    pub panel_class: Option<String>,
    #[serde(default)]
    pub flex: Option<f32>,
    /// Extra setup arguments for the panel
    #[serde(default, alias = "panelVars")]
    pub vars: Map<String, Value>,
}

impl PresetNode {
    fn flex(&self) -> Option<f32> {
        match self {
            PresetNode::Row { flex, .. } => *flex,
            PresetNode::Cell(cell) => cell.flex,
        }
    }
}

/// A parsed layout preset
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPreset {
    pub root: PresetNode,
}

impl LayoutPreset {
    /// Read a preset file; `.json` files are parsed as JSON, anything else
    /// as YAML
    pub fn from_path(path: &Path) -> Result<Self, PresetError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PresetError::Io(e.to_string()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, PresetError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| PresetError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, PresetError> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| PresetError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Accepts the tree itself or the tree under a `workspace` or `layout` key
    fn from_value(mut value: Value) -> Result<Self, PresetError> {
        for key in ["workspace", "layout"] {
            if let Some(inner) = value.get_mut(key).map(Value::take) {
                value = inner;
                break;
            }
        }
        let root = serde_json::from_value(value).map_err(|e| PresetError::Parse(e.to_string()))?;
        Ok(Self { root })
    }

    /// Build a workspace from this preset and load every cell's panel.
    ///
    /// A vertical root row supplies the top-level rows directly; any other
    /// root becomes the single top-level row. The first cell is activated.
    pub fn build(
        &self,
        factory: &PanelFactory,
        config: &LayoutConfig,
    ) -> Result<Workspace, PresetError> {
        let mut workspace = Workspace::new();
        let mut cells = Vec::new();

        match &self.root {
            PresetNode::Row {
                axis: Axis::Vertical,
                children,
                ..
            } => {
                let shares = shares_for(children)?;
                for (child, share) in children.iter().zip(shares) {
                    attach_top_row(&mut workspace, child, share, &mut cells)?;
                }
            }
            other => attach_top_row(&mut workspace, other, 100.0, &mut cells)?,
        }

        for (cell, preset) in &cells {
            let class = preset
                .panel_class
                .as_deref()
                .unwrap_or(&config.default_panel_class);
            let args = PanelArgs::from_map(preset.vars.clone());
            install_panel(factory, &mut workspace, *cell, &preset.id, class, &args);
        }

        if let Some((first, _)) = cells.first() {
            workspace.activate_cell(*first);
        }
        tracing::info!(
            "Built preset layout: {} rows, {} cells",
            workspace.row_count(),
            workspace.cell_count()
        );
        Ok(workspace)
    }
}

/// Percent shares from flex weights (missing weights count as 1)
fn shares_for(children: &[PresetNode]) -> Result<Vec<f32>, PresetError> {
    if children.is_empty() {
        return Err(PresetError::EmptyRow);
    }
    let weights: Vec<f32> = children
        .iter()
        .map(|child| child.flex().unwrap_or(1.0))
        .collect();
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
        return Err(PresetError::InvalidFlex(*bad));
    }
    let total: f32 = weights.iter().sum();
    Ok(weights.iter().map(|w| w / total * 100.0).collect())
}

/// Top-level entries must be rows; a bare cell gets a horizontal row of its own
fn attach_top_row<'a>(
    workspace: &mut Workspace,
    node: &'a PresetNode,
    share: f32,
    cells: &mut Vec<(CellId, &'a PresetCell)>,
) -> Result<(), PresetError> {
    match node {
        PresetNode::Row { .. } => attach(workspace, Parent::Root, node, share, cells),
        PresetNode::Cell(cell) => {
            let row = workspace.alloc_row(Axis::Horizontal, share);
            push(workspace, Parent::Root, NodeId::Row(row))?;
            let id = workspace.alloc_cell(100.0);
            push(workspace, Parent::Row(row), NodeId::Cell(id))?;
            cells.push((id, cell));
            Ok(())
        }
    }
}

fn attach<'a>(
    workspace: &mut Workspace,
    parent: Parent,
    node: &'a PresetNode,
    share: f32,
    cells: &mut Vec<(CellId, &'a PresetCell)>,
) -> Result<(), PresetError> {
    match node {
        PresetNode::Row { axis, children, .. } => {
            let shares = shares_for(children)?;
            let row = workspace.alloc_row(*axis, share);
            push(workspace, parent, NodeId::Row(row))?;
            for (child, child_share) in children.iter().zip(shares) {
                attach(workspace, Parent::Row(row), child, child_share, cells)?;
            }
            Ok(())
        }
        PresetNode::Cell(cell) => {
            let id = workspace.alloc_cell(share);
            push(workspace, parent, NodeId::Cell(id))?;
            cells.push((id, cell));
            Ok(())
        }
    }
}

fn push(workspace: &mut Workspace, parent: Parent, node: NodeId) -> Result<(), PresetError> {
    workspace
        .push_node(parent, node)
        .map(|_| ())
        .map_err(|e| PresetError::Parse(e.to_string()))
}
