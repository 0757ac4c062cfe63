//! Tests for split, merge, close and append

mod common;

use common::{
    assert_valid, counting_model, load, panel_of, share_sum, split, test_model, width_of, EPS,
    WIDTH,
};
use tilework::commands::LayoutEvent;
use tilework::config::{LayoutConfig, MergeCleanupPolicy};
use tilework::geometry::Axis;
use tilework::messages::{LayoutMsg, Msg};
use tilework::model::{AppModel, NodeId, Parent, Workspace};
use tilework::update::update;

// ============================================================================
// Split Operations
// ============================================================================

#[test]
fn test_split_replaces_cell_with_row() {
    let mut model = test_model();
    let original = model.workspace.active_cell().unwrap();
    let top = model.workspace.top_rows()[0];

    let cells = split(&mut model, Axis::Vertical, 3);
    assert_eq!(cells.len(), 3);
    assert!(!cells.contains(&original));

    // The new row sits where the cell was, with the cell's share
    let nodes = model.workspace.child_nodes(Parent::Row(top));
    assert_eq!(nodes.len(), 1);
    let NodeId::Row(row) = nodes[0] else {
        panic!("expected a nested row, got {:?}", nodes[0]);
    };
    let row = model.workspace.row(row).unwrap();
    assert_eq!(row.axis, Axis::Vertical);
    assert_eq!(row.share, 100.0);
    assert_eq!(row.dividers().count(), 2);
    assert!((share_sum(&model.workspace, Parent::Row(row.id)) - 100.0).abs() < EPS);
    assert_valid(&model);
}

#[test]
fn test_split_invalid_count_notifies() {
    let mut model = test_model();
    let cmd = update(&mut model, Msg::split(Axis::Horizontal, 0)).unwrap();
    assert_eq!(cmd.notices(), vec!["Invalid number."]);
    assert_eq!(model.workspace.cell_count(), 1);
    assert_eq!(model.ui.current_notice(), Some("Invalid number."));
}

#[test]
fn test_split_one_changes_nothing() {
    let mut model = test_model();
    let before = model.workspace.cells_in_order();
    assert!(update(&mut model, Msg::split(Axis::Horizontal, 1)).is_none());
    assert_eq!(model.workspace.cells_in_order(), before);
}

#[test]
fn test_split_without_active_cell() {
    let mut model = test_model();
    model.workspace.active = None;
    let cmd = update(&mut model, Msg::split(Axis::Horizontal, 2)).unwrap();
    assert_eq!(cmd.notices(), vec!["Please click on a cell first."]);
    assert_eq!(model.workspace.cell_count(), 1);
}

#[test]
fn test_split_nested_cell_inherits_share_and_dividers() {
    let mut model = test_model();
    let outer = split(&mut model, Axis::Horizontal, 2);
    let width = width_of(&model, outer[1]);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(outer[1])));
    let inner = split(&mut model, Axis::Vertical, 2);

    for cell in &inner {
        assert!((width_of(&model, *cell) - width).abs() < EPS);
    }
    // The outer divider now binds the first cell and the nested row
    let parent = model.workspace.parent_of(NodeId::Cell(inner[0])).unwrap();
    let Parent::Row(nested) = parent else {
        panic!("nested cells live in a row");
    };
    assert!(model
        .workspace
        .dividers()
        .any(|d| d.before == NodeId::Cell(outer[0]) && d.after == NodeId::Row(nested)));
    assert_valid(&model);
}

#[test]
fn test_split_emits_activation_event() {
    let mut model = test_model();
    load(&mut model, "A", "Notes", "a");
    let cmd = update(&mut model, Msg::split(Axis::Horizontal, 2)).unwrap();
    let first = model.workspace.active_cell().unwrap();
    assert!(cmd.events().iter().any(|e| matches!(
        e,
        LayoutEvent::ActivePanelChanged { cell: Some(cell), identity: Some(identity) }
            if *cell == first && identity.id == "A"
    )));
}

// ============================================================================
// Merge Operations
// ============================================================================

#[test]
fn test_merge_single_cell_notifies() {
    let mut model = test_model();
    let cmd = update(&mut model, Msg::Layout(LayoutMsg::MergeActive)).unwrap();
    assert_eq!(cmd.notices(), vec!["No other cells to merge with."]);
}

#[test]
fn test_merge_drops_extra_cleanups_by_default() {
    let (mut model, cleanups) = counting_model();
    let cells = split(&mut model, Axis::Horizontal, 3);
    for (cell, id) in cells.iter().zip(["a", "b", "c"]) {
        update(&mut model, Msg::Layout(LayoutMsg::Activate(*cell)));
        load(&mut model, id, "Counted", id);
    }
    update(&mut model, Msg::Layout(LayoutMsg::MergeActive));
    assert_eq!(cleanups.get(), 0);

    // The surviving cleanup is the first cell's and runs on close
    update(&mut model, Msg::Layout(LayoutMsg::CloseActive));
    assert_eq!(cleanups.get(), 1);
}

#[test]
fn test_merge_invoke_policy_runs_extra_cleanups() {
    let (mut model, cleanups) = counting_model();
    model.config.merge_cleanup = MergeCleanupPolicy::Invoke;
    let cells = split(&mut model, Axis::Horizontal, 3);
    for (cell, id) in cells.iter().zip(["a", "b", "c"]) {
        update(&mut model, Msg::Layout(LayoutMsg::Activate(*cell)));
        load(&mut model, id, "Counted", id);
    }
    update(&mut model, Msg::Layout(LayoutMsg::MergeActive));
    assert_eq!(cleanups.get(), 2);
    let merged = model.workspace.active_cell().unwrap();
    assert_eq!(panel_of(&model, merged).as_deref(), Some("a"));
}

#[test]
fn test_merge_keeps_nested_rows() {
    let mut model = test_model();
    let outer = split(&mut model, Axis::Horizontal, 3);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(outer[1])));
    split(&mut model, Axis::Vertical, 2);

    update(&mut model, Msg::Layout(LayoutMsg::Activate(outer[0])));
    update(&mut model, Msg::Layout(LayoutMsg::MergeActive));

    // outer[0] and outer[2] merged; the nested row survives beside them
    let merged = model.workspace.active_cell().unwrap();
    let Some(Parent::Row(row)) = model.workspace.parent_of(NodeId::Cell(merged)) else {
        panic!("merged cell lives in a row");
    };
    let nodes = model.workspace.child_nodes(Parent::Row(row));
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0], NodeId::Cell(merged));
    assert!(matches!(nodes[1], NodeId::Row(_)));
    assert_eq!(model.workspace.row(row).unwrap().dividers().count(), 1);
    assert!((share_sum(&model.workspace, Parent::Row(row)) - 100.0).abs() < EPS);
    assert_valid(&model);
}

// ============================================================================
// Close Operations
// ============================================================================

#[test]
fn test_close_runs_cleanup_once_and_renormalizes() {
    let (mut model, cleanups) = counting_model();
    load(&mut model, "A", "Counted", "a");
    let cells = split(&mut model, Axis::Horizontal, 3);
    let Some(Parent::Row(row)) = model.workspace.parent_of(NodeId::Cell(cells[0])) else {
        panic!("cells live in a row");
    };

    let cmd = update(&mut model, Msg::Layout(LayoutMsg::CloseActive)).unwrap();
    assert_eq!(cleanups.get(), 1);
    assert!(cmd.events().iter().any(|e| matches!(
        e,
        LayoutEvent::ActivePanelClosed { identity: Some(identity) } if identity.id == "A"
    )));
    assert!(model.workspace.cell(cells[0]).is_none());
    assert_eq!(model.workspace.active, None);
    assert_eq!(model.workspace.row(row).unwrap().dividers().count(), 1);
    for cell in &cells[1..] {
        let share = model.workspace.share_of(NodeId::Cell(*cell)).unwrap();
        assert!((share - 50.0).abs() < EPS);
    }
    assert_valid(&model);
}

#[test]
fn test_close_middle_cell_removes_preceding_divider() {
    let mut model = test_model();
    let cells = split(&mut model, Axis::Horizontal, 3);
    let first_divider = model
        .workspace
        .dividers()
        .find(|d| d.before == NodeId::Cell(cells[0]))
        .map(|d| d.id)
        .unwrap();
    let second_divider = model
        .workspace
        .dividers()
        .find(|d| d.before == NodeId::Cell(cells[1]))
        .map(|d| d.id)
        .unwrap();

    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));
    update(&mut model, Msg::Layout(LayoutMsg::CloseActive));

    assert!(model.workspace.divider(first_divider).is_none());
    let survivor = model.workspace.divider(second_divider).unwrap();
    assert_eq!(survivor.before, NodeId::Cell(cells[0]));
    assert_eq!(survivor.after, NodeId::Cell(cells[2]));
    assert!(model.workspace.divider_is_live(second_divider));
    assert_valid(&model);
}

#[test]
fn test_close_last_cell_prunes_rows() {
    let mut model = test_model();
    update(&mut model, Msg::Layout(LayoutMsg::CloseActive));
    assert!(model.workspace.is_empty());
    assert_eq!(model.workspace.row_count(), 0);
    assert!(model.layout.cells.is_empty());
    assert_valid(&model);

    let cmd = update(&mut model, Msg::Layout(LayoutMsg::CloseActive)).unwrap();
    assert_eq!(cmd.notices(), vec!["Nothing is active."]);
}

#[test]
fn test_close_prunes_emptied_nested_row() {
    let preset = tilework::preset::LayoutPreset::from_yaml_str(
        r#"
type: row
axis: vertical
children:
  - { type: cell, id: Top }
  - { type: cell, id: Bottom }
"#,
    )
    .unwrap();
    let (factory, _) = common::counting_factory();
    let config = LayoutConfig::default();
    let workspace = preset.build(&factory, &config).unwrap();
    let mut model = AppModel::with_workspace(workspace, factory, config, WIDTH, 606.0);
    assert_eq!(model.workspace.top_rows().len(), 2);

    // The first cell is active after a preset build
    update(&mut model, Msg::Layout(LayoutMsg::CloseActive));
    assert_eq!(model.workspace.top_rows().len(), 1);
    assert_eq!(model.workspace.divider_count(), 0);
    let remaining = model.workspace.cells_in_order();
    assert_eq!(panel_of(&model, remaining[0]).as_deref(), Some("Bottom"));
    assert!((model.layout.cell_rect(remaining[0]).unwrap().height - 606.0).abs() < EPS);
    assert_valid(&model);
}

// ============================================================================
// Append
// ============================================================================

#[test]
fn test_append_halves_last_cell() {
    let mut model = test_model();
    let first = model.workspace.active_cell().unwrap();
    update(&mut model, Msg::Layout(LayoutMsg::AppendCell));

    assert_eq!(model.workspace.cell_count(), 2);
    assert_eq!(model.workspace.active_cell(), Some(first));
    let cells = model.workspace.cells_in_order();
    assert!((width_of(&model, cells[0]) - 400.0).abs() < EPS);
    assert!((width_of(&model, cells[1]) - 400.0).abs() < EPS);
    assert_valid(&model);
}

#[test]
fn test_append_into_empty_workspace() {
    let mut model = AppModel::with_workspace(
        Workspace::new(),
        Default::default(),
        LayoutConfig::default(),
        WIDTH,
        600.0,
    );
    update(&mut model, Msg::Layout(LayoutMsg::AppendCell));
    let cell = model.workspace.active_cell().expect("appended cell is active");
    assert_eq!(
        model.layout.cell_rect(cell).map(|r| r.width),
        Some(WIDTH)
    );
    assert_valid(&model);
}
