//! Tests for entering and leaving fullscreen

mod common;

use common::{assert_valid, load, split, test_model, width_of, EPS, HEIGHT, WIDTH};
use tilework::geometry::{Axis, Rect};
use tilework::messages::{LayoutMsg, Msg};
use tilework::model::NodeId;
use tilework::update::update;

fn toggle() -> Msg {
    Msg::Layout(LayoutMsg::ToggleFullscreen)
}

#[test]
fn test_fullscreen_covers_viewport_and_restores() {
    let mut model = test_model();
    let cells = split(&mut model, Axis::Horizontal, 3);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));
    let widths: Vec<f32> = cells.iter().map(|c| width_of(&model, *c)).collect();
    let share = model.workspace.share_of(NodeId::Cell(cells[1]));

    update(&mut model, toggle());
    assert_eq!(model.workspace.fullscreen, Some(cells[1]));
    assert_eq!(
        model.layout.cell_rect(cells[1]),
        Some(Rect::new(0.0, 0.0, WIDTH, HEIGHT))
    );
    assert_eq!(model.layout.cells.len(), 1);
    assert!(model.layout.dividers.is_empty());
    assert!(model.workspace.cell(cells[0]).unwrap().hidden);
    assert!(model.workspace.cell(cells[2]).unwrap().hidden);
    assert!(!model.workspace.cell(cells[1]).unwrap().hidden);
    assert_valid(&model);

    update(&mut model, toggle());
    assert_eq!(model.workspace.fullscreen, None);
    assert_eq!(model.workspace.share_of(NodeId::Cell(cells[1])), share);
    assert!(model.workspace.cells().all(|c| !c.hidden));
    for (cell, width) in cells.iter().zip(widths) {
        assert!((width_of(&model, *cell) - width).abs() < EPS);
    }
    assert_valid(&model);
}

#[test]
fn test_fullscreen_hides_ancestor_siblings() {
    let mut model = test_model();
    let outer = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(outer[1])));
    let inner = split(&mut model, Axis::Vertical, 2);

    update(&mut model, toggle());
    assert!(model.workspace.cell(outer[0]).unwrap().hidden);
    assert!(model.workspace.cell(inner[1]).unwrap().hidden);
    let restore = model
        .workspace
        .cell(inner[0])
        .unwrap()
        .fullscreen
        .clone()
        .expect("restore record");
    assert_eq!(restore.index, 0);
    assert_eq!(restore.hidden.len(), 2);

    update(&mut model, toggle());
    assert!(model.workspace.cells().all(|c| !c.hidden));
    assert!(model.workspace.rows().all(|r| !r.hidden));
    assert_valid(&model);
}

#[test]
fn test_second_fullscreen_is_refused() {
    let mut model = test_model();
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, toggle());
    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));

    let cmd = update(&mut model, toggle()).unwrap();
    assert_eq!(cmd.notices(), vec!["Another panel is already fullscreen."]);
    assert_eq!(model.workspace.fullscreen, Some(cells[0]));
}

#[test]
fn test_fullscreen_refused_while_floating() {
    let mut model = test_model();
    load(&mut model, "A", "Notes", "a");
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, Msg::Layout(LayoutMsg::UndockActive));
    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));

    let cmd = update(&mut model, toggle()).unwrap();
    assert_eq!(cmd.notices(), vec!["Dock or close the undocked panel first."]);
    assert_eq!(model.workspace.fullscreen, None);
}

#[test]
fn test_split_leaves_fullscreen_first() {
    let mut model = test_model();
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, toggle());

    let inner = split(&mut model, Axis::Vertical, 2);
    assert_eq!(model.workspace.fullscreen, None);
    assert!(model.workspace.cells().all(|c| !c.hidden));
    assert!(model.layout.cell_rect(cells[1]).is_some());
    assert!(model.layout.cell_rect(inner[1]).is_some());
    assert_valid(&model);
}

#[test]
fn test_close_fullscreen_cell() {
    let mut model = test_model();
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, toggle());
    update(&mut model, Msg::Layout(LayoutMsg::CloseActive));

    assert_eq!(model.workspace.fullscreen, None);
    assert!(model.workspace.cell(cells[0]).is_none());
    assert!(!model.workspace.cell(cells[1]).unwrap().hidden);
    assert!((width_of(&model, cells[1]) - WIDTH).abs() < EPS);
    assert_valid(&model);
}
