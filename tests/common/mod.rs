//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell as Counter;
use std::rc::Rc;

use tilework::config::LayoutConfig;
use tilework::geometry::Axis;
use tilework::messages::{Msg, PanelMsg};
use tilework::model::{AppModel, CellId, NodeId, Parent, Workspace};
use tilework::panel::{CleanupHook, ContentNode, PanelArgs, PanelFactory};
use tilework::panels::register_builtin_panels;
use tilework::update::update;

/// Viewport width that leaves exactly 800 units for two cells and a divider
pub const WIDTH: f32 = 806.0;
pub const HEIGHT: f32 = 600.0;

/// Float comparison tolerance for shares and extents
pub const EPS: f32 = 1e-2;

/// A single empty, active cell in a 806x600 viewport
pub fn test_model() -> AppModel {
    AppModel::new(WIDTH, HEIGHT, LayoutConfig::default())
}

/// Factory with the built-in panels plus `Counted`, whose cleanup bumps the
/// returned counter each time it runs
pub fn counting_factory() -> (PanelFactory, Rc<Counter<usize>>) {
    let mut factory = PanelFactory::new();
    register_builtin_panels(&mut factory);
    let count = Rc::new(Counter::new(0));
    let hook_count = count.clone();
    factory.register_fn("Counted", move |container, args| {
        let text = args.get_str("text").unwrap_or_default().to_string();
        container.push(ContentNode::text(text));
        let count = hook_count.clone();
        Ok(Some(CleanupHook::new(move || count.set(count.get() + 1))))
    });
    (factory, count)
}

/// Model whose factory also knows the `Counted` panel
pub fn counting_model() -> (AppModel, Rc<Counter<usize>>) {
    let (factory, count) = counting_factory();
    let model = AppModel::with_workspace(
        Workspace::single_cell(),
        factory,
        LayoutConfig::default(),
        WIDTH,
        HEIGHT,
    );
    (model, count)
}

/// Load `class` as panel `id` into the active cell with a `text` argument
pub fn load(model: &mut AppModel, id: &str, class: &str, text: &str) {
    update(
        model,
        Msg::Panel(PanelMsg::Load {
            id: id.to_string(),
            class: class.to_string(),
            args: PanelArgs::new().with("text", text),
            replace_active: true,
        }),
    );
}

/// Split the active cell and return the new row's cells in order
pub fn split(model: &mut AppModel, axis: Axis, count: usize) -> Vec<CellId> {
    update(model, Msg::split(axis, count));
    let active = model.workspace.active_cell().expect("split leaves an active cell");
    match model.workspace.parent_of(NodeId::Cell(active)) {
        Some(Parent::Row(row)) => model.workspace.cell_children(row),
        other => panic!("split cell has unexpected parent {:?}", other),
    }
}

/// Sum of node shares inside `parent`
pub fn share_sum(workspace: &Workspace, parent: Parent) -> f32 {
    workspace
        .child_nodes(parent)
        .into_iter()
        .filter_map(|node| workspace.share_of(node))
        .sum()
}

/// Main-axis width of a cell in the current layout
pub fn width_of(model: &AppModel, cell: CellId) -> f32 {
    model
        .layout
        .cell_rect(cell)
        .unwrap_or_else(|| panic!("{:?} has no rect", cell))
        .width
}

/// Content text of a cell
pub fn text_of(model: &AppModel, cell: CellId) -> String {
    model
        .workspace
        .cell(cell)
        .map(|c| c.content.text())
        .unwrap_or_default()
}

/// Identity id of a cell, if it shows a panel
pub fn panel_of(model: &AppModel, cell: CellId) -> Option<String> {
    model
        .workspace
        .cell(cell)
        .and_then(|c| c.identity())
        .map(|identity| identity.id.clone())
}

/// Center of the divider that follows `before`
pub fn divider_center(model: &AppModel, before: CellId) -> (f32, f32) {
    let divider = model
        .workspace
        .dividers()
        .find(|d| d.before == NodeId::Cell(before))
        .unwrap_or_else(|| panic!("no divider after {:?}", before));
    let bar = model
        .layout
        .dividers
        .iter()
        .find(|bar| bar.id == divider.id)
        .expect("divider is laid out");
    (
        bar.rect.x + bar.rect.width / 2.0,
        bar.rect.y + bar.rect.height / 2.0,
    )
}

pub fn assert_valid(model: &AppModel) {
    if let Err(e) = model.workspace.validate() {
        panic!("workspace invariant violated: {}", e);
    }
}
