//! Panel factory resolution, placeholders and loading panels into cells

mod common;

use common::{assert_valid, counting_model, load, panel_of, split, test_model, text_of};
use tilework::geometry::Axis;
use tilework::messages::{LayoutMsg, Msg, PanelMsg};
use tilework::panel::{
    ContentNode, ContentRoot, LoadError, LoadOutcome, ModuleShape, PanelArgs, PanelError,
    PanelFactory, PanelSource,
};
use tilework::update::update;

// ============================================================================
// Factory
// ============================================================================

#[test]
fn test_unknown_type_renders_placeholder() {
    let factory = PanelFactory::new();
    let mut root = ContentRoot::with_nodes(vec![ContentNode::text("stale")]);
    let handle = factory.instantiate(PanelSource::Named("Ghost"), &PanelArgs::new(), &mut root);
    assert!(handle.is_placeholder());
    assert!(handle.cleanup.is_none());
    assert_eq!(root.text(), "Ghost (no panel module found)");
}

#[test]
fn test_inert_module_renders_placeholder() {
    let mut factory = PanelFactory::new();
    factory.register_inert("ViewPanels/Empty");
    let mut root = ContentRoot::new();
    let handle = factory.instantiate(PanelSource::Named("Empty"), &PanelArgs::new(), &mut root);
    assert_eq!(
        handle.outcome,
        LoadOutcome::Placeholder {
            reason: "no setup entry point".to_string()
        }
    );
    assert_eq!(root.text(), "Empty (no setup entry point)");
}

#[test]
fn test_failed_setup_clears_partial_content() {
    let mut factory = PanelFactory::new();
    factory.register_fn("Broken", |container: &mut ContentRoot, _args: &PanelArgs| {
        container.push(ContentNode::text("half"));
        Err(PanelError::new("disk on fire"))
    });
    let mut root = ContentRoot::new();
    let handle = factory.instantiate(PanelSource::Named("Broken"), &PanelArgs::new(), &mut root);
    assert!(handle.is_placeholder());
    assert_eq!(root.text(), "Broken (setup failed: disk on fire)");
}

#[test]
fn test_failing_loader_renders_placeholder() {
    let mut factory = PanelFactory::new();
    factory.register_loader(
        "Flaky",
        Box::new(|| Err::<ModuleShape, _>(LoadError::Failed("timeout".to_string()))),
    );
    let mut root = ContentRoot::new();
    let handle = factory.instantiate(PanelSource::Named("Flaky"), &PanelArgs::new(), &mut root);
    assert!(handle.is_placeholder());
    assert_eq!(root.text(), "Flaky (module load failed: timeout)");
}

#[test]
fn test_explicit_category_prefix() {
    let mut factory = PanelFactory::new();
    factory.register_fn("InfoPanels/Welcome", |c: &mut ContentRoot, _: &PanelArgs| {
        c.push(ContentNode::text("hi"));
        Ok(None)
    });
    assert!(factory.is_registered("Welcome"));
    assert!(factory.is_registered("InfoPanels/Welcome"));
    assert!(!factory.is_registered("EditorPanels/Welcome"));

    let mut root = ContentRoot::new();
    let handle = factory.instantiate(
        PanelSource::Named("InfoPanels/Welcome"),
        &PanelArgs::new(),
        &mut root,
    );
    assert_eq!(
        handle.outcome,
        LoadOutcome::Loaded {
            path: "InfoPanels/Welcome".to_string()
        }
    );
}

#[test]
fn test_materialized_source_is_installed_as_is() {
    let factory = PanelFactory::new();
    let mut root = ContentRoot::new();
    let handle = factory.instantiate(
        PanelSource::Materialized(ContentNode::text("direct")),
        &PanelArgs::new(),
        &mut root,
    );
    assert_eq!(handle.outcome, LoadOutcome::Materialized);
    assert_eq!(root.text(), "direct");
}

// ============================================================================
// Loading into cells
// ============================================================================

#[test]
fn test_load_into_active_cell() {
    let mut model = test_model();
    update(
        &mut model,
        Msg::Panel(PanelMsg::Load {
            id: "Welcome".to_string(),
            class: String::new(),
            args: PanelArgs::new().with("text", "hello"),
            replace_active: false,
        }),
    );
    let cell = model.workspace.active_cell().unwrap();
    let identity = model.workspace.cell(cell).unwrap().identity().cloned().unwrap();
    assert_eq!(identity.id, "Welcome");
    // An empty class falls back to the configured default
    assert_eq!(identity.class, "InfoPanel");
    assert_eq!(text_of(&model, cell), "Welcomehello");
}

#[test]
fn test_unknown_class_still_binds_identity() {
    let mut model = test_model();
    load(&mut model, "Graph", "GraphView", "");
    let cell = model.workspace.active_cell().unwrap();
    assert_eq!(panel_of(&model, cell).as_deref(), Some("Graph"));
    assert_eq!(text_of(&model, cell), "GraphView (no panel module found)");
}

#[test]
fn test_reload_runs_previous_cleanup() {
    let (mut model, cleanups) = counting_model();
    load(&mut model, "A", "Counted", "a");
    load(&mut model, "B", "Counted", "b");
    assert_eq!(cleanups.get(), 1);
    let cell = model.workspace.active_cell().unwrap();
    assert_eq!(text_of(&model, cell), "b");
}

#[test]
fn test_open_panel_is_activated_not_duplicated() {
    let mut model = test_model();
    load(&mut model, "Files", "InfoPanel", "");
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));

    update(&mut model, Msg::load("Files", "InfoPanel"));
    assert_eq!(model.workspace.active_cell(), Some(cells[0]));
    assert!(model.workspace.cell(cells[1]).unwrap().is_vacant());
    assert_valid(&model);
}

#[test]
fn test_open_panel_hidden_by_fullscreen_is_revealed() {
    let mut model = test_model();
    load(&mut model, "Files", "InfoPanel", "");
    let cells = split(&mut model, Axis::Horizontal, 2);
    update(&mut model, Msg::Layout(LayoutMsg::Activate(cells[1])));
    update(&mut model, Msg::Layout(LayoutMsg::ToggleFullscreen));
    assert!(model.workspace.cell(cells[0]).unwrap().hidden);

    update(&mut model, Msg::load("Files", "InfoPanel"));
    assert_eq!(model.workspace.fullscreen, None);
    assert!(!model.workspace.cell(cells[0]).unwrap().hidden);
    assert_eq!(model.workspace.active_cell(), Some(cells[0]));
}

#[test]
fn test_load_without_active_cell_notifies() {
    let mut model = test_model();
    model.workspace.active = None;
    let cmd = update(&mut model, Msg::load("Files", "InfoPanel")).unwrap();
    assert_eq!(cmd.notices(), vec!["Please click on a cell first."]);
}
