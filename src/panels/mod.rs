//! Built-in panel modules
//!
//! Real content (file viewers, editors) is supplied by the host. These small
//! modules make the engine usable on its own and back the command-line driver.
//!
//! ## Available Panels
//!
//! - **InfoPanels/InfoPanel**: shows `title` and `text` arguments
//! - **EditorPanels/Notes**: a text note seeded from the `text` argument
//! - **ViewPanels/Blank**: an empty view

pub mod placeholder;

use crate::panel::{
    CleanupHook, ContentNode, ContentRoot, PanelArgs, PanelError, PanelFactory,
};

/// Register every built-in module with the factory
pub fn register_builtin_panels(factory: &mut PanelFactory) {
    factory.register_fn("InfoPanels/InfoPanel", info_panel);
    factory.register_fn("EditorPanels/Notes", notes_panel);
    factory.register_fn("ViewPanels/Blank", blank_panel);
}

fn info_panel(
    container: &mut ContentRoot,
    args: &PanelArgs,
) -> Result<Option<CleanupHook>, PanelError> {
    let title = args
        .get_str("title")
        .or_else(|| args.get_str("id"))
        .unwrap_or("Info");
    let mut children = vec![ContentNode::element("h1", vec![ContentNode::text(title)])];
    if let Some(text) = args.get_str("text") {
        children.push(ContentNode::element("p", vec![ContentNode::text(text)]));
    }
    container.push(ContentNode::element("section", children));
    Ok(None)
}

fn notes_panel(
    container: &mut ContentRoot,
    args: &PanelArgs,
) -> Result<Option<CleanupHook>, PanelError> {
    let text = args.get_str("text").unwrap_or_default();
    container.push(ContentNode::element(
        "textarea",
        vec![ContentNode::text(text)],
    ));
    let id = args.get_str("id").unwrap_or("Notes").to_string();
    Ok(Some(CleanupHook::new(move || {
        tracing::debug!("Notes panel {} released", id);
    })))
}

fn blank_panel(
    container: &mut ContentRoot,
    _args: &PanelArgs,
) -> Result<Option<CleanupHook>, PanelError> {
    container.push(ContentNode::element("div", Vec::new()));
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{LoadOutcome, PanelSource};

    #[test]
    fn test_builtin_info_panel_renders_title() {
        let mut factory = PanelFactory::new();
        register_builtin_panels(&mut factory);
        let mut root = ContentRoot::new();
        let handle = factory.instantiate(
            PanelSource::Named("InfoPanel"),
            &PanelArgs::new().with("title", "Welcome").with("text", "!"),
            &mut root,
        );
        assert!(!handle.is_placeholder());
        assert_eq!(root.text(), "Welcome!");
    }

    #[test]
    fn test_notes_panel_registers_cleanup() {
        let mut factory = PanelFactory::new();
        register_builtin_panels(&mut factory);
        let mut root = ContentRoot::new();
        let handle = factory.instantiate(PanelSource::Named("Notes"), &PanelArgs::new(), &mut root);
        assert_eq!(
            handle.outcome,
            LoadOutcome::Loaded {
                path: "EditorPanels/Notes".to_string()
            }
        );
        let cleanup = handle.cleanup.expect("notes panel registers a cleanup");
        cleanup.invoke();
    }
}
