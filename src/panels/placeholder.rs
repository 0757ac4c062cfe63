//! Placeholder content for panels that could not be loaded
//!
//! Rendered by the factory whenever a module is missing, inert, fails to load
//! or fails during setup. The placeholder names the panel type and the reason
//! so the failure is visible in the layout instead of an empty cell.

use crate::panel::{ContentNode, ContentRoot};

/// Render a placeholder into `container`
pub fn render(container: &mut ContentRoot, panel_type: &str, reason: &str) {
    container.push(ContentNode::Placeholder {
        panel_type: panel_type.to_string(),
        reason: reason.to_string(),
    });
}
