//! The single floating panel that holds undocked content

use super::tree::CellId;
use crate::geometry::Rect;
use crate::panel::{ContentRoot, PanelBinding, PanelIdentity};

/// Content lifted out of the tree, positioned freely over the workspace
#[derive(Debug)]
pub struct FloatingPanel {
    pub rect: Rect,
    /// Height of the drag header at the top of `rect`
    pub header_height: f32,
    pub content: ContentRoot,
    pub binding: Option<PanelBinding>,
    /// Cell the content was undocked from
    pub origin: CellId,
}

impl FloatingPanel {
    pub fn new(
        rect: Rect,
        header_height: f32,
        content: ContentRoot,
        binding: Option<PanelBinding>,
        origin: CellId,
    ) -> Self {
        Self {
            rect,
            header_height,
            content,
            binding,
            origin,
        }
    }

    /// The fixed region the panel is dragged by
    pub fn header_rect(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.header_height.min(self.rect.height),
        )
    }

    /// Everything below the header
    pub fn body_rect(&self) -> Rect {
        let header = self.header_rect();
        Rect::new(
            self.rect.x,
            header.bottom(),
            self.rect.width,
            (self.rect.height - header.height).max(0.0),
        )
    }

    pub fn identity(&self) -> Option<&PanelIdentity> {
        self.binding.as_ref().map(|b| &b.identity)
    }

    /// Header caption
    pub fn title(&self) -> String {
        match self.identity() {
            Some(identity) => format!("Undocked: {}", identity.id),
            None => "Undocked Panel".to_string(),
        }
    }

    /// Run the close hook and discard the content
    pub fn release(mut self) -> Option<PanelIdentity> {
        self.content.clear();
        self.binding.take().map(PanelBinding::release)
    }
}
