//! Pointer sessions
//!
//! A session starts on press, receives every move and ends on release. At most
//! one exists at a time; it lives in `AppModel::drag`.

use super::tree::{CellId, DividerId, NodeId, Parent};
use crate::geometry::{Axis, Point, Rect};

/// Divider drag: everything captured at press time
#[derive(Debug, Clone, PartialEq)]
pub struct DividerDrag {
    pub divider: DividerId,
    pub parent: Parent,
    pub axis: Axis,
    pub before: NodeId,
    pub after: NodeId,
    /// Pointer coordinate along `axis` at press
    pub start: f32,
    /// Main-axis extents of the siblings at press
    pub start_before: f32,
    pub start_after: f32,
    /// Shares of the siblings at press
    pub start_share_before: f32,
    pub start_share_after: f32,
    /// Parent's extent available to nodes (dividers excluded)
    pub available: f32,
}

impl DividerDrag {
    /// Sibling extents for a pointer at `position`, or `None` when either
    /// would fall below `min_size`
    pub fn extents_at(&self, position: f32, min_size: f32) -> Option<(f32, f32)> {
        let delta = position - self.start;
        let before = self.start_before + delta;
        let after = self.start_after - delta;
        if before < min_size || after < min_size {
            return None;
        }
        Some((before, after))
    }

    /// Shares for a new `before` extent; the pair's combined share is kept
    pub fn shares_for(&self, before: f32) -> (f32, f32) {
        let combined = self.start_share_before + self.start_share_after;
        if self.available <= f32::EPSILON {
            return (self.start_share_before, self.start_share_after);
        }
        let share_before = (before / self.available * 100.0).clamp(0.0, combined);
        (share_before, combined - share_before)
    }
}

/// Floating panel drag by its header
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingDrag {
    /// Pointer position relative to the panel's top-left corner
    pub grab_offset: Point,
    /// Valid dock target under the pointer
    pub candidate: Option<CellId>,
}

/// Floating panel resize from one of its edges
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingResize {
    pub start: Point,
    pub start_rect: Rect,
}

/// The single active pointer session
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
    Divider(DividerDrag),
    Floating(FloatingDrag),
    FloatingResize(FloatingResize),
}
