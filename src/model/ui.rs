//! UI state - notices, hover and snap highlights, resize placeholders

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::tree::{CellId, DividerId};

/// How long a notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Number of past notices kept in the log
pub const NOTICE_LOG_CAPACITY: usize = 64;

/// Message shown to the user with auto-expiry
#[derive(Debug, Clone)]
pub struct TransientMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Stand-in painted over a cell while a divider drag is in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizePlaceholder {
    pub cell: CellId,
    pub label: String,
    /// Hue in degrees, 0..360
    pub hue: u16,
}

impl ResizePlaceholder {
    pub fn new(cell: CellId, label: impl Into<String>, index: usize) -> Self {
        let label = label.into();
        let hue = placeholder_hue(&label, index);
        Self { cell, label, hue }
    }
}

/// Deterministic hue for the placeholder at `index` labelled `label`
pub fn placeholder_hue(label: &str, index: usize) -> u16 {
    let key = format!("{}:{}", label, index);
    let hash = key
        .chars()
        .fold(0i32, |hash, c| hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32));
    (hash.unsigned_abs() % 360) as u16
}

/// UI state that is not part of the layout tree
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Latest notice, if still showing
    pub notice: Option<TransientMessage>,
    /// Most recent notices, oldest first, at most `NOTICE_LOG_CAPACITY`
    pub notice_log: VecDeque<String>,
    /// Divider under the pointer, independent of drag state
    pub hovered_divider: Option<DividerId>,
    /// Valid dock target under a dragged floating panel
    pub snap_highlight: Option<CellId>,
    /// Populated only while a divider drag is active
    pub resize_placeholders: Vec<ResizePlaceholder>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!("Notice: {}", text);
        if self.notice_log.len() == NOTICE_LOG_CAPACITY {
            self.notice_log.pop_front();
        }
        self.notice_log.push_back(text.clone());
        self.notice = Some(TransientMessage::new(text, NOTICE_DURATION));
    }

    /// Text of the current notice, if not expired
    pub fn current_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| !n.is_expired())
            .map(|n| n.text.as_str())
    }

    /// Drop an expired notice; true if one was dropped (needs redraw)
    pub fn expire_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(TransientMessage::is_expired) {
            self.notice = None;
            return true;
        }
        false
    }
}
