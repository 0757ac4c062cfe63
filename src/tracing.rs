//! Tracing setup and layout diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=layout=debug,message=debug` - scoped filtering
//! - `RUST_LOG=tilework::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tilework/logs/tilework.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{ActiveTarget, Workspace};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). Console output goes to
/// stderr so it never mixes with the layout the CLI prints.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight summary of the workspace tree for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    pub rows: usize,
    pub cells: usize,
    pub dividers: usize,
    pub active: Option<ActiveTarget>,
    pub floating: bool,
    pub fullscreen: bool,
}

impl TreeSnapshot {
    pub fn from_workspace(workspace: &Workspace) -> Self {
        Self {
            rows: workspace.row_count(),
            cells: workspace.cell_count(),
            dividers: workspace.divider_count(),
            active: workspace.active,
            floating: workspace.floating.is_some(),
            fullscreen: workspace.fullscreen.is_some(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TreeSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.rows != other.rows {
            changes.push(format!("rows: {} → {}", self.rows, other.rows));
        }
        if self.cells != other.cells {
            changes.push(format!("cells: {} → {}", self.cells, other.cells));
        }
        if self.dividers != other.dividers {
            changes.push(format!("dividers: {} → {}", self.dividers, other.dividers));
        }
        if self.active != other.active {
            changes.push(format!("active: {:?} → {:?}", self.active, other.active));
        }
        if self.floating != other.floating {
            changes.push(format!(
                "floating {}",
                if other.floating { "opened" } else { "closed" }
            ));
        }
        if self.fullscreen != other.fullscreen {
            changes.push(format!(
                "fullscreen {}",
                if other.fullscreen { "entered" } else { "exited" }
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff_reports_changes() {
        let ws = Workspace::single_cell();
        let before = TreeSnapshot::from_workspace(&ws);
        let mut after = before.clone();
        assert_eq!(before.diff(&after), None);
        after.cells = 3;
        after.floating = true;
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("cells: 1 → 3"));
        assert!(diff.contains("floating opened"));
    }
}
