//! Layout configuration
//!
//! Stored in `~/.config/tilework/config.yaml`. Every field has a default, so
//! a partial file (or none at all) is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// What merge does with the cleanup hooks of every cell but the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeCleanupPolicy {
    /// Drop them uninvoked and log a warning
    #[default]
    Drop,
    /// Invoke them before the merged cell is installed
    Invoke,
}

/// Width and height pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tunables for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Smallest main-axis extent a divider drag may leave a sibling with
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: f32,
    #[serde(default = "default_divider_width")]
    pub divider_width: f32,
    /// Fraction of a cell (centered) where a floating panel does not snap
    #[serde(default = "default_snap_inner_fraction")]
    pub snap_inner_fraction: f32,
    /// Offset of a new floating panel from its source cell's corner
    #[serde(default = "default_floating_offset")]
    pub floating_offset: f32,
    /// Minimum distance of a new floating panel from the viewport edge
    #[serde(default = "default_floating_margin")]
    pub floating_margin: f32,
    #[serde(default = "default_floating_size")]
    pub floating_size: Size,
    #[serde(default = "default_floating_min_size")]
    pub floating_min_size: Size,
    /// Distance from a floating panel's edge that starts a resize
    #[serde(default = "default_floating_edge_threshold")]
    pub floating_edge_threshold: f32,
    #[serde(default = "default_floating_header_height")]
    pub floating_header_height: f32,
    /// Panel class assumed when a load names none
    #[serde(default = "default_panel_class")]
    pub default_panel_class: String,
    #[serde(default)]
    pub merge_cleanup: MergeCleanupPolicy,
}

fn default_min_cell_size() -> f32 {
    50.0
}

fn default_divider_width() -> f32 {
    crate::model::DIVIDER_WIDTH
}

fn default_snap_inner_fraction() -> f32 {
    0.8
}

fn default_floating_offset() -> f32 {
    12.0
}

fn default_floating_margin() -> f32 {
    16.0
}

fn default_floating_size() -> Size {
    Size::new(480.0, 320.0)
}

fn default_floating_min_size() -> Size {
    Size::new(260.0, 180.0)
}

fn default_floating_edge_threshold() -> f32 {
    12.0
}

fn default_floating_header_height() -> f32 {
    24.0
}

fn default_panel_class() -> String {
    "InfoPanel".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_cell_size: default_min_cell_size(),
            divider_width: default_divider_width(),
            snap_inner_fraction: default_snap_inner_fraction(),
            floating_offset: default_floating_offset(),
            floating_margin: default_floating_margin(),
            floating_size: default_floating_size(),
            floating_min_size: default_floating_min_size(),
            floating_edge_threshold: default_floating_edge_threshold(),
            floating_header_height: default_floating_header_height(),
            default_panel_class: default_panel_class(),
            merge_cleanup: MergeCleanupPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; any failure falls back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
