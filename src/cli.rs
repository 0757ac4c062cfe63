//! Command-line argument parsing for the layout driver
//!
//! Supports:
//! - Building the initial tree from a preset file
//! - Replaying a command script (from a file or stdin)
//! - Printing the resulting layout as an outline or JSON

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const DEFAULT_WIDTH: f32 = 1280.0;
const DEFAULT_HEIGHT: f32 = 800.0;

/// How the final layout is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented outline
    Tree,
    /// Pretty-printed JSON
    Json,
}

/// A tree-structured workspace layout engine
#[derive(Parser, Debug)]
#[command(
    name = "tilework",
    version,
    about = "Split, merge, resize, undock and fullscreen workspace panels"
)]
pub struct CliArgs {
    /// Layout preset (YAML or JSON) to start from
    #[arg(short, long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Command script to replay; `-` reads stdin
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Viewport width in layout units
    #[arg(long, value_name = "N")]
    pub width: Option<f32>,

    /// Viewport height in layout units
    #[arg(long, value_name = "N")]
    pub height: Option<f32>,

    /// Output format for the final layout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    pub format: OutputFormat,

    /// Config file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    pub write_default_config: bool,
}

/// Where script commands come from
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    None,
    Stdin,
    File(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub preset: Option<PathBuf>,
    pub script: ScriptSource,
    pub viewport: (f32, f32),
    pub format: OutputFormat,
    pub config_path: Option<PathBuf>,
    pub write_default_config: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(format!("Invalid viewport size {}x{}", width, height));
        }

        let script = match self.script {
            None => ScriptSource::None,
            Some(path) if path.as_os_str() == "-" => ScriptSource::Stdin,
            Some(path) => ScriptSource::File(path),
        };

        Ok(StartupConfig {
            preset: self.preset,
            script,
            viewport: (width, height),
            format: self.format,
            config_path: self.config,
            write_default_config: self.write_default_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            preset: None,
            script: None,
            width: None,
            height: None,
            format: OutputFormat::Tree,
            config: None,
            write_default_config: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = args().into_config().unwrap();
        assert_eq!(config.viewport, (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.script, ScriptSource::None);
        assert_eq!(config.format, OutputFormat::Tree);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let config = CliArgs {
            script: Some(PathBuf::from("-")),
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.script, ScriptSource::Stdin);
    }

    #[test]
    fn test_rejects_empty_viewport() {
        let result = CliArgs {
            width: Some(0.0),
            ..args()
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_parses_flags() {
        let cli = CliArgs::try_parse_from([
            "tilework",
            "--preset",
            "layout.yaml",
            "--format",
            "json",
            "--width",
            "800",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.preset, Some(PathBuf::from("layout.yaml")));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.viewport, (800.0, DEFAULT_HEIGHT));
    }
}
