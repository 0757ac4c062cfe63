//! tilework - replay layout commands against a workspace and print the result

use std::io::{IsTerminal, Read};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use tilework::cli::{CliArgs, OutputFormat, ScriptSource, StartupConfig};
use tilework::config::LayoutConfig;
use tilework::model::{AppModel, Workspace};
use tilework::panel::PanelFactory;
use tilework::panels::register_builtin_panels;
use tilework::preset::LayoutPreset;
use tilework::script::parse_script;
use tilework::update::update;
use tilework::view::{render_json, render_outline};

fn main() -> Result<()> {
    tilework::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow!(e))?;

    let config = match &startup.config_path {
        Some(path) => LayoutConfig::load_from(path),
        None => LayoutConfig::load(),
    };

    if startup.write_default_config {
        let written = match &startup.config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        written.map_err(|e| anyhow!(e))?;
        return Ok(());
    }

    let mut factory = PanelFactory::new();
    register_builtin_panels(&mut factory);

    let workspace = initial_workspace(&startup, &factory, &config)?;
    let (width, height) = startup.viewport;
    let mut model = AppModel::with_workspace(workspace, factory, config, width, height);

    let script = read_script(&startup.script)?;
    let msgs = parse_script(&script).context("Invalid script")?;
    tracing::info!("Replaying {} messages", msgs.len());

    for msg in msgs {
        if let Some(cmd) = update(&mut model, msg) {
            for notice in cmd.notices() {
                eprintln!("{}", notice);
            }
            for event in cmd.events() {
                tracing::debug!(?event, "layout event");
                eprintln!("event: {:?}", event);
            }
        }
    }

    match startup.format {
        OutputFormat::Tree => print!("{}", render_outline(&model)),
        OutputFormat::Json => println!("{}", render_json(&model)?),
    }
    Ok(())
}

/// The preset named on the command line, else the user's saved preset, else
/// a single empty cell
fn initial_workspace(
    startup: &StartupConfig,
    factory: &PanelFactory,
    config: &LayoutConfig,
) -> Result<Workspace> {
    let path = startup
        .preset
        .clone()
        .or_else(|| tilework::config_paths::preset_file().filter(|p| p.exists()));

    let Some(path) = path else {
        return Ok(Workspace::single_cell());
    };
    let source = path.display().to_string();
    let preset =
        LayoutPreset::from_path(&path).map_err(|e| anyhow!(e.user_message(&source)))?;
    preset
        .build(factory, config)
        .map_err(|e| anyhow!(e.user_message(&source)))
}

/// Without `--script`, piped stdin is read; an interactive terminal is not
fn read_script(source: &ScriptSource) -> Result<String> {
    match source {
        ScriptSource::None if std::io::stdin().is_terminal() => Ok(String::new()),
        ScriptSource::None | ScriptSource::Stdin => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read script from stdin")?;
            Ok(script)
        }
        ScriptSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
    }
}
