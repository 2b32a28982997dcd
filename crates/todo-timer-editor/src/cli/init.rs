/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When EditorConfig schema changes
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use todo_timer_editor::config::{EditorConfig, RemoteConfig, TimerConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to todo-timer init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a configuration file.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = EditorConfig::default();

    println!("\n{}", style("--- Timer ---").bold());
    let duration_secs: u32 = Input::with_theme(&theme)
        .with_prompt("Seconds per draft before the prompt")
        .default(defaults.timer.duration_secs)
        .interact_text()?;
    let start_enabled = Confirm::with_theme(&theme)
        .with_prompt("Start with timer mode on?")
        .default(defaults.timer.start_enabled)
        .interact()?;

    println!("\n{}", style("--- Sample data ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Sample server base URL")
        .default(defaults.remote.base_url.clone())
        .interact_text()?;
    let path: String = Input::with_theme(&theme)
        .with_prompt("Sample path")
        .default(defaults.remote.path.clone())
        .interact_text()?;

    let config = EditorConfig {
        timer: TimerConfig {
            duration_secs,
            start_enabled,
            ..defaults.timer
        },
        remote: RemoteConfig {
            base_url,
            path,
            ..defaults.remote
        },
    };

    write_config(&config, &output)?;
    println!(
        "\n{} {}",
        style("Configuration written to").green(),
        style(output.display()).cyan()
    );
    Ok(())
}

/// Validate, then write `config` as YAML, creating parent directories.
pub fn write_config(config: &EditorConfig, output: &Path) -> Result<()> {
    config.validate().context("refusing to write invalid config")?;
    let yaml = serde_yaml::to_string(config).context("serialize config")?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(output, yaml).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}
