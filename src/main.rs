//! CLI entry point for anchorwm's config tooling
//!
//! Compiles a configuration file the same way the window manager does at
//! startup, for checking it without restarting the session.

use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use anchorwm::config::Config;

#[derive(Parser)]
#[command(name = "anchorwm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a config file and report errors
    Check {
        /// Path to the config file
        #[arg(short, long, default_value = "~/.config/anchorwm/config")]
        config: PathBuf,
    },

    /// List the compiled keybindings
    List {
        /// Path to the config file
        #[arg(short, long, default_value = "~/.config/anchorwm/config")]
        config: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => check_config(&config)?,
        Commands::List { config, json } => list_bindings(&config, json)?,
    }

    Ok(())
}

/// Expand `~` and read the config source.
fn read_config(config_path: &Path) -> anyhow::Result<String> {
    let expanded = shellexpand::tilde(
        config_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    let path = Path::new(expanded.as_ref());
    fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

/// Compile a config and report the outcome
fn check_config(config_path: &Path) -> anyhow::Result<()> {
    let source = read_config(config_path)?;

    println!("{} Compiling config: {}", "→".cyan(), config_path.display());

    match Config::compile(&source) {
        Ok(config) => {
            println!(
                "{} {} keybindings, {} window rules, abort key '{}'",
                "✓".green(),
                config.trie.bindings().len(),
                config.classifier.rule_count(),
                config.abort_key
            );
            Ok(())
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            Err(err.into())
        }
    }
}

#[derive(Serialize)]
struct BindingRow {
    sequence: String,
    command: anchorwm::core::Command,
}

/// List every compiled binding, plainly or as JSON
fn list_bindings(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let source = read_config(config_path)?;
    let config = Config::compile(&source)?;

    let rows: Vec<BindingRow> = config
        .trie
        .bindings()
        .into_iter()
        .map(|(sequence, command)| BindingRow {
            sequence: sequence.to_string(),
            command,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No keybindings found".yellow());
        return Ok(());
    }
    for row in rows {
        println!("{:<32} {}", row.sequence.bold(), row.command);
    }
    Ok(())
}
