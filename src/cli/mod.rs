//! Command-line interface.
//!
//! With no subcommand the TUI is launched; `list` and `completions` run
//! once and exit.

pub mod completions;
pub mod list;

use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

/// Browse orphanages on a map in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "orphanmap",
    version,
    about = "Browse orphanages on a map in the terminal",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Base URL of the orphanages service (overrides the config file)
    #[arg(long, global = true, env = "ORPHANMAP_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the orphanage list once and print it
    List {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for (detected from $SHELL when omitted)
        #[arg(value_enum)]
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Config file location: `--config`, else the default path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Load (or create) the config and apply command-line overrides
    pub fn load_config(&self) -> Result<(Config, PathBuf)> {
        let config_path = self.config_path();
        let mut config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;

        if let Some(url) = self.api_url.as_deref().map(str::trim) {
            if !url.is_empty() {
                info!("api url overridden: {}", url);
                config.api.base_url = url.to_string();
            }
        }
        Ok((config, config_path))
    }

    /// Run a one-shot subcommand. Returns `false` when the TUI should start.
    pub fn execute(&self) -> Result<bool> {
        match &self.command {
            Some(Commands::List { json }) => {
                let (config, _) = self.load_config()?;
                list::run(&config, *json)?;
                Ok(true)
            }
            Some(Commands::Completions { shell }) => {
                completions::generate(*shell)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
