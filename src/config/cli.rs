use crate::config::LauncherSettings;
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nanny-launch")]
#[command(about = "Launches OpenStack maintenance nannies from environment variables")]
pub struct CliConfig {
    /// Path to a TOML file with interpreter and script locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Python interpreter, overrides the config file
    #[arg(long, global = true)]
    pub interpreter: Option<String>,

    /// Print the resolved command with secrets masked instead of running it
    #[arg(long, global = true)]
    pub show_command: bool,

    /// Output format for --show-command
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Clean orphaned Cinder database entities (db-cleanup.py --cinder)
    CinderCleanup {
        /// Path to db-cleanup.py
        #[arg(long)]
        script: Option<String>,
    },
    /// Balance VMs across the vCenter cluster (vm_load_balance.py)
    VmBalance {
        /// Path to vm_load_balance.py
        #[arg(long)]
        script: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliConfig {
    /// Applies flag overrides on top of settings loaded from defaults/TOML.
    pub fn apply_overrides(&self, settings: &mut LauncherSettings) {
        if let Some(interpreter) = &self.interpreter {
            settings.interpreter = interpreter.clone();
        }
        match &self.command {
            Command::CinderCleanup {
                script: Some(script),
            } => settings.cinder_script = script.clone(),
            Command::VmBalance {
                script: Some(script),
            } => settings.vm_balance_script = script.clone(),
            _ => {}
        }
    }
}
