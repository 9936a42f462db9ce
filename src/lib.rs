pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::launchers::{CinderCleanupLauncher, VmBalanceLauncher};
pub use config::LauncherSettings;
pub use crate::core::{engine::LaunchEngine, runner::ProcessRunner};
pub use domain::model::{EnvVars, LaunchPlan};
pub use domain::ports::Launcher;
pub use utils::error::{LauncherError, Result};
