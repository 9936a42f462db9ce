#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::app::launchers::{cinder_cleanup, vm_balance};
use crate::config::toml_config::TomlConfig;
use crate::domain::model::LaunchPlan;
use crate::domain::ports::Launcher;
use std::collections::BTreeMap;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};

pub const DEFAULT_INTERPRETER: &str = "python3";

/// Resolved launcher settings: built-in defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    pub interpreter: String,
    pub cinder_script: String,
    pub vm_balance_script: String,
    pub honor_dry_run: bool,
    pub extra_env: BTreeMap<String, String>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            cinder_script: cinder_cleanup::DEFAULT_SCRIPT.to_string(),
            vm_balance_script: vm_balance::DEFAULT_SCRIPT.to_string(),
            honor_dry_run: false,
            extra_env: BTreeMap::new(),
        }
    }
}

impl LauncherSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            interpreter: config
                .interpreter()
                .map(str::to_string)
                .unwrap_or(defaults.interpreter),
            cinder_script: config
                .cinder_script()
                .map(str::to_string)
                .unwrap_or(defaults.cinder_script),
            vm_balance_script: config
                .vm_balance_script()
                .map(str::to_string)
                .unwrap_or(defaults.vm_balance_script),
            honor_dry_run: config.honor_dry_run().unwrap_or(defaults.honor_dry_run),
            extra_env: config.environment.clone().unwrap_or_default(),
        }
    }

    /// Builds the plan for `launcher`, layering `[environment]` under the
    /// launcher's own variables.
    pub fn plan_for(&self, launcher: &dyn Launcher, script: &str) -> LaunchPlan {
        let mut plan = launcher.plan(&self.interpreter, script);
        for (key, value) in &self.extra_env {
            plan.env.entry(key.clone()).or_insert_with(|| value.clone());
        }
        plan
    }
}
