use crate::domain::model::{dry_run_requested, require_var, EnvVars, OpenStackAuth, ScriptArg};
use crate::domain::ports::Launcher;
use crate::utils::error::Result;
use crate::utils::validation::{validate_integer, Validate};
use std::collections::BTreeMap;

pub const DRY_RUN_VAR: &str = "CINDER_DB_CLEANUP_DRY_RUN";
pub const ITERATIONS_VAR: &str = "CINDER_DB_CLEANUP_ITERATIONS";
pub const INTERVAL_VAR: &str = "CINDER_DB_CLEANUP_INTERVAL";

pub const DEFAULT_SCRIPT: &str = "/scripts/db-cleanup.py";

/// Runs `db-cleanup.py --cinder` against the Cinder database.
#[derive(Debug, Clone)]
pub struct CinderCleanupLauncher {
    pub dry_run: bool,
    pub iterations: String,
    pub interval: String,
    pub auth: OpenStackAuth,
}

impl CinderCleanupLauncher {
    pub fn from_vars(vars: &EnvVars) -> Result<Self> {
        let launcher = Self {
            dry_run: dry_run_requested(vars.get(DRY_RUN_VAR).map(String::as_str)),
            iterations: require_var(vars, ITERATIONS_VAR)?,
            interval: require_var(vars, INTERVAL_VAR)?,
            auth: OpenStackAuth::from_vars(vars)?,
        };
        tracing::debug!(?launcher, "cinder cleanup launcher resolved");
        Ok(launcher)
    }
}

impl Validate for CinderCleanupLauncher {
    fn validate(&self) -> Result<()> {
        validate_integer(ITERATIONS_VAR, &self.iterations, 1)?;
        validate_integer(INTERVAL_VAR, &self.interval, 1)?;
        self.auth.validate()
    }
}

impl Launcher for CinderCleanupLauncher {
    fn name(&self) -> &'static str {
        "cinder-cleanup"
    }

    fn script_argv(&self) -> Vec<ScriptArg> {
        let mut args = vec![
            ScriptArg::Flag("--iterations"),
            ScriptArg::Value(self.iterations.clone()),
            ScriptArg::Flag("--interval"),
            ScriptArg::Value(self.interval.clone()),
            ScriptArg::Flag("--cinder"),
        ];
        if self.dry_run {
            args.push(ScriptArg::Flag("--dry-run"));
        }
        args
    }

    fn child_env(&self) -> BTreeMap<String, String> {
        self.auth.to_env()
    }
}
