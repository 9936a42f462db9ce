use crate::domain::model::LaunchPlan;
use crate::utils::error::{LauncherError, Result};
use std::process::ExitStatus;
use tokio::process::Command;

/// Spawns a plan with inherited stdio and waits for it to exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, plan: &LaunchPlan) -> Result<i32> {
        let status = Command::new(&plan.program)
            .args(&plan.args)
            .envs(&plan.env)
            .status()
            .await
            .map_err(|source| LauncherError::SpawnError {
                program: plan.program.clone(),
                source,
            })?;

        let code = exit_code(status);
        tracing::debug!(%status, code, "child exited");
        Ok(code)
    }
}

/// Shell convention: signal N becomes 128 + N.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
