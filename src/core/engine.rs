use crate::core::runner::ProcessRunner;
use crate::domain::model::LaunchPlan;
use crate::domain::ports::Launcher;
use crate::utils::error::Result;

pub struct LaunchEngine<L: Launcher> {
    launcher: L,
    plan: LaunchPlan,
    runner: ProcessRunner,
}

impl<L: Launcher> LaunchEngine<L> {
    pub fn new(launcher: L, plan: LaunchPlan) -> Self {
        Self {
            launcher,
            plan,
            runner: ProcessRunner::new(),
        }
    }

    /// Prints the banner, runs the script and returns its exit code.
    pub async fn run(&self) -> Result<i32> {
        if let Some(banner) = self.launcher.banner() {
            println!("{}", banner);
        }

        tracing::info!(
            launcher = self.launcher.name(),
            command = %self.plan.redacted().command_line(),
            "starting maintenance script"
        );

        let code = self.runner.run(&self.plan).await?;

        if code == 0 {
            tracing::info!(launcher = self.launcher.name(), "script finished");
        } else {
            tracing::warn!(launcher = self.launcher.name(), code, "script exited with failure");
        }
        Ok(code)
    }
}
