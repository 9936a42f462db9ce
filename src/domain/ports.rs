use crate::domain::model::{LaunchPlan, ScriptArg};
use std::collections::BTreeMap;

pub trait Launcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Arguments passed after the script path, in order.
    fn script_argv(&self) -> Vec<ScriptArg>;

    /// Variables exported to the child on top of the inherited environment.
    fn child_env(&self) -> BTreeMap<String, String>;

    fn banner(&self) -> Option<String> {
        None
    }

    fn script_args(&self) -> Vec<String> {
        self.script_argv()
            .iter()
            .map(|arg| arg.as_str().to_string())
            .collect()
    }

    fn plan(&self, interpreter: &str, script: &str) -> LaunchPlan {
        let mut plan = LaunchPlan {
            program: interpreter.to_string(),
            args: vec![script.to_string()],
            env: self.child_env(),
            ..LaunchPlan::default()
        };
        for arg in self.script_argv() {
            if arg.is_secret() {
                plan.secret_args.insert(plan.args.len());
            }
            plan.args.push(arg.as_str().to_string());
        }
        plan
    }
}
