use crate::domain::model::{
    dry_run_requested, require_var, EnvVars, OpenStackAuth, ScriptArg, REDACTED,
};
use crate::domain::ports::Launcher;
use crate::utils::error::Result;
use crate::utils::validation::{validate_integer, validate_non_empty_string, Validate};
use chrono::Local;
use std::collections::BTreeMap;
use std::fmt;

pub const DRY_RUN_VAR: &str = "VM_BALANCE_DRY_RUN";
pub const VC_HOST_VAR: &str = "VM_BALANCE_VCHOST";
pub const VC_USER_VAR: &str = "VM_BALANCE_VCUSER";
pub const VC_PASSWORD_VAR: &str = "VM_BALANCE_VCPASSWORD";
pub const REGION_VAR: &str = "REGION";
pub const INTERVAL_VAR: &str = "VM_BALANCE_INTERVAL";

pub const DEFAULT_SCRIPT: &str = "/scripts/vm_load_balance.py";

/// Runs `vm_load_balance.py` against a vCenter.
///
/// `VM_BALANCE_DRY_RUN` is only consulted when `honor_dry_run` is set;
/// otherwise the script always runs live.
#[derive(Clone)]
pub struct VmBalanceLauncher {
    pub dry_run: bool,
    pub vc_host: String,
    pub vc_user: String,
    pub vc_password: String,
    pub region: String,
    pub interval: String,
    pub auth: OpenStackAuth,
}

impl fmt::Debug for VmBalanceLauncher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VmBalanceLauncher")
            .field("dry_run", &self.dry_run)
            .field("vc_host", &self.vc_host)
            .field("vc_user", &self.vc_user)
            .field("vc_password", &REDACTED)
            .field("region", &self.region)
            .field("interval", &self.interval)
            .field("auth", &self.auth)
            .finish()
    }
}

impl VmBalanceLauncher {
    pub fn from_vars(vars: &EnvVars, honor_dry_run: bool) -> Result<Self> {
        let requested = vars.get(DRY_RUN_VAR).map(String::as_str);
        let dry_run = honor_dry_run && dry_run_requested(requested);
        if !honor_dry_run && requested.is_some() {
            tracing::debug!(value = ?requested, "{} ignored, running live", DRY_RUN_VAR);
        }

        let launcher = Self {
            dry_run,
            vc_host: require_var(vars, VC_HOST_VAR)?,
            vc_user: require_var(vars, VC_USER_VAR)?,
            vc_password: require_var(vars, VC_PASSWORD_VAR)?,
            region: require_var(vars, REGION_VAR)?,
            interval: require_var(vars, INTERVAL_VAR)?,
            auth: OpenStackAuth::from_vars(vars)?,
        };
        tracing::debug!(?launcher, "vm balance launcher resolved");
        Ok(launcher)
    }
}

impl Validate for VmBalanceLauncher {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string(VC_HOST_VAR, &self.vc_host)?;
        validate_non_empty_string(REGION_VAR, &self.region)?;
        validate_integer(INTERVAL_VAR, &self.interval, 1)?;
        self.auth.validate()
    }
}

impl Launcher for VmBalanceLauncher {
    fn name(&self) -> &'static str {
        "vm-balance"
    }

    fn script_argv(&self) -> Vec<ScriptArg> {
        let mut args = Vec::with_capacity(21);
        if self.dry_run {
            args.push(ScriptArg::Flag("--dry-run"));
        }
        let pairs = [
            ("--vc_host", ScriptArg::Value(self.vc_host.clone())),
            ("--vc_user", ScriptArg::Value(self.vc_user.clone())),
            ("--vc_password", ScriptArg::Secret(self.vc_password.clone())),
            ("--region", ScriptArg::Value(self.region.clone())),
            ("--username", ScriptArg::Value(self.auth.username.clone())),
            ("--password", ScriptArg::Secret(self.auth.password.clone())),
            ("--user_domain_name", ScriptArg::Value(self.auth.user_domain_name.clone())),
            ("--project_name", ScriptArg::Value(self.auth.project_name.clone())),
            ("--project_domain_name", ScriptArg::Value(self.auth.project_domain_name.clone())),
            ("--interval", ScriptArg::Value(self.interval.clone())),
        ];
        for (flag, value) in pairs {
            args.push(ScriptArg::Flag(flag));
            args.push(value);
        }
        args
    }

    fn child_env(&self) -> BTreeMap<String, String> {
        self.auth.to_env()
    }

    fn banner(&self) -> Option<String> {
        Some(format!(
            "INFO: starting vm load balance nanny for {} - {}",
            self.region,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> EnvVars {
        EnvVars::from([
            (VC_HOST_VAR.to_string(), "vc-a-0.example.com".to_string()),
            (VC_USER_VAR.to_string(), "administrator@vsphere.local".to_string()),
            (VC_PASSWORD_VAR.to_string(), "vc-pass".to_string()),
            (REGION_VAR.to_string(), "eu-de-1".to_string()),
            (INTERVAL_VAR.to_string(), "10".to_string()),
            ("OS_USER_DOMAIN_NAME".to_string(), "Default".to_string()),
            ("OS_PROJECT_NAME".to_string(), "cloud_admin".to_string()),
            ("OS_PASSWORD".to_string(), "os-pass".to_string()),
            ("OS_AUTH_URL".to_string(), "https://identity.example.com/v3".to_string()),
            ("OS_USERNAME".to_string(), "balance-nanny".to_string()),
            ("OS_PROJECT_DOMAIN_NAME".to_string(), "ccadmin".to_string()),
        ])
    }

    #[test]
    fn test_dry_run_ignored_by_default() {
        let mut vars = base_vars();
        vars.insert(DRY_RUN_VAR.to_string(), "true".to_string());
        let launcher = VmBalanceLauncher::from_vars(&vars, false).unwrap();
        assert!(!launcher.dry_run);
        assert!(!launcher.script_args().contains(&"--dry-run".to_string()));
    }

    #[test]
    fn test_honor_dry_run_switch() {
        let launcher = VmBalanceLauncher::from_vars(&base_vars(), true).unwrap();
        assert_eq!(launcher.script_args().first().map(String::as_str), Some("--dry-run"));

        let mut vars = base_vars();
        vars.insert(DRY_RUN_VAR.to_string(), "False".to_string());
        let launcher = VmBalanceLauncher::from_vars(&vars, true).unwrap();
        assert!(!launcher.dry_run);
    }

    #[test]
    fn test_flags_follow_script_contract() {
        let launcher = VmBalanceLauncher::from_vars(&base_vars(), false).unwrap();
        let flags: Vec<String> = launcher
            .script_args()
            .into_iter()
            .step_by(2)
            .collect();
        assert_eq!(
            flags,
            vec![
                "--vc_host",
                "--vc_user",
                "--vc_password",
                "--region",
                "--username",
                "--password",
                "--user_domain_name",
                "--project_name",
                "--project_domain_name",
                "--interval",
            ]
        );
    }

    #[test]
    fn test_debug_hides_passwords() {
        let launcher = VmBalanceLauncher::from_vars(&base_vars(), false).unwrap();
        let rendered = format!("{:?}", launcher);
        assert!(!rendered.contains("vc-pass"));
        assert!(!rendered.contains("os-pass"));
    }

    #[test]
    fn test_banner_mentions_region() {
        let launcher = VmBalanceLauncher::from_vars(&base_vars(), false).unwrap();
        let banner = launcher.banner().unwrap();
        assert!(banner.starts_with("INFO: starting vm load balance nanny for eu-de-1"));
    }
}
