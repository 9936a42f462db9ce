use crate::utils::error::{LauncherError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::OsString;
use std::fmt;

/// Snapshot of the process environment.
pub type EnvVars = HashMap<String, String>;

pub const REDACTED: &str = "[REDACTED]";

/// Environment variables that carry credentials.
pub const SECRET_ENV_VARS: &[&str] = &["OS_PASSWORD"];

/// Takes the process environment, skipping entries that are not valid
/// UTF-8. A launcher variable dropped here is then reported as missing.
pub fn env_snapshot() -> EnvVars {
    snapshot_from(std::env::vars_os())
}

pub fn snapshot_from<I>(vars: I) -> EnvVars
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                tracing::debug!(
                    key = %key.unwrap_or_else(|k| k.to_string_lossy().into_owned()),
                    "skipping non UTF-8 environment entry"
                );
                None
            }
        })
        .collect()
}

/// One element of a script's argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptArg {
    Flag(&'static str),
    Value(String),
    /// A credential, masked in redacted plans.
    Secret(String),
}

impl ScriptArg {
    pub fn as_str(&self) -> &str {
        match self {
            ScriptArg::Flag(flag) => flag,
            ScriptArg::Value(value) | ScriptArg::Secret(value) => value,
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, ScriptArg::Secret(_))
    }
}

pub fn require_var(vars: &EnvVars, name: &str) -> Result<String> {
    vars.get(name)
        .cloned()
        .ok_or_else(|| LauncherError::MissingEnvVar {
            name: name.to_string(),
        })
}

/// Dry-run stays on unless the value is exactly `False` or `false`.
pub fn dry_run_requested(value: Option<&str>) -> bool {
    !matches!(value, Some("False") | Some("false"))
}

/// Keystone credentials shared by both launchers.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenStackAuth {
    pub user_domain_name: String,
    pub project_name: String,
    pub password: String,
    pub auth_url: String,
    pub username: String,
    pub project_domain_name: String,
}

impl fmt::Debug for OpenStackAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStackAuth")
            .field("user_domain_name", &self.user_domain_name)
            .field("project_name", &self.project_name)
            .field("password", &REDACTED)
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("project_domain_name", &self.project_domain_name)
            .finish()
    }
}

impl OpenStackAuth {
    pub fn from_vars(vars: &EnvVars) -> Result<Self> {
        Ok(Self {
            user_domain_name: require_var(vars, "OS_USER_DOMAIN_NAME")?,
            project_name: require_var(vars, "OS_PROJECT_NAME")?,
            password: require_var(vars, "OS_PASSWORD")?,
            auth_url: require_var(vars, "OS_AUTH_URL")?,
            username: require_var(vars, "OS_USERNAME")?,
            project_domain_name: require_var(vars, "OS_PROJECT_DOMAIN_NAME")?,
        })
    }

    /// Variables re-exported to the child, named as the OpenStack SDK expects.
    pub fn to_env(&self) -> BTreeMap<String, String> {
        [
            ("OS_USER_DOMAIN_NAME", &self.user_domain_name),
            ("OS_PROJECT_NAME", &self.project_name),
            ("OS_PASSWORD", &self.password),
            ("OS_AUTH_URL", &self.auth_url),
            ("OS_USERNAME", &self.username),
            ("OS_PROJECT_DOMAIN_NAME", &self.project_domain_name),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

impl Validate for OpenStackAuth {
    fn validate(&self) -> Result<()> {
        validate_url("OS_AUTH_URL", &self.auth_url)?;
        validate_non_empty_string("OS_USERNAME", &self.username)?;
        Ok(())
    }
}

/// A fully resolved process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// Indices into `args` holding credentials.
    #[serde(skip)]
    pub secret_args: BTreeSet<usize>,
}

impl LaunchPlan {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn redacted(&self) -> Self {
        let args = self
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                if self.secret_args.contains(&i) {
                    REDACTED.to_string()
                } else {
                    arg.clone()
                }
            })
            .collect();

        let env = self
            .env
            .iter()
            .map(|(k, v)| {
                if SECRET_ENV_VARS.contains(&k.as_str()) {
                    (k.clone(), REDACTED.to_string())
                } else {
                    (k.clone(), v.clone())
                }
            })
            .collect();

        Self {
            program: self.program.clone(),
            args,
            env,
            secret_args: self.secret_args.clone(),
        }
    }

    /// Single-line rendering for logs. Not shell-escaped.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
