use crate::utils::error::{LauncherError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub interpreter: Option<InterpreterConfig>,
    pub cinder_cleanup: Option<ScriptConfig>,
    pub vm_balance: Option<VmBalanceConfig>,
    pub environment: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmBalanceConfig {
    pub script: Option<String>,
    pub honor_dry_run: Option<bool>,
}

fn env_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let display = path.as_ref().display().to_string();
        let content =
            std::fs::read_to_string(&path).map_err(|e| LauncherError::ConfigFileError {
                path: display.clone(),
                message: e.to_string(),
            })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            LauncherError::ConfigFileError { message, .. } => LauncherError::ConfigFileError {
                path: display,
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| LauncherError::ConfigFileError {
            path: "<inline>".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown references stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_ref_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_ref().map(|i| i.program.as_str())
    }

    pub fn cinder_script(&self) -> Option<&str> {
        self.cinder_cleanup.as_ref().and_then(|c| c.script.as_deref())
    }

    pub fn vm_balance_script(&self) -> Option<&str> {
        self.vm_balance.as_ref().and_then(|c| c.script.as_deref())
    }

    pub fn honor_dry_run(&self) -> Option<bool> {
        self.vm_balance.as_ref().and_then(|c| c.honor_dry_run)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(program) = self.interpreter() {
            validate_path("interpreter.program", program)?;
        }
        if let Some(script) = self.cinder_script() {
            validate_path("cinder_cleanup.script", script)?;
        }
        if let Some(script) = self.vm_balance_script() {
            validate_path("vm_balance.script", script)?;
        }
        Ok(())
    }
}
