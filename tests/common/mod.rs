#![allow(dead_code)]

use nanny_launch::EnvVars;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn openstack_vars() -> EnvVars {
    EnvVars::from([
        ("OS_USER_DOMAIN_NAME".to_string(), "Default".to_string()),
        ("OS_PROJECT_NAME".to_string(), "cloud_admin".to_string()),
        ("OS_PASSWORD".to_string(), "os-secret".to_string()),
        ("OS_AUTH_URL".to_string(), "https://identity-3.eu-de-1.example.com/v3".to_string()),
        ("OS_USERNAME".to_string(), "nanny".to_string()),
        ("OS_PROJECT_DOMAIN_NAME".to_string(), "ccadmin".to_string()),
    ])
}

/// A stand-in "script" run through `sh` that records its argv, one per line,
/// and exits with `$FAKE_EXIT` (default 0).
pub struct FakeScript {
    pub dir: TempDir,
    pub script: PathBuf,
    pub argv_out: PathBuf,
}

impl FakeScript {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let script = dir.path().join("fake-nanny.sh");
        let argv_out = dir.path().join("argv.txt");
        std::fs::write(
            &script,
            "for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > \"$FAKE_ARGV_OUT\"\n\
             printf '%s\\n' \"$OS_AUTH_URL\" >> \"$FAKE_ARGV_OUT\"\n\
             exit \"${FAKE_EXIT:-0}\"\n",
        )?;
        Ok(Self {
            dir,
            script,
            argv_out,
        })
    }

    pub fn script_path(&self) -> &str {
        self.script.to_str().unwrap_or_default()
    }

    /// Recorded argv followed by the child's OS_AUTH_URL.
    pub fn recorded(&self) -> anyhow::Result<Vec<String>> {
        Ok(std::fs::read_to_string(&self.argv_out)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    pub fn out_path(&self) -> &Path {
        &self.argv_out
    }
}
