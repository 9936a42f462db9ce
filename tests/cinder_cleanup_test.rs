mod common;

use anyhow::Result;
use common::{openstack_vars, FakeScript};
use nanny_launch::app::launchers::cinder_cleanup::{DRY_RUN_VAR, INTERVAL_VAR, ITERATIONS_VAR};
use nanny_launch::utils::validation::Validate;
use nanny_launch::{CinderCleanupLauncher, EnvVars, LaunchEngine, LauncherSettings};

fn cleanup_vars(dry_run: Option<&str>) -> EnvVars {
    let mut vars = openstack_vars();
    vars.insert(ITERATIONS_VAR.to_string(), "5".to_string());
    vars.insert(INTERVAL_VAR.to_string(), "30".to_string());
    if let Some(value) = dry_run {
        vars.insert(DRY_RUN_VAR.to_string(), value.to_string());
    }
    vars
}

#[test]
fn test_dry_run_flag_resolution() -> Result<()> {
    for value in ["False", "false"] {
        let launcher = CinderCleanupLauncher::from_vars(&cleanup_vars(Some(value)))?;
        let plan = LauncherSettings::default().plan_for(&launcher, "/scripts/db-cleanup.py");
        assert!(!plan.has_flag("--dry-run"), "{} should disable dry-run", value);
    }

    for value in [None, Some(""), Some("FALSE"), Some("no"), Some("True")] {
        let launcher = CinderCleanupLauncher::from_vars(&cleanup_vars(value))?;
        let plan = LauncherSettings::default().plan_for(&launcher, "/scripts/db-cleanup.py");
        assert!(plan.has_flag("--dry-run"), "{:?} should keep dry-run", value);
    }
    Ok(())
}

#[test]
fn test_plan_shape() -> Result<()> {
    let launcher = CinderCleanupLauncher::from_vars(&cleanup_vars(Some("false")))?;
    launcher.validate()?;

    let plan = LauncherSettings::default().plan_for(&launcher, "/scripts/db-cleanup.py");

    assert_eq!(plan.program, "python3");
    assert_eq!(
        plan.args,
        vec![
            "/scripts/db-cleanup.py",
            "--iterations",
            "5",
            "--interval",
            "30",
            "--cinder",
        ]
    );
    assert_eq!(plan.env["OS_PASSWORD"], "os-secret");
    assert_eq!(plan.env["OS_PROJECT_DOMAIN_NAME"], "ccadmin");
    Ok(())
}

#[test]
fn test_extra_env_does_not_override_credentials() -> Result<()> {
    let launcher = CinderCleanupLauncher::from_vars(&cleanup_vars(None))?;
    let mut settings = LauncherSettings::default();
    settings
        .extra_env
        .insert("OS_USERNAME".to_string(), "someone-else".to_string());
    settings
        .extra_env
        .insert("PYTHONUNBUFFERED".to_string(), "1".to_string());

    let plan = settings.plan_for(&launcher, "/scripts/db-cleanup.py");
    assert_eq!(plan.env["OS_USERNAME"], "nanny");
    assert_eq!(plan.env["PYTHONUNBUFFERED"], "1");
    Ok(())
}

#[test]
fn test_missing_credentials_fail_before_launch() {
    let mut vars = cleanup_vars(None);
    vars.remove("OS_AUTH_URL");
    let err = CinderCleanupLauncher::from_vars(&vars).unwrap_err();
    assert!(err.to_string().contains("OS_AUTH_URL"));
    assert_eq!(err.exit_code(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_runs_script_and_forwards_exit_code() -> Result<()> {
    let fake = FakeScript::new()?;
    let launcher = CinderCleanupLauncher::from_vars(&cleanup_vars(None))?;

    let mut settings = LauncherSettings {
        interpreter: "sh".to_string(),
        ..LauncherSettings::default()
    };
    settings.extra_env.insert(
        "FAKE_ARGV_OUT".to_string(),
        fake.out_path().display().to_string(),
    );
    settings
        .extra_env
        .insert("FAKE_EXIT".to_string(), "4".to_string());

    let plan = settings.plan_for(&launcher, fake.script_path());
    let code = LaunchEngine::new(launcher, plan).run().await?;

    assert_eq!(code, 4);
    assert_eq!(
        fake.recorded()?,
        vec![
            "--iterations",
            "5",
            "--interval",
            "30",
            "--cinder",
            "--dry-run",
            "https://identity-3.eu-de-1.example.com/v3",
        ]
    );
    Ok(())
}
