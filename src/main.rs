use anyhow::Context;
use clap::Parser;
use nanny_launch::config::toml_config::TomlConfig;
use nanny_launch::config::OutputFormat;
use nanny_launch::domain::model::env_snapshot;
use nanny_launch::utils::{logger, validation::Validate};
use nanny_launch::{
    CinderCleanupLauncher, CliConfig, Command, LaunchEngine, Launcher, LauncherError,
    LauncherSettings, VmBalanceLauncher,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => report(&e),
    };

    std::process::exit(exit_code);
}

async fn run(cli: &CliConfig) -> anyhow::Result<i32> {
    let mut settings = match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            config.validate()?;
            tracing::info!("Loaded launcher configuration from {}", path.display());
            LauncherSettings::from_toml(&config)
        }
        None => LauncherSettings::default(),
    };
    cli.apply_overrides(&mut settings);

    let vars = env_snapshot();

    match &cli.command {
        Command::CinderCleanup { .. } => {
            let launcher = CinderCleanupLauncher::from_vars(&vars)?;
            let script = settings.cinder_script.clone();
            launch(cli, &settings, launcher, &script).await
        }
        Command::VmBalance { .. } => {
            let launcher = VmBalanceLauncher::from_vars(&vars, settings.honor_dry_run)?;
            let script = settings.vm_balance_script.clone();
            launch(cli, &settings, launcher, &script).await
        }
    }
}

async fn launch<L>(
    cli: &CliConfig,
    settings: &LauncherSettings,
    launcher: L,
    script: &str,
) -> anyhow::Result<i32>
where
    L: Launcher + Validate,
{
    launcher.validate()?;

    let plan = settings.plan_for(&launcher, script);

    if cli.show_command {
        let redacted = plan.redacted();
        match cli.output {
            OutputFormat::Text => {
                for (key, value) in &redacted.env {
                    println!("{}={}", key, value);
                }
                println!("{}", redacted.command_line());
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&redacted).map_err(LauncherError::from)?;
                println!("{}", json);
            }
        }
        return Ok(0);
    }

    let engine = LaunchEngine::new(launcher, plan);
    Ok(engine.run().await?)
}

fn report(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<LauncherError>() {
        Some(e) => {
            tracing::error!(
                "❌ Launch failed: {:#} (Category: {:?}, Severity: {:?})",
                error,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            e.exit_code()
        }
        None => {
            tracing::error!("❌ Launch failed: {:#}", error);
            eprintln!("❌ {:#}", error);
            1
        }
    }
}
