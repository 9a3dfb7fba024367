//! LiveProof CLI - verify answers against cited evidence before acting on them.

use clap::Parser;
use liveproof_cli::commands;
use liveproof_cli::repl::{self, ReplContext};
use liveproof_cli::{Cli, Command, Config, Formatter};
use liveproof_gatekeeper::{GateConfig, VerificationFlow};
use liveproof_sdk::{ClientConfig, LiveProofClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so command output stays clean on stdout.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> liveproof_cli::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };

    let mut config = Config::load_or_init(&config_path)?;

    if let Some(profile_name) = cli.profile.clone() {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    debug!(api_url = %api_url, profile = %config.active_profile, "Resolved service URL");
    let connect = || -> liveproof_cli::Result<LiveProofClient> {
        Ok(LiveProofClient::new(ClientConfig::new(&api_url)?)?)
    };
    let gate = GateConfig::default();

    match cli.command {
        None | Some(Command::Repl) => {
            let ctx = ReplContext {
                config_path: &config_path,
                api_override: cli.api_url.as_deref(),
                gate,
            };
            repl::run_repl(&mut config, ctx, connect()?, &formatter).await?;
        }
        Some(Command::Verify(args)) => {
            let mut flow = VerificationFlow::new(gate);
            let topic = config.default_topic();
            commands::execute_verify(args, &connect()?, &mut flow, topic, &formatter).await?;
        }
        Some(Command::Session(args)) => {
            commands::execute_session(args, &connect()?, &formatter).await?;
        }
        Some(Command::Compare(args)) => {
            commands::execute_compare(args, &connect()?, &formatter).await?;
        }
        Some(Command::Sources(args)) => {
            commands::execute_sources(args, &connect()?, &formatter).await?;
        }
        Some(Command::Health) => {
            commands::execute_health(&connect()?, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}
