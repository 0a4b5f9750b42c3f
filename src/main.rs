mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use catalog::{Role, BUILTIN};
use clap::Parser;
use composer::compose::{DEFAULT_JWT_SECRET_PATH, MEV_BOOST_SERVICE};
use composer::{generate, resolve, ErrorKind, GenerationResult};
use sync_tracker::{track_endpoints, TrackerConfig, TrackerState};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, GenerateArgs, RunClients, TrackArgs};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Networks => {
            list_networks();
            Ok(())
        }
        Command::Clients { network } => list_clients(&network),
        Command::Track(args) => run_track(args).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<composer::Error>().map(composer::Error::kind) {
        Some(ErrorKind::Configuration) => 2,
        Some(ErrorKind::Compatibility) => 3,
        Some(ErrorKind::TemplateIntegrity) => 4,
        Some(ErrorKind::Filesystem) => 5,
        None => 1,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let run_clients = args.run_clients()?;
    let selection = resolve(&BUILTIN, &args.network, &args.client_request())?;

    for downgrade in &selection.downgrades {
        warn!(%downgrade, "Client selection adjusted");
    }
    if selection.has_custom_images() {
        warn!("Custom images are not checked for compatibility with the generated flags");
    }
    if args.map_all {
        warn!("Every container port will be published on all host interfaces");
    }
    if args.checkpoint_sync_url.is_some() {
        warn!("Checkpoint sync trusts the given endpoint for the initial state");
    }

    let options = args.generation_options(selection.mev_boost);
    let result = generate(&BUILTIN, &selection, &options)?;
    info!(
        network = %selection.network,
        path = %options.path.display(),
        execution_port = result.execution_port,
        consensus_port = result.consensus_port,
        "Deployment files generated"
    );

    let needs_token = BUILTIN
        .network(&selection.network)
        .is_some_and(|network| network.requires_auth_token);
    if needs_token && options.jwt_path.is_none() {
        ensure_jwt_secret(&options.path.join(DEFAULT_JWT_SECRET_PATH))?;
    }

    print_file(&result.env_file_path)?;
    print_file(&result.manifest_path)?;
    if let Some(command) = compose_command(&result, &run_clients, selection.mev_boost) {
        println!("Start the deployment with:\n  {command}");
    }

    if args.wait_sync && !selection.validator.omitted {
        let config = TrackerConfig::new(
            Duration::from_secs(args.sync_interval),
            Duration::from_secs(args.sync_timeout),
        );
        track(
            &format!("http://127.0.0.1:{}", result.execution_port),
            &format!("http://127.0.0.1:{}", result.consensus_port),
            config,
        )
        .await?;
    }

    Ok(())
}

async fn run_track(args: TrackArgs) -> Result<()> {
    let config = TrackerConfig::new(
        Duration::from_secs(args.interval),
        Duration::from_secs(args.timeout),
    );
    track(&args.execution_url, &args.consensus_url, config).await
}

/// Ctrl-C cancels tracking. A time-out is only a warning.
async fn track(execution_url: &str, consensus_url: &str, config: TrackerConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    info!(execution_url, consensus_url, "Waiting for clients to sync");
    let report = track_endpoints(execution_url, consensus_url, config, cancel).await;
    signal.abort();

    match report.state {
        TrackerState::Synced => {
            info!(ticks = report.ticks, "Execution and consensus clients are synced")
        }
        TrackerState::TimedOut => warn!(
            execution_synced = report.status.execution_synced,
            consensus_synced = report.status.consensus_synced,
            "Clients did not sync in time; the deployment keeps running"
        ),
        TrackerState::Cancelled => info!("Sync tracking cancelled"),
        TrackerState::Errored => match report.status.last_error {
            Some(error) => bail!("sync tracking failed: {error}"),
            None => bail!("sync tracking failed: invalid tracker configuration"),
        },
        TrackerState::Polling => {}
    }
    Ok(())
}

fn list_networks() {
    for network in BUILTIN.networks {
        println!(
            "{:<10} auth-token: {:<5} mev-boost: {:<5} type: {}",
            network.name,
            network.requires_auth_token,
            network.supports_mev(),
            network.service_type
        );
    }
}

fn list_clients(network: &str) -> Result<()> {
    let entry = BUILTIN
        .entry(network)
        .ok_or_else(|| composer::Error::UnsupportedNetwork { network: network.to_string() })?;
    for role in Role::ALL {
        println!("{role:<10} {}", entry.clients(role).join(", "));
    }
    Ok(())
}

/// Keeps an existing secret so regenerating does not break running clients.
fn ensure_jwt_secret(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let secret: [u8; 32] = rand::random();
    fs::write(path, hex::encode(secret))
        .with_context(|| format!("failed to write authentication token {}", path.display()))?;
    info!(path = %path.display(), "Generated authentication token");
    Ok(())
}

fn print_file(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    println!("# {}\n{contents}", path.display());
    Ok(())
}

fn compose_command(
    result: &GenerationResult,
    run_clients: &RunClients,
    mev_boost: bool,
) -> Option<String> {
    let mut command = format!(
        "docker compose -f {} --env-file {} up -d",
        result.manifest_path.display(),
        result.env_file_path.display()
    );
    match run_clients {
        RunClients::None => return None,
        RunClients::All => {}
        RunClients::Only(roles) => {
            for role in roles {
                command.push(' ');
                command.push_str(role.as_str());
            }
            if mev_boost && roles.contains(&Role::Consensus) {
                command.push(' ');
                command.push_str(MEV_BOOST_SERVICE);
            }
        }
    }
    Some(command)
}
