use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use catalog::Role;
use clap::{Args, Parser, Subcommand};
use composer::options::{DEFAULT_GENERATION_PATH, DEFAULT_NETWORK};
use composer::{ClientRequest, GenerationOptions, LoggingDriver, RequestedClient};
use sync_tracker::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SYNC_DEADLINE_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "nodekit",
    version,
    about = "Assemble Ethereum node deployments from compatible clients"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the environment file and manifest for a client selection
    Generate(GenerateArgs),
    /// List supported networks
    Networks,
    /// List the clients a network supports
    Clients {
        #[arg(short, long, default_value = DEFAULT_NETWORK)]
        network: String,
    },
    /// Wait for running clients to finish syncing
    Track(TrackArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Execution client as `name` or `name:image`
    #[arg(short, long, default_value = "")]
    pub execution: RequestedClient,

    /// Consensus client as `name` or `name:image`
    #[arg(short, long, default_value = "")]
    pub consensus: RequestedClient,

    /// Validator client as `name` or `name:image`
    #[arg(short, long, default_value = "")]
    pub validator: RequestedClient,

    #[arg(long)]
    pub no_validator: bool,

    #[arg(long)]
    pub no_mev_boost: bool,

    #[arg(short = 'm', long)]
    pub mev_boost_image: Option<String>,

    /// Replaces the network's default relays
    #[arg(long, value_delimiter = ',')]
    pub relay_urls: Vec<String>,

    #[arg(short, long, default_value = DEFAULT_GENERATION_PATH)]
    pub path: PathBuf,

    #[arg(long)]
    pub checkpoint_sync_url: Option<String>,

    #[arg(long)]
    pub fee_recipient: Option<String>,

    /// Absolute path of an existing authentication token
    #[arg(long)]
    pub jwt_secret_path: Option<PathBuf>,

    #[arg(long)]
    pub graffiti: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub fallback_execution_urls: Vec<String>,

    #[arg(long = "el-extra-flag", allow_hyphen_values = true)]
    pub el_extra_flags: Vec<String>,

    #[arg(long = "cl-extra-flag", allow_hyphen_values = true)]
    pub cl_extra_flags: Vec<String>,

    #[arg(long = "vl-extra-flag", allow_hyphen_values = true)]
    pub vl_extra_flags: Vec<String>,

    /// Publish every container port on all interfaces
    #[arg(long)]
    pub map_all: bool,

    /// `json` or `none`
    #[arg(long, default_value = "json")]
    pub logging: LoggingDriver,

    /// Services to start: execution, consensus, validator, or all / none alone
    #[arg(long, value_delimiter = ',', default_value = "execution,consensus")]
    pub run_clients: Vec<String>,

    #[arg(long)]
    pub wait_sync: bool,

    /// Seconds to wait for both clients to sync
    #[arg(long, default_value_t = DEFAULT_SYNC_DEADLINE_SECS)]
    pub sync_timeout: u64,

    /// Seconds between two sync checks
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sync_interval: u64,
}

#[derive(Args, Debug)]
pub struct TrackArgs {
    #[arg(long)]
    pub execution_url: String,

    #[arg(long)]
    pub consensus_url: String,

    /// Seconds to wait for both clients to sync
    #[arg(long, default_value_t = DEFAULT_SYNC_DEADLINE_SECS)]
    pub timeout: u64,

    /// Seconds between two sync checks
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,
}

/// Which services `docker compose up` should start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunClients {
    All,
    None,
    Only(Vec<Role>),
}

impl GenerateArgs {
    pub fn client_request(&self) -> ClientRequest {
        ClientRequest {
            execution: self.execution.clone(),
            consensus: self.consensus.clone(),
            validator: (!self.no_validator).then(|| self.validator.clone()),
            mev_boost: !self.no_mev_boost,
        }
    }

    pub fn run_clients(&self) -> Result<RunClients> {
        let names: Vec<&str> = self.run_clients.iter().map(|s| s.trim()).collect();
        if names.iter().any(|n| matches!(*n, "all" | "none")) {
            return match names.as_slice() {
                ["all"] => Ok(RunClients::All),
                ["none"] => Ok(RunClients::None),
                _ => bail!("'all' and 'none' cannot be combined with other run clients"),
            };
        }

        let mut roles = Vec::new();
        for name in names {
            let role: Role = name.parse().map_err(anyhow::Error::msg)?;
            if role == Role::Validator && self.no_validator {
                continue;
            }
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        Ok(RunClients::Only(roles))
    }

    pub fn generation_options(&self, mev_enabled: bool) -> GenerationOptions {
        let extra_flags: BTreeMap<Role, Vec<String>> = [
            (Role::Execution, &self.el_extra_flags),
            (Role::Consensus, &self.cl_extra_flags),
            (Role::Validator, &self.vl_extra_flags),
        ]
        .into_iter()
        .filter(|(_, flags)| !flags.is_empty())
        .map(|(role, flags)| (role, flags.clone()))
        .collect();

        GenerationOptions {
            network: self.network.clone(),
            path: self.path.clone(),
            checkpoint_sync_url: self.checkpoint_sync_url.clone(),
            fee_recipient: self.fee_recipient.clone(),
            jwt_path: self.jwt_secret_path.clone(),
            graffiti: self.graffiti.clone(),
            fallback_execution_urls: self.fallback_execution_urls.clone(),
            relay_urls: self.relay_urls.clone(),
            extra_flags,
            map_all_ports: self.map_all,
            mev_enabled,
            mev_image: self.mev_boost_image.clone(),
            logging_driver: self.logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(["nodekit", "generate"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Generate(args) => args,
            other => panic!("parsed {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let args = generate_args(&[]);
        assert_eq!(args.network, "mainnet");
        assert_eq!(args.path, PathBuf::from("./nodekit-data"));
        assert_eq!(
            args.run_clients().unwrap(),
            RunClients::Only(vec![Role::Execution, Role::Consensus])
        );

        let request = args.client_request();
        assert!(request.mev_boost);
        assert_eq!(request.validator, Some(RequestedClient::default()));
    }

    #[test]
    fn test_client_with_image() {
        let args = generate_args(&[
            "-e",
            "geth:ethereum/client-go:v1.13.0",
            "--no-validator",
            "--no-mev-boost",
        ]);
        let request = args.client_request();
        assert_eq!(request.execution.name, "geth");
        assert_eq!(request.execution.image.as_deref(), Some("ethereum/client-go:v1.13.0"));
        assert_eq!(request.validator, None);
        assert!(!request.mev_boost);
    }

    #[rstest]
    #[case(&["--run-clients", "all"], Some(RunClients::All))]
    #[case(&["--run-clients", "none"], Some(RunClients::None))]
    #[case(&["--run-clients", "all,execution"], None)]
    #[case(&["--run-clients", "execution,beacon"], None)]
    #[case(&["--run-clients", "validator,execution", "--no-validator"], Some(RunClients::Only(vec![Role::Execution])))]
    fn test_run_clients(#[case] args: &[&str], #[case] expected: Option<RunClients>) {
        assert_eq!(generate_args(args).run_clients().ok(), expected);
    }

    #[test]
    fn test_extra_flags_by_role() {
        let args = generate_args(&[
            "--cl-extra-flag",
            "--target-peers=50",
            "--cl-extra-flag",
            "--foo",
        ]);
        let options = args.generation_options(true);
        assert_eq!(
            options.extra_flags.get(&Role::Consensus),
            Some(&vec!["--target-peers=50".to_string(), "--foo".to_string()])
        );
        assert!(!options.extra_flags.contains_key(&Role::Execution));
        assert!(options.mev_enabled);
    }

    #[test]
    fn test_zero_sync_interval_rejected() {
        assert!(Cli::try_parse_from(["nodekit", "generate", "--sync-interval", "0"]).is_err());
    }
}
