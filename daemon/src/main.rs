//! FairDice command-line entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fairdice_engine::{DiceConfig, RollEngine};
use fairdice_rpc::RpcServer;
use fairdice_types::{RollRecord, Timestamp, VerificationVerdict};
use fairdice_utils::{format_hash, format_timestamp, relative_time, shannon_entropy, LogFormat};
use fairdice_vrf::{BeaconClient, ProofVerifier};

#[derive(Parser)]
#[command(name = "fairdice", about = "Provably fair dice from a public randomness beacon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FAIRDICE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Base URL of the randomness beacon.
    #[arg(long, env = "FAIRDICE_BEACON_URL", global = true)]
    beacon_url: Option<String>,

    /// Bound on each beacon request, in seconds.
    #[arg(long, env = "FAIRDICE_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FAIRDICE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FAIRDICE_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// RPC server port.
    #[arg(long, env = "FAIRDICE_RPC_PORT", global = true)]
    port: Option<u16>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Roll the die.
    Roll {
        /// Number of rolls.
        #[arg(long, default_value_t = 1)]
        count: u32,

        /// Verify the last roll after rolling.
        #[arg(long)]
        verify: bool,
    },
    /// Verify an externally supplied round.
    Verify {
        #[arg(long)]
        round: u64,

        #[arg(long)]
        signature: String,

        #[arg(long)]
        threshold_proof: Option<String>,

        #[arg(long)]
        randomness: String,
    },
    /// Run the HTTP API until Ctrl-C.
    Serve,
}

/// Merge the config file (if any) with CLI/env overrides.
///
/// An unreadable config file is reported through the returned warning and
/// replaced by defaults, since logging is not yet initialised here.
fn resolve_config(cli: &Cli) -> (DiceConfig, Option<String>) {
    let (base, warning) = match cli.config.as_deref() {
        Some(path) => load_file(path),
        None => (DiceConfig::default(), None),
    };

    let config = DiceConfig {
        beacon_url: cli.beacon_url.clone().unwrap_or(base.beacon_url.clone()),
        request_timeout_secs: cli.timeout_secs.unwrap_or(base.request_timeout_secs),
        log_level: cli.log_level.clone().unwrap_or(base.log_level.clone()),
        log_format: cli.log_format.unwrap_or(base.log_format),
        rpc_port: cli.port.unwrap_or(base.rpc_port),
        ..base
    };
    (config, warning)
}

fn load_file(path: &Path) -> (DiceConfig, Option<String>) {
    match DiceConfig::from_toml_file(path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (
            DiceConfig::default(),
            Some(format!(
                "failed to load config file {}: {e}, using defaults",
                path.display()
            )),
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, warning) = resolve_config(&cli);
    fairdice_utils::init_logging(config.log_format, &config.log_level);
    match (warning, cli.config.as_deref()) {
        (Some(w), _) => tracing::warn!("{w}"),
        (None, Some(path)) => tracing::info!("Loaded config from {}", path.display()),
        (None, None) => {}
    }
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Roll { count, verify } => {
            let engine = RollEngine::from_config(&config)?;
            for n in 1..=count {
                let record = engine
                    .roll()
                    .await
                    .with_context(|| format!("roll {n} of {count} failed"))?;
                print_record(n, &record);
            }
            if verify {
                let verdict = engine.verify_current().await?;
                print_verdict(&verdict);
                if !verdict.valid {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Verify {
            round,
            signature,
            threshold_proof,
            randomness,
        } => {
            let client = BeaconClient::with_url(&config.beacon_url)
                .with_timeout(config.request_timeout());
            let verdict = ProofVerifier::new(client)
                .verify(round, &signature, threshold_proof.as_deref(), &randomness)
                .await;
            print_verdict(&verdict);
            if !verdict.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Serve => {
            let engine = Arc::new(RollEngine::from_config(&config)?);
            tracing::info!(
                "Starting FairDice API (beacon: {}, d{}, history: {})",
                config.beacon_url,
                engine.sides(),
                config.history_capacity,
            );
            RpcServer::new(config.rpc_bind.clone(), config.rpc_port, engine)
                .start()
                .await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_record(n: u32, record: &RollRecord) {
    let round = &record.round;
    let source = if record.is_demo() {
        " (local fallback)"
    } else {
        ""
    };
    println!("#{n}  rolled {}{source}", record.dice);
    println!("    round       {}", round.round);
    println!(
        "    time        {} ({})",
        format_timestamp(record.timestamp),
        relative_time(record.timestamp, Timestamp::now())
    );
    println!(
        "    committee   {}",
        round.committee_id.as_deref().unwrap_or("-")
    );
    println!("    randomness  {}", round.short_randomness());
    println!(
        "    entropy     {:.3} bits/char",
        shannon_entropy(&round.randomness)
    );
    println!("    signature   {}", format_hash(&round.signature, 10, 6));
}

fn print_verdict(verdict: &VerificationVerdict) {
    let path = match verdict.outcome {
        Some(outcome) if outcome.is_degraded() => "local fallback",
        Some(_) => "beacon",
        None => "not reached",
    };
    println!(
        "verification: {} (authenticity via {path})",
        if verdict.valid { "VALID" } else { "INVALID" }
    );
    if let Some(reason) = &verdict.reason {
        println!("    reason      {reason}");
    }
}
