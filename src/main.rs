use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

mod cli;

use cli::Cli;
use racr::RacrError;
use racr::config::Config;
use racr::race::{RaceConfig, Supervisor, default_workers};
use racr::runner::{CommandConfig, CommandRunner};

fn setup_logging(config: &Config) {
    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

/// Print the winning attempt's output, framed exactly once.
fn report_winner(outcome: &racr::domain::Outcome) {
    println!("\n{}", "[SUCCESS] a run found a result!".green().bold());
    println!("{}", "=".repeat(60));
    print!("{}", outcome.stdout);
    if !outcome.stderr.is_empty() {
        eprint!("[stderr] {}", outcome.stderr);
    }
    println!("{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(&config);

    let Some(command) = cli.command.clone().or_else(|| config.runner.command.clone()) else {
        eprintln!("error: no command to race; pass --command or set runner.command in the config");
        std::process::exit(2);
    };

    let workers = cli
        .workers
        .or(config.race.workers)
        .unwrap_or_else(default_workers);

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }
    println!("Using {} workers", workers);
    println!("Target: {}", cli.target);
    println!("Press Ctrl+C to stop\n");

    info!(
        "racing '{}' with {} workers toward target {}",
        command, workers, cli.target
    );

    let mut runner_config = CommandConfig::new(command);
    if let Some(ms) = config.runner.timeout_ms {
        runner_config = runner_config.timeout_ms(ms);
    }
    let runner = Arc::new(CommandRunner::new(runner_config));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let race_config = RaceConfig::default()
        .with_workers(workers)
        .with_grace(Duration::from_millis(config.race.grace_ms))
        .with_max_attempts(config.race.max_attempts);

    match Supervisor::new(race_config)
        .race(cli.target, runner, shutdown)
        .await
    {
        Ok(outcome) => {
            report_winner(&outcome);
            Ok(())
        }
        Err(RacrError::NoSuccess) => {
            eprintln!("\n{}", "No successful runs found".red());
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Race failed"),
    }
}
