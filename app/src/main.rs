use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;
use numproc::{ComputationList, HttpExpressionService, StdoutSink};

mod config;
mod runner;

use config::Mode;

#[derive(Parser)]
#[command(name = "numproc")]
#[command(about = "Runs a JSON list of numeric computations")]
struct Cli {
    /// JSON file of the form {"computations": [...]}
    file: PathBuf,
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    #[arg(long = "service-url")]
    service_url: Option<String>,
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
    /// Write the effective configuration back to the config file.
    #[arg(long = "save-config")]
    save_config: bool,
}

fn init_logger(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger(&cli.log_level);

    let mut config = config::load_config(cli.config.as_deref());

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(service_url) = cli.service_url {
        config.service_url = service_url;
    }
    if cli.timeout_secs.is_some() {
        config.timeout_secs = cli.timeout_secs;
    }
    debug!("Effective config: {:?}", config);
    if cli.save_config {
        config::save_config(&config, cli.config.as_deref());
    }

    let computations = ComputationList::from_file(&cli.file)
        .with_context(|| format!("Failed to load computations from {}", cli.file.display()))?
        .into_computations();
    let service = HttpExpressionService::with_timeout(config.service_url.clone(), config.timeout());

    runner::run_computations(computations, config.mode, Box::new(service), StdoutSink)
        .context("Computation run aborted")?;
    Ok(())
}
