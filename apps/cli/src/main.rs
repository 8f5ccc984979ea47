use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use hp_client::{Client, QueryCache, ReqwestTransport, TransportConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod context;
mod domains;
mod util;

use crate::{
	context::{Context, OutputFormat},
	domains::{aggregate::AggregateCmd, events::EventsCmd, teams::TeamsCmd},
};

#[derive(Parser, Debug)]
#[command(name = "hp", about = "Hackathon portal CLI")]
struct Cli {
	/// Base URL of the portal API, falls back to HP_API_URL
	#[arg(long)]
	api_url: Option<String>,

	/// Request timeout in seconds
	#[arg(long)]
	timeout: Option<u64>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Aggregation loop of an event
	#[command(subcommand)]
	Aggregate(AggregateCmd),
	/// Event operations
	#[command(subcommand)]
	Events(EventsCmd),
	/// Team operations
	#[command(subcommand)]
	Teams(TeamsCmd),
}

fn transport_config(cli: &Cli) -> Result<TransportConfig> {
	let mut config = match &cli.api_url {
		Some(api_url) => TransportConfig::new(api_url.clone()),
		None => TransportConfig::from_env().context("no --api-url given")?,
	};

	if let Some(secs) = cli.timeout {
		config = config.with_timeout(Duration::from_secs(secs));
	}

	Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let cli = Cli::parse();
	let config = transport_config(&cli)?;

	tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Using portal API");

	let ctx = Context::new(
		Client::new(ReqwestTransport::new(), config, QueryCache::new()),
		cli.format,
	);

	match cli.command {
		Commands::Aggregate(cmd) => domains::aggregate::run(&ctx, cmd).await?,
		Commands::Events(cmd) => domains::events::run(&ctx, cmd).await?,
		Commands::Teams(cmd) => domains::teams::run(&ctx, cmd).await?,
	}

	Ok(())
}
