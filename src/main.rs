//! redis-mqueue CLI - move elements between two redis lists.

use clap::Parser;
use redis_mqueue::{Config, ConnectionConfig, MqueueError, RedisStore, shutdown};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "redis-mqueue")]
#[command(about = "Move elements from one redis list to another")]
#[command(version)]
struct Cli {
    /// Redis URL, takes precedence over --host/--port
    #[arg(long, env = "REDIS_URL")]
    url: Option<String>,

    /// Redis host
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Redis port
    #[arg(short, long, default_value = "6379")]
    port: u16,

    /// Source queue name
    #[arg(short, long)]
    source: String,

    /// Destination queue name
    #[arg(short, long)]
    destination: String,

    /// LTR = Left to Right, RTL = Right to Left, LTL = Left to Left, RTR = Right to Right
    #[arg(short = 't', long, visible_alias = "how")]
    direction: String,

    /// Number of elements to move, 0 moves the current length of the source
    #[arg(short, long, default_value = "0")]
    limit: u64,

    /// Keep moving elements until SIGINT or SIGTERM
    #[arg(long)]
    daemon: bool,

    /// Move each element with a single LMOVE (redis 6.2+)
    #[arg(long)]
    atomic: bool,

    /// Daemon pause after finding the source empty, 0 polls without pausing
    #[arg(long, default_value = "100")]
    idle_interval_ms: u64,

    /// Daemon pause after a failed transfer
    #[arg(long, default_value = "1000")]
    error_backoff_ms: u64,

    /// Name announced with CLIENT SETNAME
    #[arg(long, default_value = "redis-mqueue")]
    client_name: String,

    /// Timeout in seconds for the initial connection
    #[arg(long, default_value = "15")]
    connect_timeout_secs: u64,

    /// Print the run report as JSON to stdout
    #[arg(long)]
    output_json: bool,

    /// Log verbosity when RUST_LOG is not set: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(&cli.verbosity);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, MqueueError> {
    let config = Config::new(&cli.source, &cli.destination, &cli.direction)?
        .limit(cli.limit)
        .daemon(cli.daemon)
        .atomic(cli.atomic)
        .idle_interval(Duration::from_millis(cli.idle_interval_ms))
        .error_backoff(Duration::from_millis(cli.error_backoff_ms));

    let connection = match (&cli.url, &cli.host) {
        (Some(url), _) => ConnectionConfig::new(url.as_str()),
        (None, Some(host)) => ConnectionConfig::from_host_port(host, cli.port),
        (None, None) => return Err(MqueueError::MissingOption("url or host")),
    }
    .client_name(cli.client_name.as_str())
    .connect_timeout(Duration::from_secs(cli.connect_timeout_secs));

    tracing::info!(
        source = config.source,
        destination = config.destination,
        direction = %config.direction,
        limit = config.limit,
        mode = ?config.mode,
        protocol = ?config.protocol,
        "Got inputs"
    );

    let cancel_token = CancellationToken::new();
    let listener = shutdown::listen(&config.shutdown_signals, cancel_token.clone())?;

    let mut store = RedisStore::connect(&connection).await?;

    let report = redis_mqueue::run(&mut store, &config, cancel_token).await;
    listener.abort();

    tracing::info!("{}", report.summary());

    if cli.output_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(if report.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn setup_logging(verbosity: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
