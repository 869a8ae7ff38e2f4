use clap::Parser;
use rrdns_application::ports::RecordStore;
use rrdns_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "rrdns")]
#[command(version)]
#[command(about = "Authoritative round-robin DNS responder for A/AAAA records")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Interface whose addresses to listen on (default: all IPv4)
    #[arg(short = 'i', long)]
    interface: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Zone suffix to answer for
    #[arg(short = 's', long)]
    suffix: Option<String>,

    /// Records file path
    #[arg(short = 'r', long, value_name = "FILE")]
    records: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        interface: cli.interface,
        port: cli.port,
        suffix: cli.suffix,
        records_path: cli.records,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting rrdns v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let services = di::DnsServices::new(&config, shutdown.clone()).await?;

    let mut listeners = services.manager.start(
        config.server.interface.as_deref(),
        config.server.effective_port(),
        &config.server.suffix,
    )?;
    info!(
        listeners = listeners.len(),
        hosts = services.store.len(),
        "DNS listeners started"
    );

    let jobs = services.jobs.start().await;

    let result = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            Ok(())
        }
        exit = listeners.wait() => {
            if let Err(ref e) = exit {
                error!(error = %e, "DNS listener failed");
            }
            exit
        }
    };

    shutdown.cancel();
    let stopped = listeners.shutdown().await;
    jobs.join().await;

    info!(
        dropped_queries = services.emitter.dropped(),
        "Server shutdown complete"
    );

    result?;
    stopped?;
    Ok(())
}
