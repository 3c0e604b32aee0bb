use clap::Parser;
use eunoia_agent::{learning, AgentOptions, AgentSnapshot, WellnessAgent};
use eunoia_core::EunoiaConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "eunoia.toml")]
    config: String,

    /// Bind address for the gateway (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port for the gateway (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the JSON state snapshot (overrides config)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = EunoiaConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.gateway.host = host;
    }
    if let Some(port) = args.port {
        config.gateway.port = port;
    }
    if let Some(path) = args.snapshot {
        config.persistence.snapshot_path = path;
    }

    info!("Starting Eunoia wellness service");

    let snapshot = AgentSnapshot::load_or_default(&config.persistence.snapshot_path);
    let agent = Arc::new(WellnessAgent::restore(
        snapshot,
        AgentOptions {
            learn_cycle: Duration::from_millis(config.learning.cycle_millis),
            rng_seed: None,
        },
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = learning::spawn_scheduler(
        agent.clone(),
        config.learning.interval_secs,
        config.learning.retry_secs,
        shutdown_rx.clone(),
    );

    let gateway_agent = agent.clone();
    let gateway_host = config.gateway.host.clone();
    let gateway_port = config.gateway.port;
    let mut gateway_shutdown = shutdown_rx;
    let gateway = tokio::spawn(async move {
        let shutdown = async move {
            let _ = gateway_shutdown.changed().await;
        };
        if let Err(e) =
            eunoia_gateway::serve(gateway_agent, &gateway_host, gateway_port, shutdown).await
        {
            error!("Gateway exited with error: {e}");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);

    let _ = gateway.await;
    let _ = scheduler.await;

    let snapshot = agent.export_snapshot().await;
    match snapshot.save(&config.persistence.snapshot_path) {
        Ok(()) => info!(
            "State snapshot written to {}",
            config.persistence.snapshot_path.display()
        ),
        Err(e) => error!("Failed to write state snapshot: {e:#}"),
    }

    info!("Eunoia stopped");
    Ok(())
}
