use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use obs_stream_notifier::{
    serve_metrics, wait_for_shutdown_signal, Config, ConnectionSupervisor, EventRouter,
    ObsWebSocketSource, PrometheusReporter, StreamStateTracker, TelegramNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();
    config.validate()?;

    // Initialize logging
    let filter = if config.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    PrometheusReporter::init_metrics()?;

    // Convert CLI config to domain configs
    let obs_config = config.to_obs_config()?;
    let telegram_config = config.to_telegram_config()?;
    let profile = config.to_streamer_profile()?;
    let reconnect_policy = config.to_reconnect_policy()?;

    info!("Starting OBS stream notifier");
    info!("  OBS WebSocket: {}", obs_config.websocket_url());
    info!("  Streamer: {} ({})", profile.name(), profile.watch_url());
    info!("  Telegram chat: {}", telegram_config.chat_id());
    info!("  Metrics port: {}", config.metrics_port);

    // Create infrastructure implementations (dependency injection)
    let metrics = Arc::new(PrometheusReporter::new());
    let notifier = Arc::new(TelegramNotifier::new(telegram_config)?);
    let source = Box::new(ObsWebSocketSource::new(obs_config, config.check_interval()));

    // Wire the application services
    let tracker = StreamStateTracker::new(profile, notifier, metrics.clone());
    let router = Arc::new(EventRouter::new(tracker, metrics.clone()));
    let mut supervisor = ConnectionSupervisor::new(source, router, reconnect_policy, metrics);

    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal().await {
            error!("Failed to listen for shutdown signals: {}", e);
            return;
        }
        info!("Received shutdown signal");
        signal_token.cancel();
    });

    let metrics_server = tokio::spawn(serve_metrics(config.metrics_port, shutdown.clone()));

    supervisor.run_with_reconnect(shutdown.clone()).await;

    // Stop the metrics server as well if the supervisor exited on its own
    shutdown.cancel();
    metrics_server.await?;

    info!("Notifier shutdown complete");
    Ok(())
}
