//! Workplace Relay - webhook receiver that forwards group posts to Slack.
//!
//! This binary:
//! - Answers the Workplace subscription handshake
//! - Verifies payload signatures
//! - Looks up group and author names on the graph API
//! - Posts one Slack message per entry

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workplace_relay::web::CALLBACK_PATH;
use workplace_relay::{router, AppState, Config, SignatureCheck};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        verification_token_configured = config.verification_token.is_some(),
        access_token_configured = config.access_token.is_some(),
        slack_webhook_configured = config.slack_webhook_uri.is_some(),
        graph_api_base = %config.graph_api_base,
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    match config.signature_check() {
        SignatureCheck::Enabled(_) => info!("signature_check_enabled"),
        SignatureCheck::Disabled => {
            warn!("signature_check_disabled: AppSecret not set, payloads are not authenticated")
        }
    }

    if config.slack_webhook_uri.is_none() {
        warn!("slack_webhook_uri_missing: callbacks will fail until SlackWebhookUri is set");
    }

    let port = config.port;
    let state = AppState::from_config(config)?;
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, callback_path = CALLBACK_PATH, "relay_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}
