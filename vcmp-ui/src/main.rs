//! vcmp-ui - real vs. synthetic video comparison survey
//!
//! Loads the corpus, starts one session and serves the survey page until the
//! rater quits (optionally writing results) or the process is signalled.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vcmp_common::config::{default_config_path, load_toml_config, ResolvedConfig, TomlConfig};
use vcmp_common::Session;
use vcmp_ui::api::health::BuildIdentity;
use vcmp_ui::cli::Args;
use vcmp_ui::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let toml_config = match &config_path {
        Some(path) => load_toml_config(path).context("Failed to load configuration")?,
        None => TomlConfig::default(),
    };

    // RUST_LOG wins over the configured level
    let level = toml_config.logging.level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("vcmp_ui={level},vcmp_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildIdentity::current();
    info!(
        "Starting vcmp-ui v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        build.git_hash,
        build.built_at,
        build.profile
    );
    match &config_path {
        Some(path) if path.exists() => info!("Loaded configuration from {}", path.display()),
        Some(path) => warn!("Config file {} not found, using defaults", path.display()),
        None => warn!("No config directory on this platform, using defaults"),
    }

    let config = ResolvedConfig::resolve(toml_config, args.overrides())
        .context("Invalid configuration")?;
    info!("Base directory: {}", config.session.base_dir.display());
    info!("Output directory: {}", config.session.output_dir.display());

    let session = match Session::start(&config.session) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {}", e);
            return Err(e).context("Failed to load corpus");
        }
    };
    info!("Run id: {}", session.run_id());

    let shutdown = CancellationToken::new();
    let state = AppState::new(session, shutdown.clone());
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("vcmp-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, SIGTERM, or when the rater quits
async fn shutdown_signal(quit: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down without writing results");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down without writing results");
        },
        _ = quit.cancelled() => {
            info!("Session ended by rater, shutting down");
        },
    }
}
