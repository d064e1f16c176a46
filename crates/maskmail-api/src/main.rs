use anyhow::Context;
use maskmail_api::{ApiContext, build_router};
use maskmail_core::services::MaskmailConfig;
use maskmail_core::utils::logging::{LogFormat, init_tracing};
use maskmail_core::{Clock, Sweeper, SystemClock};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing before config so configuration errors are logged
    init_tracing(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));

    info!("Starting Maskmail API server");

    let config = MaskmailConfig::from_env().context("failed to load configuration")?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let ctx = ApiContext::from_config(config.clone(), Arc::clone(&clock))
        .await
        .context("failed to initialize services")?;

    let sweeper = Sweeper::new(Arc::clone(&ctx.store), clock, config.sweep_interval).spawn();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(addr = %addr, "Email Masking Backend running");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.shutdown().await;
    info!("Maskmail API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("Terminate signal received, shutting down"),
    }
}
