//! Serve command - runs the HTTP API and the background reconciler

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::membership::Reconciler;
use crate::infrastructure::seed::seed_demo_data;

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Replace all data with the demo dataset before serving
    #[arg(long)]
    pub seed: bool,
}

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run(config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state_with_config(&config).await?;

    if args.seed {
        seed_demo_data(
            &state.membership,
            &state.department_service,
            &state.employee_service,
        )
        .await?;
    } else {
        crate::ensure_initial_admin(&state).await?;
    }

    let shutdown = CancellationToken::new();
    let reconciler = Reconciler::new(
        state.membership.clone(),
        config.reconcile_interval(),
        shutdown.clone(),
    )
    .spawn();

    let app = create_router(state, &config.cors);
    let addr = build_socket_addr(&config)?;
    info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    if let Err(e) = reconciler.await {
        warn!(error = %e, "Membership reconciler ended abnormally");
    }

    info!("API server shutdown complete");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM, or when `shutdown` is cancelled elsewhere
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = shutdown.cancelled() => {}
    }

    shutdown.cancel();
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
