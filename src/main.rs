use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mvmis_backend::config::{AdminBootstrap, EnvironmentConfig};
use mvmis_backend::controllers::auth_controller::AuthController;
use mvmis_backend::database::DatabaseConnection;
use mvmis_backend::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mvmis_backend=debug,tower_http=info")),
        )
        .init();

    info!("🚗 MVMIS Back-Office API");
    info!("=======================");

    let config = EnvironmentConfig::default();
    if config.is_production() && config.jwt_secret == "change-me-in-production" {
        return Err(anyhow::anyhow!("JWT_SECRET must be set in production"));
    }

    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error connecting to the database: {}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(db_connection.pool().clone(), config);

    if let Some(admin) = AdminBootstrap::from_env() {
        AuthController::new(state.pool.clone(), state.jwt.clone())
            .bootstrap_admin(&admin)
            .await?;
    }

    let app = create_app(state);

    info!("🌐 Server listening on http://{}", addr);
    info!("   GET  /health");
    info!("   POST /api/auth/login");
    info!("   /api/vehicles, /api/customers, /api/contractors, /api/registrations");
    info!("   /api/order-requisitions, /api/labor-repair-forms, /api/work-orders, /api/dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
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
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
