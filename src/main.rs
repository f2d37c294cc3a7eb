use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{cors_origins_from_env_value, router, AppState};
use neurocase_core::{
    config::{busy_timeout_from_env_value, database_path_from_env_value},
    db, CoreConfig,
};

/// Main entry point for the neurocase server.
///
/// Resolves configuration from the environment, brings the schema up to date, then serves the
/// REST API until interrupted.
///
/// # Environment Variables
/// - `NEUROCASE_DB_PATH`: SQLite database file (default: "neurocase.db")
/// - `NEUROCASE_BUSY_TIMEOUT_MS`: how long a writer waits on a locked database (default: 5000)
/// - `NEUROCASE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NEUROCASE_CORS_ORIGINS`: comma-separated allowed origins
///   (default: "http://localhost,http://localhost:8080")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neurocase=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_path = database_path_from_env_value(std::env::var("NEUROCASE_DB_PATH").ok());
    let busy_timeout =
        busy_timeout_from_env_value(std::env::var("NEUROCASE_BUSY_TIMEOUT_MS").ok())?;
    let cfg = Arc::new(CoreConfig::new(database_path, busy_timeout)?);

    let version = db::migrate(&cfg)?;
    tracing::info!(
        path = %cfg.database_path().display(),
        version,
        "database ready"
    );

    let origins = cors_origins_from_env_value(std::env::var("NEUROCASE_CORS_ORIGINS").ok())?;
    let app = router(AppState { cfg }, origins);

    let addr = std::env::var("NEUROCASE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    tracing::info!("++ Starting neurocase REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
