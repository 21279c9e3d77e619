use api_starter::{app::create_app, config, migration::Migrator, telemetry, Settings};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Arc::new(Settings::from_env()?);
    telemetry::init_tracing(&settings);

    let db = config::database::connect(&settings).await?;
    match &db {
        Some(db) => {
            tracing::info!("Database connected successfully");
            Migrator::up(db, None).await?;
            tracing::info!("Database migrations applied successfully");
        }
        None => tracing::warn!("DATABASE_URL not set, running without database"),
    }

    let app = create_app(settings.clone(), db);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        logger = %settings.logger_name,
        "{} (v{}) is running successfully in {} mode on {}",
        settings.app_name,
        settings.app_version,
        settings.environment,
        addr
    );
    tracing::info!("API docs available at http://{}/redoc", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
