use crate::config::Settings;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Connect to `DATABASE_URL`. An empty URL means the service runs without
/// persistence and `Ok(None)` is returned.
pub async fn connect(settings: &Settings) -> Result<Option<DatabaseConnection>, DbErr> {
    let Some(database_url) = settings.database_url() else {
        return Ok(None);
    };

    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(settings.debug);

    Database::connect(opt).await.map(Some)
}
