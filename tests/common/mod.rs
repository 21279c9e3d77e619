#![allow(dead_code)]

use api_starter::{app::create_app, migration::Migrator, Settings};
use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

pub struct TestApp {
    pub addr: String,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

/// App without a database, default settings.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Settings::default(), None).await
}

/// App backed by a fresh in-memory SQLite database with migrations applied.
pub async fn spawn_app_with_db() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db: DatabaseConnection = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    spawn_app_with(Settings::default(), Some(db)).await
}

pub async fn spawn_app_with(settings: Settings, db: Option<DatabaseConnection>) -> TestApp {
    let app = create_app(Arc::new(settings), db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr: format!("http://{}", addr),
        client,
    }
}
