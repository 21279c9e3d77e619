pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod scaffold;
pub mod services;
pub mod telemetry;

pub use config::Settings;
pub use error::{ApiError, AppResult, ErrorBody, ErrorKind};
pub use response::{ApiResponse, PaginatedResponse, PaginationParams};
