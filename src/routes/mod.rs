use axum::Router;

mod v1;

/// Versioned API routes. v1 is mounted at the root so existing clients keep
/// their paths.
pub fn create_routes() -> Router {
    Router::new().merge(v1::routes())
}
