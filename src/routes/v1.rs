use crate::handlers;
use axum::{routing, Router};

pub fn routes() -> Router {
    Router::new()
        .route("/auth/health", routing::get(handlers::health::health))
        .route(
            "/items",
            routing::get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/items/{id}",
            routing::get(handlers::item::get_item).delete(handlers::item::delete_item),
        )
}
