use crate::config::Settings;
use crate::handlers::{docs, fallback};
use crate::middleware::{cors::build_cors_layer, exception::log_api_errors, trace::trace_layer};
use crate::routes;
use axum::{middleware, routing::get, Extension, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health,
        crate::handlers::item::list_items,
        crate::handlers::item::get_item,
        crate::handlers::item::create_item,
        crate::handlers::item::delete_item,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::handlers::health::HealthResponse,
            crate::handlers::item::ItemResponse,
            crate::handlers::item::CreateItemRequest,
        )
    ),
    tags(
        (name = "auth", description = "Service status"),
        (name = "items", description = "Sample soft-deletable resource"),
    )
)]
pub struct ApiDoc;

/// OpenAPI document with title, version and description taken from settings.
pub fn openapi(settings: &Settings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.app_name.clone();
    doc.info.version = settings.app_version.clone();
    doc.info.description = Some(format!(
        "{} API, running in {} mode.",
        settings.app_name, settings.environment
    ));
    doc
}

pub fn create_app(settings: Arc<Settings>, db: Option<DatabaseConnection>) -> Router {
    let mut app = Router::new()
        .route("/", get(docs::root_redirect))
        .route("/redoc", get(docs::redoc))
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/docs").url(docs::OPENAPI_PATH, openapi(&settings)))
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .layer(middleware::from_fn(log_api_errors))
        .layer(trace_layer(&settings.logger_name))
        .layer(build_cors_layer(&settings))
        .layer(Extension(settings));

    if let Some(db) = db {
        app = app.layer(Extension(db));
    }

    app
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_comes_from_settings() {
        let settings = Settings {
            app_name: "Orders".to_string(),
            app_version: "2.3.4".to_string(),
            environment: "staging".to_string(),
            ..Settings::default()
        };
        let doc = openapi(&settings);
        assert_eq!(doc.info.title, "Orders");
        assert_eq!(doc.info.version, "2.3.4");
        assert_eq!(
            doc.info.description.as_deref(),
            Some("Orders API, running in staging mode.")
        );
        assert!(doc.paths.paths.contains_key("/auth/health"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
    }

    #[test]
    fn item_timestamps_are_documented_as_date_time() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let props = &doc["components"]["schemas"]["ItemResponse"]["properties"];

        assert_eq!(props["created_at"]["format"], "date-time");
        assert_eq!(props["updated_at"]["format"], "date-time");
    }
}
