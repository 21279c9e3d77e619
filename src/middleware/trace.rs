use axum::{body::Body, http::Request};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::Span;

/// Request spans carry the configured logger name so log lines from
/// different services can be told apart.
pub fn trace_layer(
    logger_name: &str,
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, impl Fn(&Request<Body>) -> Span + Clone>
{
    let logger_name = logger_name.to_string();
    TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        tracing::info_span!(
            "request",
            logger = %logger_name,
            method = %request.method(),
            uri = %request.uri(),
        )
    })
}
