use crate::error::ErrorReport;
use axum::{
    extract::Request,
    http::{header, Uri},
    middleware::Next,
    response::Response,
};

/// Logs every error response produced by an `ApiError`, together with the
/// URL of the request that caused it.
pub async fn log_api_errors(request: Request, next: Next) -> Response {
    let url = request_url(&request);
    let response = next.run(request).await;

    if let Some(report) = response.extensions().get::<ErrorReport>() {
        tracing::error!("{} at {}: {}", report.error, url, report.details);
    }

    response
}

/// Absolute request URL when the client sent a `Host`, the bare path otherwise.
fn request_url(request: &Request) -> String {
    let uri = request.uri();
    if uri.authority().is_some() {
        return uri.to_string();
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let path = uri.path_and_query().map_or("/", |pq| pq.as_str());

    match host.and_then(|host| format!("http://{host}{path}").parse::<Uri>().ok()) {
        Some(url) => url.to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use axum::{body::Body, http, http::StatusCode, routing::get, Router};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/missing", get(|| async { ApiError::not_found("gone") }))
            .route("/ok", get(|| async { "fine" }))
            .layer(axum::middleware::from_fn(log_api_errors))
    }

    async fn call_logged(request: http::Request<Body>) -> (StatusCode, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = app().oneshot(request).await.unwrap();
        (response.status(), logs.contents())
    }

    #[tokio::test]
    async fn error_responses_pass_through_unchanged() {
        let response = app()
            .oneshot(http::Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }

    #[tokio::test]
    async fn logs_kind_url_and_message_once() {
        let request = http::Request::builder().uri("/missing").body(Body::empty()).unwrap();

        let (status, logs) = call_logged(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(logs.contains("NotFoundApiException at /missing: gone"), "{logs}");
        assert_eq!(logs.matches("NotFoundApiException").count(), 1);
    }

    #[tokio::test]
    async fn logged_url_includes_host() {
        let request = http::Request::builder()
            .uri("/missing?page=2")
            .header(header::HOST, "api.example.com:8000")
            .body(Body::empty())
            .unwrap();

        let (_, logs) = call_logged(request).await;

        assert!(
            logs.contains("NotFoundApiException at http://api.example.com:8000/missing?page=2: gone"),
            "{logs}"
        );
    }

    #[tokio::test]
    async fn successful_responses_log_nothing() {
        let request = http::Request::builder().uri("/ok").body(Body::empty()).unwrap();

        let (status, logs) = call_logged(request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(logs.is_empty(), "{logs}");
    }
}
