use crate::config::Settings;
use axum::{
    response::{Html, Redirect},
    Extension,
};
use std::sync::Arc;

pub const OPENAPI_PATH: &str = "/openapi.json";

pub async fn root_redirect() -> Redirect {
    Redirect::temporary("/redoc")
}

pub async fn redoc(Extension(settings): Extension<Arc<Settings>>) -> Html<String> {
    Html(redoc_page(&settings.app_name, OPENAPI_PATH))
}

fn redoc_page(title: &str, spec_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>{title} - ReDoc</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>body {{ margin: 0; padding: 0; }}</style>
  </head>
  <body>
    <redoc spec-url="{spec_url}"></redoc>
    <script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
  </body>
</html>
"#,
        title = html_escape(title),
    )
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
