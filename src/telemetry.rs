use crate::config::Settings;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over `LOG_LEVEL` when set. Debug mode logs human-readable
/// lines; otherwise one JSON object per event.
pub fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(settings)));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.debug {
        registry.with(fmt::layer()).init();
    } else {
        registry.with(fmt::layer().json()).init();
    }
}

fn default_directives(settings: &Settings) -> String {
    let level = settings.log_level_filter().to_string().to_ascii_lowercase();
    format!("{level},tower_http={level},sqlx=warn")
}
