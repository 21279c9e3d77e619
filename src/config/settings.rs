use std::env;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_APP_NAME: &str = "FastAPI Service";
const DEFAULT_APP_VERSION: &str = "0.1.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ALLOWED_ORIGINS: &str = "*";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_LOGGER_NAME: &str = "fastapi-app";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: String,
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub allowed_origins: String,
    pub log_level: String,
    pub logger_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            debug: true,
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            database_url: String::new(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment. Call `dotenv::dotenv()`
    /// beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);

        let debug = lookup("DEBUG")
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.debug);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            environment: string("ENVIRONMENT", defaults.environment),
            app_name: string("APP_NAME", defaults.app_name),
            app_version: string("APP_VERSION", defaults.app_version),
            debug,
            port,
            host: string("HOST", defaults.host),
            database_url: string("DATABASE_URL", defaults.database_url),
            allowed_origins: string("ALLOWED_ORIGINS", defaults.allowed_origins),
            log_level: string("LOG_LEVEL", defaults.log_level),
            logger_name: string("LOGGER_NAME", defaults.logger_name),
        })
    }

    /// `"*"` is the wildcard; anything else is a comma-separated list.
    pub fn allowed_origins(&self) -> Vec<String> {
        if self.allowed_origins == "*" {
            return vec!["*".to_string()];
        }
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn database_url(&self) -> Option<&str> {
        let url = self.database_url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" | "warning" => LevelFilter::WARN,
            "error" | "critical" | "fatal" => LevelFilter::ERROR,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::INFO,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_with(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let settings = settings_with(&[]);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.app_name, "FastAPI Service");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.host, "0.0.0.0");
        assert!(settings.debug);
        assert_eq!(settings.logger_name, "fastapi-app");
        assert_eq!(settings.database_url(), None);
    }

    #[test]
    fn wildcard_origins() {
        let settings = settings_with(&[("ALLOWED_ORIGINS", "*")]);
        assert_eq!(settings.allowed_origins(), vec!["*"]);
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        let settings = settings_with(&[("ALLOWED_ORIGINS", "a, b ,,c")]);
        assert_eq!(settings.allowed_origins(), vec!["a", "b", "c"]);
    }

    #[test]
    fn debug_true_is_case_insensitive() {
        for raw in ["TRUE", "true", "True"] {
            assert!(settings_with(&[("DEBUG", raw)]).debug, "{raw}");
        }
        for raw in ["false", "1", "yes", "", "truee"] {
            assert!(!settings_with(&[("DEBUG", raw)]).debug, "{raw}");
        }
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Settings::from_lookup(|key| (key == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn log_level_names() {
        let level = |raw: &str| settings_with(&[("LOG_LEVEL", raw)]).log_level_filter();
        assert_eq!(level("INFO"), LevelFilter::INFO);
        assert_eq!(level("debug"), LevelFilter::DEBUG);
        assert_eq!(level("WARNING"), LevelFilter::WARN);
        assert_eq!(level("CRITICAL"), LevelFilter::ERROR);
        assert_eq!(level("verbose"), LevelFilter::INFO);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let settings = settings_with(&[("HOST", "127.0.0.1"), ("PORT", "9000")]);
        assert_eq!(settings.bind_address(), "127.0.0.1:9000");
    }
}
