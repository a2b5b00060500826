use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "SHELF_ENV";
const CONFIG_DIR_ENV: &str = "SHELF_CONFIG_DIR";
const ENV_PREFIX: &str = "SHELF";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub web: WebSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        Self::load_from(&config_dir, &environment)
    }

    /// Load from an explicit config directory and environment name.
    pub fn load_from(config_dir: &std::path::Path, environment: &str) -> anyhow::Result<Self> {
        let parsed = match environment {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parsed;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Which backend client implementation serves catalog operations.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// HTTP calls against `service.base_url`
    #[default]
    Live,
    /// Seeded in-memory store, for demos and local development
    Memory,
}

/// Remote catalog service the backend client talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "ServiceSettings::default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request; `Bearer` alone when unset
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub backend: Backend,
}

impl ServiceSettings {
    fn default_base_url() -> String {
        "http://127.0.0.1:3001".to_string()
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            token: None,
            backend: Backend::default(),
        }
    }
}

/// Public address of this application, reported by the `webURL` procedure.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSettings {
    #[serde(default = "WebSettings::default_base_url")]
    pub base_url: String,
}

impl WebSettings {
    fn default_base_url() -> String {
        "http://127.0.0.1:8080".to_string()
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info,tower_http=debug".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_service_is_live_localhost() {
        let settings = Settings::default();
        assert_eq!(settings.service.base_url, "http://127.0.0.1:3001");
        assert_eq!(settings.service.backend, Backend::Live);
        assert!(settings.service.token.is_none());
    }

    #[test]
    fn rejects_unknown_environment() {
        let dir = std::env::temp_dir();
        let err = Settings::load_from(&dir, "moon").unwrap_err();
        assert!(err.to_string().contains("unsupported environment"));
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = std::env::temp_dir().join(format!("shelf-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut base = std::fs::File::create(dir.join("base.toml")).unwrap();
        writeln!(base, "[service]\nbase_url = \"http://base:1\"\nbackend = \"memory\"").unwrap();
        let mut staging = std::fs::File::create(dir.join("staging.toml")).unwrap();
        writeln!(staging, "[service]\nbase_url = \"http://staging:2\"").unwrap();

        let settings = Settings::load_from(&dir, "staging").unwrap();
        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.service.base_url, "http://staging:2");
        assert_eq!(settings.service.backend, Backend::Memory);
        assert_eq!(settings.server.port, 8080);

        std::fs::remove_dir_all(&dir).ok();
    }
}
