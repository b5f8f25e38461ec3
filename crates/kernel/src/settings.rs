use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "FOLIO_ENV";
const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

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
    pub store: StoreSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to repo root `config` directory.
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_filename = format!("{}.toml", environment);
        let environment_path = config_dir.join(environment_filename);

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("_"));

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
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

/// Paging knobs for the document store. `max_page_size` caps client-supplied
/// limits server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "StoreSettings::default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "StoreSettings::default_max_page_size")]
    pub max_page_size: u64,
}

impl StoreSettings {
    fn default_page_size() -> u64 {
        10
    }

    fn default_max_page_size() -> u64 {
        100
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_page_size: Self::default_page_size(),
            max_page_size: Self::default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
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

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "AuthSettings::default_session_cookie")]
    pub session_cookie: String,
    #[serde(default = "AuthSettings::default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,
}

impl AuthSettings {
    fn default_session_cookie() -> String {
        "folio_session".to_string()
    }

    fn default_session_ttl_minutes() -> u64 {
        60 * 24 * 7
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_cookie: Self::default_session_cookie(),
            session_ttl_minutes: Self::default_session_ttl_minutes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_succeeds_without_config_files() {
        // Config files are optional; the loader falls back to defaults.
        let settings = Settings::load().unwrap();
        assert!(settings.store.max_page_size >= 1);
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_page_sizes_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.store.default_page_size, 10);
        assert!(settings.store.max_page_size >= settings.store.default_page_size);
    }

    #[test]
    fn default_session_cookie_name() {
        let settings = Settings::default();
        assert_eq!(settings.auth.session_cookie, "folio_session");
    }
}
