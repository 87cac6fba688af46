//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use health_assistant_core::{Locale, ProviderCredentials, ProviderId};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Key and model for one chat-completion vendor.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub default_locale: Locale,
    pub provider_timeout: Duration,
    pub cors_origin: String,
    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub deepseek: ProviderSettings,
}

const MAX_PROVIDER_TIMEOUT_SECS: u64 = 120;

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server and Database Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = lookup("DATABASE_URL").ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let locale_str = var_or("DEFAULT_LOCALE", "en");
        let default_locale = locale_str
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidValue("DEFAULT_LOCALE".to_string(), e))?;

        let timeout_str = var_or("PROVIDER_TIMEOUT_SECS", "20");
        let provider_timeout = timeout_str
            .parse::<u64>()
            .ok()
            .filter(|secs| (1..=MAX_PROVIDER_TIMEOUT_SECS).contains(secs))
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PROVIDER_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a number of seconds in 1..={}", timeout_str, MAX_PROVIDER_TIMEOUT_SECS),
                )
            })?;

        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:3000");

        // --- Provider Keys (optional) and Models ---
        let provider = |key_var: &str, model_var: &str, default_model: &str| ProviderSettings {
            api_key: lookup(key_var).filter(|k| !k.trim().is_empty()),
            model: var_or(model_var, default_model),
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            default_locale,
            provider_timeout,
            cors_origin,
            openai: provider("OPENAI_API_KEY", "OPENAI_MODEL", "gpt-4o-mini"),
            gemini: provider("GEMINI_API_KEY", "GEMINI_MODEL", "gemini-2.0-flash"),
            deepseek: provider("DEEPSEEK_API_KEY", "DEEPSEEK_MODEL", "deepseek-chat"),
        })
    }

    /// The credential set handed to `ProviderRegistry::reconfigure`.
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials::new()
            .with(ProviderId::OpenAi, self.openai.api_key.clone())
            .with(ProviderId::Gemini, self.gemini.api_key.clone())
            .with(ProviderId::DeepSeek, self.deepseek.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_with_only_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/health")]).unwrap();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.provider_timeout, Duration::from_secs(20));
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingVar(v)) if v == "DATABASE_URL"));
    }

    #[test]
    fn timeout_must_be_in_range() {
        for bad in ["0", "121", "soon"] {
            let err = load(&[("DATABASE_URL", "x"), ("PROVIDER_TIMEOUT_SECS", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(v, _) if v == "PROVIDER_TIMEOUT_SECS"));
        }
    }

    #[test]
    fn blank_keys_are_treated_as_missing() {
        let config = load(&[
            ("DATABASE_URL", "x"),
            ("OPENAI_API_KEY", "sk-live"),
            ("GEMINI_API_KEY", "  "),
            ("DEFAULT_LOCALE", "bn"),
        ])
        .unwrap();
        let credentials = config.credentials();
        assert_eq!(credentials.get(ProviderId::OpenAi), Some("sk-live"));
        assert_eq!(credentials.get(ProviderId::Gemini), None);
        assert_eq!(config.default_locale, Locale::Bn);
        assert!(!format!("{:?}", config).contains("sk-live"));
    }
}
