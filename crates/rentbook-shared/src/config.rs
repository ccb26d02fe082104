//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ABSOLUTE_TIMEOUT_SECS, DEFAULT_ELECTRICITY_UNIT_RATE, DEFAULT_IDLE_TIMEOUT_SECS,
    DEFAULT_SESSION_COOKIE, DEFAULT_SWEEP_INTERVAL_SECS,
};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub session: SessionSettings,
    pub security: SecuritySettings,
    pub billing: BillingSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Browser origin allowed to send credentialed requests.
    pub cors_origin: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            env: "development".into(),
            host: "127.0.0.1".into(),
            port: 5000,
            name: "rentbook-server".into(),
            cors_origin: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub idle_timeout_secs: i64,
    pub absolute_timeout_secs: i64,
    pub sweep_interval_secs: u64,
    pub secure_cookie: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.into(),
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            absolute_timeout_secs: DEFAULT_ABSOLUTE_TIMEOUT_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            secure_cookie: false,
        }
    }
}

/// Argon2id work factor. Fixed for the lifetime of the process.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SecuritySettings {
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            argon2_memory_kib: 19_456,
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BillingSettings {
    pub electricity_unit_rate: i64,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self { electricity_unit_rate: DEFAULT_ELECTRICITY_UNIT_RATE }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: true,
            directory: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("RENTBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app.port, 5000);
        assert_eq!(config.session.cookie_name, "rentbook_sid");
        assert_eq!(config.billing.electricity_unit_rate, 1);
        assert!(config.session.idle_timeout_secs <= config.session.absolute_timeout_secs);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("session.idle_timeout_secs", 60)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.session.idle_timeout_secs, 60);
        assert_eq!(config.session.cookie_name, "rentbook_sid");
        assert_eq!(config.security.argon2_iterations, 2);
    }
}
