use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub compatibility: CompatibilitySettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Profile backend (`/api/users/*`)
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub endpoint: String,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_timeout() -> u64 { 10 }

/// External AI compatibility backend (`/api/match/*`)
#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilitySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_call_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_request_deadline_ms")]
    pub request_deadline_ms: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for CompatibilitySettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: String::new(),
            timeout_ms: default_call_timeout_ms(),
            request_deadline_ms: default_request_deadline_ms(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_true() -> bool { true }
fn default_call_timeout_ms() -> u64 { 3000 }
fn default_request_deadline_ms() -> u64 { 10_000 }
fn default_concurrency() -> usize { 8 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_ttl() -> u64 { 1800 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCH__COMPATIBILITY__ENDPOINT -> compatibility.endpoint
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [server]
                host = "127.0.0.1"
                port = 8080

                [backend]
                endpoint = "http://users.test"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.compatibility.enabled);
        assert_eq!(settings.compatibility.concurrency, 8);
        assert_eq!(settings.matching.default_limit, 20);
        assert_eq!(settings.matching.max_limit, 100);
        assert_eq!(settings.backend.timeout_secs, 10);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
