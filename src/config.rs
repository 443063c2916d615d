use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub inventory: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// How long an inventory snapshot may be served before it is reloaded.
    pub ttl_secs: Option<u64>,
}

/// Log output settings.
///
/// `format` is `json`, `pretty` or anything else for plain lines.
/// `RUST_LOG` takes precedence over `level` when set.
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
    /// 1. Configuration file (config/default.toml)
    /// 2. Local overrides (config/local.toml)
    /// 3. Environment variables (prefixed with PARTS__)
    /// 4. Plain APPWRITE_* variables for the store credentials
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PARTS__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_appwrite_env(settings, |key| std::env::var(key).ok())?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PARTS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Overlay the store credentials from `APPWRITE_*` variables.
///
/// Deployments usually inject these from a secret store under their plain
/// names, so they take precedence over everything else.
fn apply_appwrite_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const OVERRIDES: [(&str, &str); 4] = [
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_PROJECT_ID", "appwrite.project_id"),
        ("APPWRITE_DATABASE_ID", "appwrite.database_id"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in OVERRIDES {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
