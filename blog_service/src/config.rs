use std::{env, path::Path, sync::OnceLock};

use blog_request::query::page::DEFAULT_PAGE_SIZE;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the blog service,
/// including storage, tracing and search settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Node-specific configuration
    pub node: NodeConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

/// Database configuration.
///
/// Supports either in-memory storage or `PostgreSQL` database.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum DatabaseConfig {
    /// In-memory database storage
    Memory,
    /// `PostgreSQL` database connection
    Postgres(PostgresConfig),
}

/// `PostgreSQL` database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
    /// `PostgreSQL` connection string
    pub connection: String,
    /// Upper bound of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Create missing tables on startup
    #[serde(default)]
    pub ensure_schema: bool,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// No output
    Memory,
    /// Standard output tracing
    Stdout,
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Match substring filters regardless of letter case
    #[serde(default)]
    pub case_insensitive: bool,
    /// Page size used when a search does not name one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

/// Node-specific configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Worker number for this node instance, embedded in generated ids
    pub worker_number: u16,
}

const CONFIG_PATH_ENV: &str = "BLOG_CONFIG_PATH";
const ENV_PREFIX: &str = "BLOG";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Gets the global application configuration instance.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be loaded.
    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AppConfig> = OnceLock::new();
        INSTANCE.get_or_init(|| Self::load().unwrap())
    }

    /// Loads configuration from files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Loads configuration rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let mut config_builder =
            Config::builder().set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        let default_path = config_path.join("default");
        config_builder =
            config_builder.add_source(File::with_name(&default_path.to_string_lossy()));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        let local_path = config_path.join("local");
        config_builder = config_builder
            .add_source(File::with_name(&local_path.to_string_lossy()).required(false));

        // Add in settings from the environment (with a prefix of BLOG)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(config_builder.build()?.try_deserialize()?)
    }
}
