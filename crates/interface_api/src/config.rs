//! API configuration

use std::time::Duration;

use infra_db::DatabaseConfig;
use infra_messaging::AmqpConfig;
use serde::Deserialize;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// API configuration
///
/// Every field can be set through an `API_`-prefixed environment variable,
/// e.g. `API_PORT=9000` or `API_AMQP_URL=amqp://rabbit:5672/%2f`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pool size
    pub db_max_connections: u32,
    /// Broker URL; notifications are only logged when unset
    pub amqp_url: Option<String>,
    /// Topic exchange for customer notifications
    pub amqp_exchange: String,
    /// Publish timeout in milliseconds
    pub amqp_publish_timeout_ms: u64,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: infra_db::pool::DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: 10,
            amqp_url: None,
            amqp_exchange: infra_messaging::config::DEFAULT_EXCHANGE.to_string(),
            amqp_publish_timeout_ms: 5_000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment on top of the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("database_url", defaults.database_url)?
            .set_default("db_max_connections", defaults.db_max_connections)?
            .set_default("amqp_exchange", defaults.amqp_exchange)?
            .set_default("amqp_publish_timeout_ms", defaults.amqp_publish_timeout_ms)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "text")?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for the database adapter
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url).max_connections(self.db_max_connections)
    }

    /// Broker settings, if a broker URL is configured
    pub fn amqp_config(&self) -> Option<AmqpConfig> {
        self.amqp_url.as_ref().map(|url| {
            AmqpConfig::new(url)
                .exchange(&self.amqp_exchange)
                .publish_timeout(Duration::from_millis(self.amqp_publish_timeout_ms))
        })
    }
}
