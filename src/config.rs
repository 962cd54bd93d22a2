//! Client configuration.
//!
//! `ClientConfig` is loaded from `config/config.toml` (optional) with
//! `DOCKHAND__`-prefixed environment variables layered on top, e.g.
//! `DOCKHAND__CLIENT__SCOPE=production`. Every field carries a default so a
//! bare environment still yields a usable development configuration.

use crate::connector::{Connector, DevNullConnector};
use crate::context::CallContext;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
    /// Connector selector; `devnull` is the only built-in backend.
    #[serde(default = "default_connector")]
    pub connector: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            scope: default_scope(),
            name_prefix: default_name_prefix(),
            connector: default_connector(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_scope() -> String {
    "development".to_string()
}

fn default_name_prefix() -> String {
    "dockhand".to_string()
}

fn default_connector() -> String {
    "devnull".to_string()
}

fn default_timeout_seconds() -> u64 {
    30 // Default timeout of 30 seconds
}

impl ClientConfig {
    /// Load the client configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        // Build configuration by reading the TOML file (optional) and environment variables
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("DOCKHAND").separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // If the file existed but was unreadable, log a warning and retry with env only
                if std::path::Path::new("config/config.toml").exists() {
                    log::warn!(
                        "failed to load config file, falling back to env. Error: {}",
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix("DOCKHAND").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        let client_config: ClientConfig = settings.get::<ClientConfig>("client").map_err(|e| {
            ConfigError::Message(format!(
                "Client configuration could not be loaded from file or environment: {}",
                e
            ))
        })?;

        Ok(client_config)
    }

    /// Instantiate the configured connector.
    ///
    /// # Errors
    ///
    /// Unknown connector names produce a `ConfigError` naming the selector.
    pub fn build_connector(&self) -> Result<Box<dyn Connector>, ConfigError> {
        match self.connector.as_str() {
            "devnull" => Ok(Box::new(DevNullConnector::new())),
            other => Err(ConfigError::Message(format!(
                "unknown connector: {}",
                other
            ))),
        }
    }

    /// A call context carrying the configured timeout.
    pub fn call_context(&self) -> CallContext {
        CallContext::with_timeout(Duration::from_secs(self.timeout_seconds))
    }
}
