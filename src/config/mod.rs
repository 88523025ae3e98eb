//! Configuration loading and management

use crate::core::store::NewPost;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// HTTP exposure settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (e.g., "127.0.0.1:4000")
    pub bind: String,

    /// Path of the GraphQL endpoint; the SDL is served at `{path}/schema`
    pub graphql_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            graphql_path: "/graphql".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reject a `graphql_path` the router cannot mount
    ///
    /// The path must start with `/` and contain no route parameters or
    /// wildcards, since the endpoint is mounted literally.
    pub fn validate(&self) -> Result<()> {
        let path = &self.graphql_path;
        if !path.starts_with('/') {
            return Err(anyhow!(
                "server.graphql_path must start with '/', got '{}'",
                path
            ));
        }
        if path.contains(['{', '}', '*', ':']) {
            return Err(anyhow!(
                "server.graphql_path must be a literal path, got '{}'",
                path
            ));
        }
        Ok(())
    }
}

/// Where compiled artifacts are handed off, if anywhere
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub sdl_path: Option<String>,
    pub type_model_path: Option<String>,
}

/// In-memory store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Records loaded at startup, ids assigned in order
    pub seed: Vec<NewPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` takes precedence over the configured filter. Fails if a
    /// subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub schema: SchemaConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
        assert_eq!(config.server.graphql_path, "/graphql");
        assert_eq!(config.logging.filter, "info");
        assert!(config.schema.sdl_path.is_none());
        assert!(config.store.seed.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  bind: "0.0.0.0:8080"
schema:
  sdl_path: "generated/schema.graphql"
store:
  seed:
    - title: Nexus
      body: "..."
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.graphql_path, "/graphql");
        assert_eq!(
            config.schema.sdl_path.as_deref(),
            Some("generated/schema.graphql")
        );
        assert_eq!(config.store.seed, vec![NewPost::draft("Nexus", "...")]);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_logging_init_only_once() {
        let logging = LoggingConfig {
            filter: "schemata=debug".to_string(),
        };
        let _ = logging.init();
        assert!(logging.init().is_err());
    }

    #[test]
    fn test_graphql_path_validation() {
        assert!(ServerConfig::default().validate().is_ok());

        for path in ["/", "/api/graphql", "/graphql/"] {
            let config = ServerConfig {
                graphql_path: path.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{path} should be accepted");
        }

        for path in ["", "graphql", "/graphql/{id}", "/graphql/*rest", "/:id"] {
            let config = ServerConfig {
                graphql_path: path.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{path} should be rejected");
        }
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
