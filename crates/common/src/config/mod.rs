//! Configuration management for the actuaria workspace
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Classifier trigger lexicon
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Knowledge graph store behavior
    #[serde(default)]
    pub graph: GraphConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Trigger-word sets driving query classification.
///
/// The sets are ordinary configuration so they can be extended without
/// touching dispatch logic; `version` identifies the lexicon revision in
/// logs and dumps.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Lexicon revision
    #[serde(default = "default_lexicon_version")]
    pub version: u32,

    /// Phrases marking a query as computational
    #[serde(default = "default_computational_triggers")]
    pub computational_triggers: Vec<String>,

    /// Phrases asking for explanation alongside computation
    #[serde(default = "default_explanatory_triggers")]
    pub explanatory_triggers: Vec<String>,

    /// Phrases marking a query as conceptual
    #[serde(default = "default_conceptual_triggers")]
    pub conceptual_triggers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Maximum nodes returned per concept query
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Include direct neighbors of matched nodes
    #[serde(default = "default_expand_neighbors")]
    pub expand_neighbors: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_lexicon_version() -> u32 { 1 }
fn default_computational_triggers() -> Vec<String> {
    vec!["calculate".into(), "solve".into(), "value of".into()]
}
fn default_explanatory_triggers() -> Vec<String> {
    vec!["explain".into(), "why".into()]
}
fn default_conceptual_triggers() -> Vec<String> {
    vec!["what is".into(), "model".into(), "concept".into()]
}
fn default_max_nodes() -> usize { 32 }
fn default_expand_neighbors() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "actuaria".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__GRAPH__MAX_NODES=64
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            graph: GraphConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            version: default_lexicon_version(),
            computational_triggers: default_computational_triggers(),
            explanatory_triggers: default_explanatory_triggers(),
            conceptual_triggers: default_conceptual_triggers(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            expand_neighbors: default_expand_neighbors(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.classifier.version, 1);
        assert_eq!(config.graph.max_nodes, 32);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_default_trigger_sets() {
        let config = ClassifierConfig::default();
        assert!(config.computational_triggers.contains(&"calculate".to_string()));
        assert!(config.computational_triggers.contains(&"value of".to_string()));
        assert!(config.explanatory_triggers.contains(&"why".to_string()));
        assert!(config.conceptual_triggers.contains(&"what is".to_string()));
    }
}
