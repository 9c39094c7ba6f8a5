//! Configuration management for the Revlens CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (revlens.yaml)
//!
//! Precedence, lowest to highest: built-in defaults, YAML config file,
//! environment variables, CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default number of candidates fetched from the document index per query.
///
/// Retrieval deliberately over-fetches so the ranker has a wide pool to
/// re-score, regardless of how many results the caller asked for.
pub const DEFAULT_RETRIEVAL_POOL_SIZE: usize = 50;

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the review store and other local state
    pub data_dir: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation-service provider (e.g., "ollama")
    pub provider: String,

    /// Chat model identifier
    pub model: String,

    /// Embedding provider ("ollama", or "hash" for offline word-hash vectors)
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Generation-service endpoint URL
    pub endpoint: String,

    /// Candidate pool size for evidence retrieval
    pub retrieval_pool_size: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    store: Option<StoreSection>,
    retrieval: Option<RetrievalSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    #[serde(rename = "embeddingProvider")]
    embedding_provider: Option<String>,
    #[serde(rename = "embeddingModel")]
    embedding_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    #[serde(rename = "poolSize")]
    pool_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".revlens"),
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            embedding_provider: "ollama".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            retrieval_pool_size: DEFAULT_RETRIEVAL_POOL_SIZE,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `REVLENS_DATA_DIR`: Override data directory
    /// - `REVLENS_CONFIG`: Path to config file
    /// - `REVLENS_PROVIDER`: Generation-service provider
    /// - `REVLENS_MODEL`: Chat model identifier
    /// - `REVLENS_EMBEDDING_PROVIDER`: Embedding provider
    /// - `REVLENS_ENDPOINT`: Generation-service endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(data_dir) = std::env::var("REVLENS_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(config_file) = std::env::var("REVLENS_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from("revlens.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("REVLENS_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("REVLENS_MODEL") {
            config.model = model;
        }

        if let Ok(embedding_provider) = std::env::var("REVLENS_EMBEDDING_PROVIDER") {
            config.embedding_provider = embedding_provider;
        }

        if let Ok(endpoint) = std::env::var("REVLENS_ENDPOINT") {
            config.endpoint = endpoint;
        }

        // Only override the YAML-configured level when RUST_LOG is set
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(store) = config_file.store {
            if let Some(path) = store.path {
                result.data_dir = PathBuf::from(path);
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(pool_size) = retrieval.pool_size {
                result.retrieval_pool_size = pool_size;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(embedding_provider) = llm.embedding_provider {
                result.embedding_provider = embedding_provider;
            }
            if let Some(embedding_model) = llm.embedding_model {
                result.embedding_model = embedding_model;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Path to the SQLite review store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("reviews.db")
    }

    /// Ensure the data directory exists.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).map_err(|e| {
                AppError::Config(format!("Failed to create data directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        let known_embedding_providers = ["ollama", "hash"];

        if !known_embedding_providers.contains(&self.embedding_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding_provider,
                known_embedding_providers.join(", ")
            )));
        }

        if self.retrieval_pool_size == 0 {
            return Err(AppError::Config(
                "retrieval_pool_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
