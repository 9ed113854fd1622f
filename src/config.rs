use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Width the clustering model was trained with.
pub const DEFAULT_FEATURE_WIDTH: usize = 383;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the four model artifacts
    pub dir: PathBuf,
    pub linear_regression: String,
    pub random_forest: String,
    pub kmeans: String,
    pub knn: String,
}

impl ModelsConfig {
    pub fn linear_regression_path(&self) -> PathBuf {
        self.dir.join(&self.linear_regression)
    }

    pub fn random_forest_path(&self) -> PathBuf {
        self.dir.join(&self.random_forest)
    }

    pub fn kmeans_path(&self) -> PathBuf {
        self.dir.join(&self.kmeans)
    }

    pub fn knn_path(&self) -> PathBuf {
        self.dir.join(&self.knn)
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            linear_regression: "linear_regression_model.json".to_string(),
            random_forest: "random_forest_model.json".to_string(),
            kmeans: "kmeans_model.json".to_string(),
            knn: "knn_model.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusteringConfig {
    /// Columns in the clustering feature vector after zero padding
    #[serde(default = "default_feature_width")]
    pub feature_width: usize,
}

fn default_feature_width() -> usize {
    DEFAULT_FEATURE_WIDTH
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            feature_width: DEFAULT_FEATURE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let models = ModelsConfig::default();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("models.dir", models.dir.to_string_lossy().to_string())?
            .set_default("models.linear_regression", models.linear_regression)?
            .set_default("models.random_forest", models.random_forest)?
            .set_default("models.kmeans", models.kmeans)?
            .set_default("models.knn", models.knn)?
            .set_default("clustering.feature_width", DEFAULT_FEATURE_WIDTH as u64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("HOUSING_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (HOUSING__SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("HOUSING")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        if self.clustering.feature_width == 0 {
            errors.push("clustering.feature_width must be positive".to_string());
        }

        for (key, name) in [
            ("models.linear_regression", &self.models.linear_regression),
            ("models.random_forest", &self.models.random_forest),
            ("models.kmeans", &self.models.kmeans),
            ("models.knn", &self.models.knn),
        ] {
            if name.trim().is_empty() {
                errors.push(format!("{key} must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            models: ModelsConfig::default(),
            clustering: ClusteringConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
            },
        }
    }
}
