use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::dataset::LoadOptions;
use crate::query::{QueryLimits, MAX_K};

const DEFAULT_DATE_COLUMN: &str = "일시";
const DEFAULT_MAX_TEMP_COLUMN: &str = "최고기온(°C)";
const DEFAULT_THRESHOLD_C: f64 = 33.0;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetSection,
    pub query: QuerySection,
    pub cors: CorsSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("HEATWAVE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HEATWAVE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("dataset.sources")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        self.dataset.to_load_options()?;
        self.query.to_limits()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    pub sources: Vec<PathBuf>,
    pub date_column: String,
    pub max_temp_column: String,
    pub delimiter: String,
}

impl DatasetSection {
    pub fn to_load_options(&self) -> Result<LoadOptions> {
        if self.sources.is_empty() {
            bail!("dataset.sources must list at least one CSV file");
        }
        if self.date_column.trim().is_empty() {
            bail!("dataset.date_column must be specified");
        }
        if self.max_temp_column.trim().is_empty() {
            bail!("dataset.max_temp_column must be specified");
        }

        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => bail!(
                "dataset.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        };

        Ok(LoadOptions {
            sources: self.sources.clone(),
            date_column: self.date_column.trim().to_string(),
            max_temp_column: self.max_temp_column.trim().to_string(),
            delimiter,
        })
    }
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            sources: (2021..=2025)
                .map(|year| PathBuf::from(format!("data/heatwave_{}_07.csv", year)))
                .collect(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            max_temp_column: DEFAULT_MAX_TEMP_COLUMN.to_string(),
            delimiter: ",".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    pub default_threshold: f64,
    pub default_k: usize,
    pub max_k: usize,
}

impl QuerySection {
    pub fn to_limits(&self) -> Result<QueryLimits> {
        if !self.default_threshold.is_finite() {
            bail!("query.default_threshold must be a finite number");
        }
        if self.max_k == 0 || self.max_k > MAX_K {
            bail!(
                "query.max_k must be between 1 and {} (got {})",
                MAX_K,
                self.max_k
            );
        }
        if self.default_k == 0 || self.default_k > self.max_k {
            bail!(
                "query.default_k must be between 1 and {} (got {})",
                self.max_k,
                self.default_k
            );
        }

        Ok(QueryLimits {
            default_threshold: self.default_threshold,
            default_k: self.default_k,
            max_k: self.max_k,
        })
    }
}

impl Default for QuerySection {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD_C,
            default_k: 5,
            max_k: MAX_K,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    pub enabled: bool,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
