use crate::common::constants::*;
use crate::common::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub extraction: ExtractionConfig,
    pub crawl: CrawlConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub storage_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub seeds_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            seeds_path: PathBuf::from(DEFAULT_SEEDS_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub marker_attribute: String,
    pub max_concurrency: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub url_column: String,
    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment
    pub use_env_proxy: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            url_column: DEFAULT_URL_COLUMN.to_string(),
            use_env_proxy: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    /// A missing file yields the defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            self.paths.storage_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(ENV_OUTPUT_PATH) {
            self.set_output_path(Path::new(&path))?;
        }
        if let Some(path) = lookup(ENV_SEEDS_PATH) {
            self.paths.seeds_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_MAX_CONCURRENCY) {
            self.extraction.max_concurrency = raw.trim().parse().map_err(|_| {
                ScraperError::Config(format!("{ENV_MAX_CONCURRENCY} must be a positive integer, got '{raw}'"))
            })?;
        }
        self.validate()
    }

    /// Full path of the JSON output file
    pub fn output_path(&self) -> PathBuf {
        self.paths.output_dir.join(&self.paths.output_file)
    }

    /// Split a file path into the output directory and file name.
    pub fn set_output_path(&mut self, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScraperError::Config(format!("Output path '{}' has no file name", path.display())))?;
        self.paths.output_file = file_name.to_string();
        self.paths.output_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.extraction.max_concurrency == 0 {
            return Err(ScraperError::Config("extraction.max_concurrency must be at least 1".into()));
        }
        if self.extraction.marker_attribute.trim().is_empty() {
            return Err(ScraperError::Config("extraction.marker_attribute must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::from_file(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(config.extraction.marker_attribute, "data-page");
        assert_eq!(config.crawl.url_column, "YC URL");
        assert_eq!(config.output_path(), PathBuf::from("out").join("scraped.json"));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [extraction]
            max_concurrency = 4

            [paths]
            storage_dir = "snapshots"
            "#,
        )
        .unwrap();
        assert_eq!(config.extraction.max_concurrency, 4);
        assert_eq!(config.extraction.marker_attribute, "data-page");
        assert_eq!(config.paths.storage_dir, PathBuf::from("snapshots"));
        assert_eq!(config.paths.output_file, "scraped.json");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = Config::from_toml_str("[extraction]\nmax_concurrency = 0\n").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_STORAGE_DIR, "/tmp/pages"),
            (ENV_OUTPUT_PATH, "results/companies.json"),
            (ENV_MAX_CONCURRENCY, "3"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.paths.storage_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.paths.output_dir, PathBuf::from("results"));
        assert_eq!(config.paths.output_file, "companies.json");
        assert_eq!(config.extraction.max_concurrency, 3);
    }

    #[test]
    fn test_bad_concurrency_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == ENV_MAX_CONCURRENCY).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }
}
