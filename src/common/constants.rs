/// Defaults shared by the config layer and the CLI

// Paths
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_STORAGE_DIR: &str = "storage/datasets/default";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_OUTPUT_FILE: &str = "scraped.json";
pub const DEFAULT_SEEDS_PATH: &str = "inputs/companies.csv";

// Seed list column holding the company page URL
pub const DEFAULT_URL_COLUMN: &str = "YC URL";

// Attribute carrying the page's serialized application state
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-page";

pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

// Crawl
pub const DEFAULT_USER_AGENT: &str = "yc_scraper/0.1 (+https://www.ycombinator.com/companies)";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Logging
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "yc_scraper.log";
pub const DEFAULT_LOG_FILTER: &str = "yc_scraper=info,info";

// Environment overrides
pub const ENV_STORAGE_DIR: &str = "YC_STORAGE_DIR";
pub const ENV_OUTPUT_PATH: &str = "YC_OUTPUT_PATH";
pub const ENV_SEEDS_PATH: &str = "YC_SEEDS_PATH";
pub const ENV_MAX_CONCURRENCY: &str = "YC_MAX_CONCURRENCY";
