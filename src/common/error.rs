use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },
}

impl ScraperError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ScraperError::Http(_) | ScraperError::Status { .. } => "http",
            ScraperError::Json(_) => "json",
            ScraperError::Toml(_) | ScraperError::Config(_) => "config",
            ScraperError::Csv(_) => "csv",
            ScraperError::Io(_) | ScraperError::Storage { .. } => "io",
            ScraperError::MissingField(_) | ScraperError::InvalidNumber { .. } => "mapping",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
