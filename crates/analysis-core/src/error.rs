use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Upstream fetch failed for {ticker}: {reason}")]
    Upstream { ticker: String, reason: String },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Reading unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScanError {
    pub fn upstream(ticker: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ScanError::Upstream {
            ticker: ticker.into(),
            reason: reason.to_string(),
        }
    }
}
