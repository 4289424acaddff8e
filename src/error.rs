use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum DappError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid contract ABI: {0}")]
    InvalidAbi(String),

    #[error("No browser extension installed")]
    ExtensionNotInstalled,

    #[error("Browser extension not enabled")]
    NotEnabled,

    #[error("No active account")]
    NoAccount,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Unknown contract method: {0}")]
    UnknownMethod(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Connector error: {0}")]
    Connector(String),
}

impl DappError {
    pub fn rejected<S: Into<String>>(msg: S) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn connector<S: Into<String>>(msg: S) -> Self {
        Self::Connector(msg.into())
    }
}

/// Result type alias using DappError
pub type DappResult<T> = Result<T, DappError>;
