//! oddb Core - configuration, logging and shared errors
//!
//! This crate holds what every oddb component needs regardless of which
//! lookup it performs: the hot-reloadable configuration handle, tracing
//! setup, and the top-level error type used by binaries.

pub mod config;
pub mod tracing_setup;

pub use config::{CastFailurePolicy, ConfigError, OddbConfig, SharedConfig};

/// Core errors that can bubble up to an oddb binary.
#[derive(Debug, thiserror::Error)]
pub enum OddbError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {reason}")]
    Logging { reason: String },
}

impl OddbError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            OddbError::Config(e) => format!("Invalid configuration: {e}"),
            OddbError::Io(_) => "File system error occurred".to_string(),
            OddbError::Logging { reason } => format!("Could not set up logging: {reason}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, OddbError>;
