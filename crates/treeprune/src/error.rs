use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Pattern #{index} has an invalid platform value '{value}'. Valid options are 'macos', 'linux', or 'windows'"
    )]
    InvalidPlatform { index: usize, value: String },

    #[error(
        "postPrune command #{index} has an invalid platform value '{value}'. Valid options are 'macos', 'linux', or 'windows'"
    )]
    InvalidCommandPlatform { index: usize, value: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Cannot enumerate '{path}': {message}")]
    Enumeration { path: PathBuf, message: String },

    #[error("Failed to quarantine '{path}': {source}")]
    Quarantine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{path}' during cleanup: {source}")]
    Compaction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error occurred while running '{command}': {message}")]
    Command { command: String, message: String },

    #[error("Destination already exists: {0}")]
    Conflict(PathBuf),

    #[error("Destination verification failed for {path}")]
    DestinationVerification { path: PathBuf },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, PruneError>;
