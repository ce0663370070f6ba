//! Error types for the engine

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("rule file {path} does not exist")]
    RuleFileMissing { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule file {path} (line {line}): {reason}")]
    MalformedRuleFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("game state has {got} cells, expected {expected}")]
    InvalidStateLength { expected: usize, got: usize },

    #[error("cell {cell} holds {value}, expected 0 or 1")]
    InvalidCellValue { cell: usize, value: u8 },

    #[error("field {field} is occupied by both players")]
    FieldDoublyOccupied { field: usize },

    #[error("field {field} is outside a {size}x{size} board")]
    InvalidField { field: usize, size: usize },

    #[error("player slot {0} is invalid (expected 0 or 1)")]
    InvalidPlayerSlot(u8),

    #[error("field {field} is already occupied")]
    FieldOccupied { field: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("move worker stopped without a result")]
    WorkerDisconnected,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
