//! Error types for payview-config

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML: {message}")]
    InvalidYaml { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
