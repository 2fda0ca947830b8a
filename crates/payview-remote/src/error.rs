//! Error types for payview-remote

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Unknown endpoint: {endpoint}")]
    UnknownEndpoint { endpoint: String },

    #[error("Invalid parameters for {endpoint}: {message}")]
    InvalidParams { endpoint: String, message: String },

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}
