//! Error types for dbstruct

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dbstruct operations
pub type Result<T> = std::result::Result<T, DbStructError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum DbStructError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Name collision: tables `{first}` and `{second}` both generate `{name}`")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Task failed: {0}")]
    TaskError(String),
}

impl From<mysql_async::Error> for DbStructError {
    fn from(err: mysql_async::Error) -> Self {
        match err {
            mysql_async::Error::Io(_) | mysql_async::Error::Url(_) | mysql_async::Error::Driver(_) => {
                DbStructError::ConnectionError(err.to_string())
            }
            mysql_async::Error::Server(ref server) if is_connect_failure(server.code) => {
                DbStructError::ConnectionError(err.to_string())
            }
            other => DbStructError::QueryError(other.to_string()),
        }
    }
}

/// Server error codes raised during the handshake rather than by a query
fn is_connect_failure(code: u16) -> bool {
    matches!(
        code,
        1040 // ER_CON_COUNT_ERROR
            | 1044 // ER_DBACCESS_DENIED_ERROR
            | 1045 // ER_ACCESS_DENIED_ERROR
            | 1049 // ER_BAD_DB_ERROR
            | 1129 // ER_HOST_IS_BLOCKED
            | 1130 // ER_HOST_NOT_PRIVILEGED
    )
}

impl From<config::ConfigError> for DbStructError {
    fn from(err: config::ConfigError) -> Self {
        DbStructError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DbStructError {
    fn from(err: tokio::task::JoinError) -> Self {
        DbStructError::TaskError(err.to_string())
    }
}
