//! Error handling for promind-db
//!
//! Store errors carry enough context to tell a missing record apart from a
//! broken connection, since the optimization controller treats them
//! differently.

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection-related errors
    #[error("Database connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution errors
    #[error("Query execution failed: {query}")]
    Query {
        query: String,
        #[source]
        source: turso::Error,
    },

    /// Schema-related errors
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Data validation errors
    #[error("Data validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Record not found for a requested key
    #[error("Record not found: {id} in table {table}")]
    NotFound { id: String, table: String },

    /// Transaction-related errors
    #[error("Transaction error: {message}")]
    Transaction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// General operation errors
    #[error("Operation failed: {message}")]
    Operation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Create a new connection error with source
    pub fn connection_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new query error
    pub fn query<S: Into<String>>(query: S, source: turso::Error) -> Self {
        Self::Query {
            query: query.into(),
            source,
        }
    }

    /// Create a new schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new record not found error
    pub fn not_found<I: Into<String>, T: Into<String>>(id: I, table: T) -> Self {
        Self::NotFound {
            id: id.into(),
            table: table.into(),
        }
    }

    /// Create a new transaction error with source
    pub fn transaction_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Transaction {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new operation error with source
    pub fn operation_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Operation {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether the error means a requested row simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Conversion from turso::Error
impl From<turso::Error> for StoreError {
    fn from(err: turso::Error) -> Self {
        Self::Operation {
            message: "Turso database error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: err,
        }
    }
}
