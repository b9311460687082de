//! Error types for sqlchain

use thiserror::Error;

/// Result type alias for sqlchain operations
pub type ChainResult<T> = Result<T, ChainError>;

/// Error types for fragment editing and compilation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A unit is missing required state and cannot produce a fragment
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Field is not part of the configured field table
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Operator symbol does not belong to the selected category
    #[error("Unknown operator '{symbol}' for category {category}")]
    UnknownSymbol { category: String, symbol: String },

    /// Operator category was excluded by the builder configuration
    #[error("Operator category not allowed: {0}")]
    CategoryNotAllowed(String),

    /// Function name is not one of the supported SQL functions
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Invalid builder configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ChainError {
    /// Create an invalid syntax error
    pub fn invalid_syntax(message: impl Into<String>) -> Self {
        Self::InvalidSyntax(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an invalid syntax error
    pub fn is_invalid_syntax(&self) -> bool {
        matches!(self, Self::InvalidSyntax(_))
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
