//! Shared primitives for all Rust crates in Gridwire.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type used across Gridwire crates.
pub type TableResult<T> = Result<T, TableError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> TableResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TableError::Config(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// A validated action identifier: a leading letter or underscore followed by
/// letters, digits, or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Creates a validated identifier.
    pub fn new(value: impl Into<String>) -> TableResult<Self> {
        let value = value.into();
        let mut chars = value.chars();

        let valid_head = chars
            .next()
            .is_some_and(|head| head.is_ascii_alphabetic() || head == '_');
        let valid_tail = chars.all(|tail| tail.is_ascii_alphanumeric() || tail == '_');

        if !valid_head || !valid_tail {
            return Err(TableError::Config(format!(
                "invalid identifier '{value}': expected a letter or underscore \
                 followed by letters, digits, or underscores"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Identifier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

/// Identifier of one persisted table record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(Uuid);

impl TableId {
    /// Creates a random table identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a table identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TableId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common error categories for configuration interpretation and data loading.
#[derive(Debug, Error)]
pub enum TableError {
    /// Required configuration missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the remote API.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Remote API answered with a non-2xx status.
    #[error("http status {status}: {body}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body text, when available.
        body: String,
    },

    /// Response shape did not match the configured mapping.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A configured click action failed while executing.
    #[error("action execution error: {0}")]
    ActionExecution(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TableError {
    /// Returns the HTTP status code for status errors.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
