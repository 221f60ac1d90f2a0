//! Structured error types shared across the halo mass function crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HmfError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, line numbers, values).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for mass function queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HmfError {
    /// A caller supplied value is outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// A required input table does not exist or holds no entries.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// An input table row could not be interpreted.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Serialization of reports or plans failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HmfError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HmfError::InvalidArgument(info)
            | HmfError::NotFound(info)
            | HmfError::Io(info)
            | HmfError::Parse(info)
            | HmfError::Serde(info) => info,
        }
    }

    /// Returns true when the error was caused by a caller supplied value.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, HmfError::InvalidArgument(_))
    }

    /// Returns true when a required input was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HmfError::NotFound(_))
    }
}
