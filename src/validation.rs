//! Validation result types.
//!
//! Every validator produces one [`ValidationResult`]. Only `error`
//! messages affect status: a result with any error is
//! [`ValidationType::Partial`], otherwise it is
//! [`ValidationType::Installed`]. [`ValidationType::Missing`] is reserved
//! for the case where installations could not be enumerated at all.

use serde::Serialize;

/// Overall status of one validated installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationType {
    /// Installation found and every check passed.
    Installed,
    /// Installation found but at least one check failed.
    Partial,
    /// Installations could not be enumerated.
    Missing,
}

impl ValidationType {
    /// Whether the status needs the user's attention.
    pub fn is_problem(&self) -> bool {
        !matches!(self, ValidationType::Installed)
    }
}

/// Severity of a single validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Hint,
    Error,
}

/// One line of validation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub text: String,
}

impl ValidationMessage {
    /// An informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    /// A hint pointing the user at further help.
    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Hint,
            text: text.into(),
        }
    }

    /// A failed check.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    /// Whether this message is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Returns true if any message is an error.
pub fn has_errors(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(ValidationMessage::is_error)
}

/// The outcome of validating one installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationType,
    pub messages: Vec<ValidationMessage>,
    pub status_info: Option<String>,
}

impl ValidationResult {
    /// Build a result for a discovered installation, deriving status from
    /// the messages.
    pub fn from_messages(messages: Vec<ValidationMessage>, status_info: impl Into<String>) -> Self {
        let status = if has_errors(&messages) {
            ValidationType::Partial
        } else {
            ValidationType::Installed
        };
        Self {
            status,
            messages,
            status_info: Some(status_info.into()),
        }
    }

    /// Build the result for a failed enumeration.
    pub fn missing(messages: Vec<ValidationMessage>) -> Self {
        Self {
            status: ValidationType::Missing,
            messages,
            status_info: None,
        }
    }

    /// Error messages only, in order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.is_error())
    }
}
