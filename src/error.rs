use std::fmt;

use crate::career::career_model::QuestionKind;

#[derive(Debug)]
pub enum WizardError {
    /// Key-value backend refused a write (quota, serialization, ...)
    StorageWrite { key: String, reason: String },

    /// Filesystem operation failed in a file-backed store
    Io { path: String, source: std::io::Error },

    /// JSON parsing failed
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Transport-level failure talking to the career API
    Http { endpoint: String, source: reqwest::Error },

    /// Career API answered with something other than 200
    SubmissionRejected { endpoint: String, status: u16 },

    /// List edit addressed an entry that does not exist
    IndexOutOfRange { what: &'static str, index: usize, len: usize },

    /// Option edit does not apply to the question's current type
    WrongQuestionKind { expected: QuestionKind, found: QuestionKind },

    /// Operation attempted while a submission is in flight
    Busy,

    /// The career was already submitted by this wizard
    AlreadySubmitted,
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::StorageWrite { key, reason } => {
                write!(f, "Failed to write '{}' to draft storage: {}", key, reason)
            }
            WizardError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path, source)
            }
            WizardError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            WizardError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            WizardError::Http { endpoint, source } => {
                write!(f, "Request to {} failed: {}", endpoint, source)
            }
            WizardError::SubmissionRejected { endpoint, status } => {
                write!(f, "{} answered with status {}", endpoint, status)
            }
            WizardError::IndexOutOfRange { what, index, len } => {
                write!(f, "No {} at index {} (len {})", what, index, len)
            }
            WizardError::WrongQuestionKind { expected, found } => {
                write!(
                    f,
                    "Operation needs a {} question, found {}",
                    expected.as_str(),
                    found.as_str()
                )
            }
            WizardError::Busy => write!(f, "A submission is already in progress"),
            WizardError::AlreadySubmitted => write!(f, "Career was already submitted"),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WizardError::Io { source, .. } => Some(source),
            WizardError::JsonParse { source, .. } => Some(source),
            WizardError::JsonSerialize { source, .. } => Some(source),
            WizardError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
