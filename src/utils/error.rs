use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown course code: {code}")]
    UnknownCourse { code: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RegistrationError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short message suitable for stderr in the CLI.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason } => {
                format!("The registration data is malformed ({}): {}", field, reason)
            }
            Self::UnknownCourse { code } => {
                format!("Course '{}' is not in the catalog", code)
            }
            Self::ConfigValidationError { field, message } => {
                format!("The configuration is invalid ({}): {}", field, message)
            }
            Self::IoError(e) => format!("Could not read input: {}", e),
            Self::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Check credit weights, time slots and duplicate course codes"
            }
            Self::UnknownCourse { .. } => "Add the course to the [[catalog]] table or fix the code",
            Self::ConfigValidationError { .. } => "Fix the scenario file or command-line flags",
            Self::IoError(_) => "Make sure the scenario file exists and is readable",
            Self::SerializationError(_) => "Retry without --json",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
