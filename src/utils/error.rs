use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("No payload found: neither {} nor {} exists", .primary.display(), .fallback.display())]
    MissingInput { primary: PathBuf, fallback: PathBuf },

    #[error("Payload {} could not be read: {source}", .path.display())]
    PayloadUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target document {} could not be read: {source}", .path.display())]
    MissingTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Start marker {marker:?} not found in target document")]
    MarkerNotFound { marker: String },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Document,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SpliceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInput { .. } | Self::PayloadUnreadable { .. } => ErrorCategory::Input,
            Self::MissingTarget { .. } | Self::MarkerNotFound { .. } => ErrorCategory::Document,
            Self::WriteFailed { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WriteFailed { .. } => ErrorSeverity::Critical,
            Self::IoError(_) => ErrorSeverity::Critical,
            Self::MarkerNotFound { .. } => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingInput { primary, .. } => format!(
                "No compiled script found (looked for {} and its fallback)",
                primary.display()
            ),
            Self::PayloadUnreadable { path, .. } => {
                format!("Could not read the compiled script at {}", path.display())
            }
            Self::MissingTarget { path, .. } => {
                format!("Could not read the previous build at {}", path.display())
            }
            Self::MarkerNotFound { marker } => format!(
                "The previous build has no line matching the start marker {:?}",
                marker.trim_end_matches(['\r', '\n'])
            ),
            Self::WriteFailed { path, .. } => format!("Could not write {}", path.display()),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => match self {
                Self::PayloadUnreadable { .. } => {
                    "Check the compiled script is readable UTF-8 text, then rebuild it"
                }
                _ => "Run the script compiler first, or pass --source / --fallback-source",
            },
            ErrorCategory::Document => match self {
                Self::MarkerNotFound { .. } => {
                    "Check --start-marker, or pass --allow-missing-start-marker to append instead"
                }
                _ => "Check --target points at an existing build document",
            },
            ErrorCategory::Output => "Check write permissions and free space for the output path",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, SpliceError>;
