use thiserror::Error;

/// Main error type for the Photo-Booth library
#[derive(Error, Debug)]
pub enum BoothError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Capture sequencing error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Image encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Filter-selection errors
///
/// The filter set is closed, so these can only arise at the boundary where a
/// name or index coming from the outside is turned into a
/// [`FilterKind`](crate::filter::FilterKind).
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown filter kind: {name}")]
    UnknownKind { name: String },

    #[error("Filter index out of range: {index}")]
    UnknownIndex { index: i32 },
}

/// Capture-sequencer errors
///
/// These are rejected commands, not fatal failures: the sequencer state is
/// unchanged and the caller may retry after the current session ends.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("A capture session is already in progress")]
    AlreadyInProgress,

    #[error("No capture is pending acknowledgement")]
    NotCapturing,

    #[error("Invalid capture parameters: {details}")]
    InvalidParameters { details: String },
}

/// Encoding errors
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Cannot encode an empty {width}x{height} buffer")]
    EmptyBuffer { width: u32, height: u32 },

    #[error("PNG encoding failed: {reason}")]
    EncodingFailed { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using BoothError
pub type Result<T> = std::result::Result<T, BoothError>;

impl BoothError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // A running session eventually ends or can be reset away
            Self::Capture(CaptureError::AlreadyInProgress) => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Filter(FilterError::UnknownKind { name }) => {
                format!(
                    "Filter '{}' not found. Available filters: none, grayscale, sepia, negative",
                    name
                )
            }
            Self::Capture(CaptureError::AlreadyInProgress) => {
                "A countdown is already running. Wait for it to finish or reset the booth."
                    .to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
