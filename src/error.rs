use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error types for the fallible host surface.
///
/// Parsing and layout never fail; they degrade to an empty forest or a
/// "not ready" layout instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading tree text or config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A configuration or CLI value that does not name a known option.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// File watcher could not be started.
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}
