use thiserror::Error;

/// Errors surfaced by filesystem and locator operations
///
/// Every failure carries the offending path or name; no operation recovers
/// internally or partially mutates state before reporting.
#[derive(Error, Debug)]
pub enum Error {
    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("target is not writable: {0}")]
    NotWritable(String),

    #[error("no such resource: {0}")]
    NotFound(String),

    #[error("entry exists with a different kind: {0}")]
    WrongKind(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("scheme `{0}` already registered")]
    DuplicateScheme(String),

    #[error("unknown placeholder: {0}")]
    UnknownPlaceholder(String),

    #[error("operation failed on {path}")]
    OperationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Wrap an I/O failure that slipped past the precondition checks
    pub(crate) fn operation_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::OperationFailed {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
