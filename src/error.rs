//! Error types for the AnyStream adapter.

/// Stream error type with contextual variants.
///
/// Every variant carries the context a caller needs to react correctly:
/// the operation that was refused, or the display name of the resource
/// involved. Uses `#[non_exhaustive]` for forward compatibility.
///
/// The taxonomy keeps capability failures ([`Unsupported`](StreamError::Unsupported))
/// distinguishable from lifecycle failures ([`Closed`](StreamError::Closed)),
/// so outer layers can decide whether a retry after reopening makes sense.
///
/// # Examples
///
/// ```rust
/// use anystream::StreamError;
///
/// let err = StreamError::Unsupported { operation: "truncate" };
/// assert_eq!(err.to_string(), "operation not supported: truncate");
///
/// let err = StreamError::Closed { operation: "read" };
/// assert_eq!(err.to_string(), "read: stream is closed");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Malformed mode string passed to `open`.
    #[error("invalid mode: {mode:?}")]
    InvalidMode {
        /// The mode string as given by the caller.
        mode: String,
    },

    /// Invalid combination of open arguments.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the arguments.
        message: String,
    },

    /// An operation was attempted after the stream was closed.
    #[error("{operation}: stream is closed")]
    Closed {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The stream's capability set does not include the requested operation.
    #[error("operation not supported: {operation}")]
    Unsupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    /// The target resource does not exist.
    #[error("no such file or directory: {name}")]
    NotFound {
        /// Display name of the missing resource.
        name: String,
    },

    /// The target resource already exists (exclusive creation).
    #[error("file exists: {name}")]
    AlreadyExists {
        /// Display name of the existing resource.
        name: String,
    },

    /// The target resource is a directory.
    #[error("is a directory: {name}")]
    IsADirectory {
        /// Display name of the directory.
        name: String,
    },

    /// I/O failure reported by the underlying provider, with context.
    #[error("{operation} failed for {name}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// Display name of the resource involved.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for StreamError {
    fn from(error: std::io::Error) -> Self {
        // Convert common io::ErrorKind values to more specific variants
        // when possible; context is filled in by the caller where known.
        match error.kind() {
            std::io::ErrorKind::NotFound => StreamError::NotFound {
                name: String::new(),
            },
            std::io::ErrorKind::AlreadyExists => StreamError::AlreadyExists {
                name: String::new(),
            },
            std::io::ErrorKind::IsADirectory => StreamError::IsADirectory {
                name: String::new(),
            },
            std::io::ErrorKind::Unsupported => StreamError::Unsupported { operation: "io" },
            _ => StreamError::Io {
                operation: "io",
                name: String::new(),
                source: error,
            },
        }
    }
}

impl From<StreamError> for std::io::Error {
    fn from(error: StreamError) -> Self {
        let kind = match &error {
            StreamError::InvalidMode { .. } | StreamError::InvalidArgument { .. } => {
                std::io::ErrorKind::InvalidInput
            }
            StreamError::Closed { .. } => std::io::ErrorKind::Other,
            StreamError::Unsupported { .. } => std::io::ErrorKind::Unsupported,
            StreamError::NotFound { .. } => std::io::ErrorKind::NotFound,
            StreamError::AlreadyExists { .. } => std::io::ErrorKind::AlreadyExists,
            StreamError::IsADirectory { .. } => std::io::ErrorKind::IsADirectory,
            StreamError::Io { source, .. } => source.kind(),
        };
        std::io::Error::new(kind, error)
    }
}
