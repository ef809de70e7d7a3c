//! Server error types with context and recovery suggestions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Error type for server startup and operation.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game files required to serve the site are missing.
    #[error("Missing required game files: {}", display_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServerError {
    /// Creates an invalid configuration error from an anyhow error.
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{err:#}"))
    }

    /// Creates a bind error with address context.
    pub fn bind_error(address: &str, source: io::Error) -> Self {
        Self::BindError {
            address: address.to_owned(),
            source,
        }
    }

    /// Returns a unique error code for this error type.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::BindError { .. } => "E002",
            Self::Runtime(_) => "E003",
            Self::MissingFiles(_) => "E004",
        }
    }

    /// Determines if this error is potentially recoverable.
    ///
    /// Recoverable errors might succeed if retried or if the environment
    /// changes (e.g., different port, wait for resource).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig(_) | Self::MissingFiles(_) => false,
            Self::BindError { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::AddrInUse
                    | io::ErrorKind::AddrNotAvailable
            ),
            Self::Runtime(err) => matches!(
                err.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::ConnectionRefused
            ),
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => {
                Some("Check the command-line flags and environment variables")
            }
            Self::MissingFiles(_) => Some(
                "Run the server from the game directory or point --site-root at it",
            ),
            Self::BindError { source, .. } => Some(bind_suggestion(source)),
            Self::Runtime(err) => match err.kind() {
                io::ErrorKind::PermissionDenied => Some("Check file and network permissions"),
                io::ErrorKind::Interrupted => Some("The operation was interrupted, you may retry"),
                io::ErrorKind::TimedOut => {
                    Some("The operation timed out, consider increasing timeout values")
                }
                _ => None,
            },
        }
    }

    /// Determines if this is a network-related error.
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::BindError { .. })
            || matches!(self, Self::Runtime(err) if matches!(err.kind(),
                io::ErrorKind::ConnectionRefused |
                io::ErrorKind::ConnectionAborted |
                io::ErrorKind::ConnectionReset |
                io::ErrorKind::AddrInUse |
                io::ErrorKind::AddrNotAvailable
            ))
    }

    /// Returns contextual information about this error as key-value pairs.
    pub fn context(&self) -> Vec<(&'static str, String)> {
        let mut context = vec![("error_code", self.error_code().to_owned())];

        if let Some(suggestion) = self.suggestion() {
            context.push(("suggestion", suggestion.to_owned()));
        }

        context.push(("recoverable", self.is_recoverable().to_string()));
        context.push(("network_error", self.is_network_error().to_string()));

        match self {
            Self::BindError { address, source } => {
                context.push(("address", address.clone()));
                context.push(("io_error_kind", format!("{:?}", source.kind())));
            }
            Self::Runtime(err) => {
                context.push(("io_error_kind", format!("{:?}", err.kind())));
            }
            Self::InvalidConfig(msg) => {
                context.push(("config_error", msg.clone()));
            }
            Self::MissingFiles(paths) => {
                context.push(("missing_files", display_paths(paths)));
            }
        }

        context
    }
}

/// Provides a human-readable suggestion for resolving a bind failure.
pub(crate) fn bind_suggestion(err: &io::Error) -> &'static str {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            "Try using a port above 1024 or run with appropriate privileges"
        }
        io::ErrorKind::AddrInUse => {
            "The port is already in use. Try the next port with --port or stop the conflicting service"
        }
        io::ErrorKind::AddrNotAvailable => {
            "The address is not available. Check network interface configuration"
        }
        _ => "Check network configuration and firewall settings",
    }
}
