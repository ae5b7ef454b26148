//! Error types for fablegate.

use thiserror::Error;

/// fablegate error types
#[derive(Error, Debug)]
pub enum FablegateError {
    /// The species service answered with a non-success status.
    ///
    /// Display is the raw upstream body so callers can pass it through verbatim.
    #[error("{body}")]
    UpstreamSpecies { status: u16, body: String },

    /// Outbound request could not be completed (bad URL, connect, cancelled).
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File or socket I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FablegateError {
    /// Upstream status code carried by this error, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamSpecies { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for fablegate
pub type Result<T> = std::result::Result<T, FablegateError>;
