//! Error types for Hyprland socket operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the Hyprland compositor
#[derive(Debug, Error)]
pub enum HyprError {
    /// No instance signature was configured or found in the environment
    #[error("HYPRLAND_INSTANCE_SIGNATURE not set - is Hyprland running?")]
    SignatureNotSet,

    /// Failed to connect to one of the compositor sockets
    #[error("Failed to connect to Hyprland socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the request
    #[error("Failed to send request to Hyprland: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Failed to read from the socket
    #[error("Failed to receive response from Hyprland: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The compositor closed the connection without replying
    #[error("Connection to Hyprland closed unexpectedly")]
    ConnectionClosed,

    /// The compositor answered something other than `ok`
    ///
    /// The response text is Hyprland's own human-readable diagnostic.
    #[error("Hyprland rejected command: {response}")]
    CommandRejected { response: String },

    /// A JSON reply could not be decoded into the requested type
    #[error("Failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),
}

impl HyprError {
    /// Whether this error means the compositor could not be reached or
    /// talked to, as opposed to a well-formed reply we did not like.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            HyprError::SignatureNotSet
                | HyprError::ConnectionFailed { .. }
                | HyprError::SendFailed(_)
                | HyprError::ReceiveFailed(_)
                | HyprError::ConnectionClosed
        )
    }

    /// The rejection text, if the compositor refused the command
    pub fn rejection(&self) -> Option<&str> {
        match self {
            HyprError::CommandRejected { response } => Some(response),
            _ => None,
        }
    }
}
