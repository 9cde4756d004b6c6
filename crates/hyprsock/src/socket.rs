//! Socket discovery and the shared connect primitive
//!
//! Hyprland exposes two Unix sockets per running instance:
//!
//! - `<runtime_dir>/<signature>/.socket.sock` for request/response commands
//! - `<runtime_dir>/<signature>/.socket2.sock` for the event stream
//!
//! The instance signature is either fixed in [`SocketConfig`] or read from
//! `$HYPRLAND_INSTANCE_SIGNATURE` at the moment of every connection attempt.
//! Nothing is cached, so a restarted compositor is picked up by the next call.

use std::path::{Path, PathBuf};

use tokio::net::UnixStream;
use tracing::trace;

use crate::HyprError;

/// Environment variable Hyprland sets for its child processes
pub const INSTANCE_SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Default directory holding one subdirectory per compositor instance
pub const DEFAULT_RUNTIME_DIR: &str = "/tmp/hypr";

const COMMAND_SOCKET_NAME: &str = ".socket.sock";
const EVENT_SOCKET_NAME: &str = ".socket2.sock";

/// Where the instance signature comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InstanceSignature {
    /// Read `$HYPRLAND_INSTANCE_SIGNATURE` on each connection attempt
    #[default]
    Environment,
    /// Use this signature regardless of the environment
    Fixed(String),
}

impl InstanceSignature {
    fn resolve(&self) -> Result<String, HyprError> {
        let signature = match self {
            InstanceSignature::Environment => {
                std::env::var(INSTANCE_SIGNATURE_ENV).map_err(|_| HyprError::SignatureNotSet)?
            }
            InstanceSignature::Fixed(signature) => signature.clone(),
        };

        if signature.is_empty() {
            return Err(HyprError::SignatureNotSet);
        }

        Ok(signature)
    }
}

/// Explicit connection configuration shared by both channels
///
/// # Example
///
/// ```ignore
/// let config = SocketConfig::default().with_signature("abc123_1700000000");
/// assert!(config.command_socket()?.ends_with(".socket.sock"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConfig {
    /// Directory containing the per-instance socket directories
    pub runtime_dir: PathBuf,
    /// Source of the instance signature
    pub instance: InstanceSignature,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            runtime_dir: PathBuf::from(DEFAULT_RUNTIME_DIR),
            instance: InstanceSignature::Environment,
        }
    }
}

impl SocketConfig {
    /// Config pinned to a specific instance signature
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.instance = InstanceSignature::Fixed(signature.into());
        self
    }

    /// Config rooted at a different runtime directory
    pub fn with_runtime_dir(mut self, runtime_dir: impl Into<PathBuf>) -> Self {
        self.runtime_dir = runtime_dir.into();
        self
    }

    /// Path of the command socket for the current instance
    ///
    /// # Errors
    ///
    /// Returns `HyprError::SignatureNotSet` if no signature is available.
    pub fn command_socket(&self) -> Result<PathBuf, HyprError> {
        self.socket_path(COMMAND_SOCKET_NAME)
    }

    /// Path of the event socket for the current instance
    ///
    /// # Errors
    ///
    /// Returns `HyprError::SignatureNotSet` if no signature is available.
    pub fn event_socket(&self) -> Result<PathBuf, HyprError> {
        self.socket_path(EVENT_SOCKET_NAME)
    }

    fn socket_path(&self, name: &str) -> Result<PathBuf, HyprError> {
        let signature = self.instance.resolve()?;
        Ok(self.runtime_dir.join(signature).join(name))
    }
}

/// Open a stream connection to one of the compositor sockets
///
/// # Errors
///
/// Returns `HyprError::ConnectionFailed` carrying the path if the socket
/// is missing, stale, or refuses the connection.
pub(crate) async fn connect(path: &Path) -> Result<UnixStream, HyprError> {
    trace!(path = %path.display(), "Connecting to Hyprland socket");

    UnixStream::connect(path)
        .await
        .map_err(|e| HyprError::ConnectionFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the one test
    // that touches them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_socket_paths_use_fixed_signature() {
        let config = SocketConfig::default().with_signature("abc_123");

        assert_eq!(
            config.command_socket().unwrap(),
            PathBuf::from("/tmp/hypr/abc_123/.socket.sock")
        );
        assert_eq!(
            config.event_socket().unwrap(),
            PathBuf::from("/tmp/hypr/abc_123/.socket2.sock")
        );
    }

    #[test]
    fn test_socket_paths_follow_runtime_dir() {
        let config = SocketConfig::default()
            .with_runtime_dir("/run/user/1000/hypr")
            .with_signature("sig");

        assert_eq!(
            config.command_socket().unwrap(),
            PathBuf::from("/run/user/1000/hypr/sig/.socket.sock")
        );
    }

    #[test]
    fn test_empty_fixed_signature_rejected() {
        let config = SocketConfig::default().with_signature("");

        let err = config.command_socket().unwrap_err();
        assert!(
            matches!(err, HyprError::SignatureNotSet),
            "Expected SignatureNotSet, got: {:?}",
            err
        );
    }

    #[test]
    fn test_environment_signature_is_read_on_every_call() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let original = env::var(INSTANCE_SIGNATURE_ENV).ok();

        let config = SocketConfig::default();

        env::remove_var(INSTANCE_SIGNATURE_ENV);
        let missing = config.event_socket();

        env::set_var(INSTANCE_SIGNATURE_ENV, "first");
        let first = config.event_socket();

        env::set_var(INSTANCE_SIGNATURE_ENV, "second");
        let second = config.event_socket();

        match original {
            Some(val) => env::set_var(INSTANCE_SIGNATURE_ENV, val),
            None => env::remove_var(INSTANCE_SIGNATURE_ENV),
        }

        assert!(matches!(missing, Err(HyprError::SignatureNotSet)));
        assert_eq!(
            first.unwrap(),
            PathBuf::from("/tmp/hypr/first/.socket2.sock")
        );
        assert_eq!(
            second.unwrap(),
            PathBuf::from("/tmp/hypr/second/.socket2.sock")
        );
    }

    #[tokio::test]
    async fn test_connect_to_missing_socket() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join(".socket.sock");

        let err = connect(&socket_path).await.unwrap_err();
        match &err {
            HyprError::ConnectionFailed { path, source } => {
                assert_eq!(path, &socket_path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected ConnectionFailed error, got: {:?}", other),
        }
        assert!(err.is_connection_error());
    }
}
