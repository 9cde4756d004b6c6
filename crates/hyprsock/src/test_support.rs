//! Fake Hyprland sockets for tests
//!
//! Binds real Unix listeners inside a temporary runtime directory so the
//! channels can be exercised end to end without a compositor.

use std::path::PathBuf;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

use crate::SocketConfig;

pub(crate) const TEST_SIGNATURE: &str = "test-instance_1700000000";

pub(crate) struct FakeHyprland {
    // Held so the directory outlives the listeners
    _runtime_dir: TempDir,
    instance_dir: PathBuf,
    config: SocketConfig,
}

impl FakeHyprland {
    pub(crate) fn new() -> Self {
        let runtime_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let instance_dir = runtime_dir.path().join(TEST_SIGNATURE);
        std::fs::create_dir_all(&instance_dir).expect("Failed to create instance dir");

        let config = SocketConfig::default()
            .with_runtime_dir(runtime_dir.path())
            .with_signature(TEST_SIGNATURE);

        Self {
            _runtime_dir: runtime_dir,
            instance_dir,
            config,
        }
    }

    pub(crate) fn config(&self) -> SocketConfig {
        self.config.clone()
    }

    /// Answer one command connection per entry in `responses`, in order
    ///
    /// Resolves to the requests received, decoded as text.
    pub(crate) fn serve_commands(&self, responses: Vec<&'static str>) -> JoinHandle<Vec<String>> {
        let listener = UnixListener::bind(self.instance_dir.join(".socket.sock"))
            .expect("Failed to bind command socket");

        tokio::spawn(async move {
            let mut requests = Vec::new();
            for response in responses {
                let (mut stream, _addr) = listener.accept().await.expect("accept failed");

                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.expect("read failed");
                requests.push(String::from_utf8_lossy(&buf[..n]).into_owned());

                stream
                    .write_all(response.as_bytes())
                    .await
                    .expect("write failed");
                // Dropping the stream closes the connection like Hyprland does
            }
            requests
        })
    }

    /// Bind the event socket; the test accepts and writes frames itself
    pub(crate) fn event_socket(&self) -> UnixListener {
        UnixListener::bind(self.instance_dir.join(".socket2.sock"))
            .expect("Failed to bind event socket")
    }
}
