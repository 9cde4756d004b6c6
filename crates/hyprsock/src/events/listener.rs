//! Event stream client
//!
//! `EventListener` holds at most one connection to `.socket2.sock`. A
//! spawned reader task splits the byte stream into newline-terminated
//! frames, decodes each one and hands it to the [`ListenerRegistry`].
//!
//! ## Framing
//!
//! Reads are buffered and split on `\n`, so a read carrying several frames
//! and a frame arriving across several reads both decode correctly. A last
//! frame without a trailing newline is still delivered when the compositor
//! closes the stream.
//!
//! ## Lifecycle
//!
//! ```text
//! new() --listen()--> listening --close()--> idle --listen()--> listening
//!                        |
//!                        +-- compositor closes --> reader finished (no reconnect)
//! ```
//!
//! Listeners belong to the registry, not to the connection: `close()` keeps
//! them, and the next `listen()` delivers to them again.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixStream;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::decode::parse_frame;
use super::registry::{EventReceiver, ListenerId, ListenerRegistry, DEFAULT_CHANNEL_BUFFER};
use super::types::{Event, EventKind};
use crate::socket::{connect, SocketConfig};
use crate::HyprError;

/// Handle to the spawned reader task
type ReaderHandle = JoinHandle<Result<(), HyprError>>;

/// Persistent subscription to Hyprland's event socket
///
/// Callbacks run on the reader task, which is why they must be
/// `Send + Sync`. They should return quickly; a slow callback delays every
/// event behind it.
///
/// # Example
///
/// ```ignore
/// let mut listener = EventListener::new(SocketConfig::default());
/// listener.on(EventKind::ActiveWindow, |event| {
///     if let Event::ActiveWindow { window_class, .. } = event {
///         println!("focused {}", window_class);
///     }
/// });
/// listener.listen().await?;
/// listener.wait().await?;
/// ```
#[derive(Debug)]
pub struct EventListener {
    config: SocketConfig,
    registry: ListenerRegistry,
    reader: Option<ReaderHandle>,
}

impl EventListener {
    pub fn new(config: SocketConfig) -> Self {
        Self {
            config,
            registry: ListenerRegistry::new(),
            reader: None,
        }
    }

    /// The registry events are dispatched to
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Register a callback for `kind`; see [`ListenerRegistry::on`]
    pub fn on<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.registry.on(kind, callback)
    }

    /// Remove a callback by the id `on` returned
    pub fn remove(&self, kind: EventKind, id: ListenerId) -> bool {
        self.registry.remove(kind, id)
    }

    /// Receive events of `kind` as a stream
    pub fn subscribe(&self, kind: EventKind) -> (ListenerId, EventReceiver) {
        self.registry.channel(kind, DEFAULT_CHANNEL_BUFFER)
    }

    /// Connect to the event socket and start dispatching
    ///
    /// Any previous connection is closed first. Returns once the connection
    /// is established; events are then delivered in the background.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::SignatureNotSet` if no instance signature is available.
    /// Returns `HyprError::ConnectionFailed` if the event socket cannot be opened.
    pub async fn listen(&mut self) -> Result<(), HyprError> {
        self.listen_with(|| {}).await
    }

    /// Like [`listen`](Self::listen), running `on_connected` once connected
    pub async fn listen_with<F>(&mut self, on_connected: F) -> Result<(), HyprError>
    where
        F: FnOnce(),
    {
        self.close();

        let path = self.config.event_socket()?;
        let socket = connect(&path).await?;
        debug!(path = %path.display(), "Hyprland event stream connected");

        let registry = self.registry.clone();
        self.reader = Some(tokio::spawn(read_events(socket, registry)));

        on_connected();
        Ok(())
    }

    /// Drop the connection immediately
    ///
    /// Frames already buffered but not yet dispatched are discarded.
    /// Registered listeners are kept.
    pub fn close(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
            debug!("Hyprland event stream closed");
        }
    }

    /// Whether a connection is open and its reader is still running
    pub fn is_listening(&self) -> bool {
        self.reader
            .as_ref()
            .is_some_and(|reader| !reader.is_finished())
    }

    /// Wait until the compositor ends the stream
    ///
    /// Returns immediately if not listening. There is no reconnect; call
    /// [`listen`](Self::listen) again to resume.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::ReceiveFailed` if reading from the socket failed.
    pub async fn wait(&mut self) -> Result<(), HyprError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(());
        };

        let result = reader.await;
        self.reader = None;

        match result {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(()),
        }
    }

    /// Decode one frame and dispatch it as if it came from the socket
    ///
    /// Returns the number of callbacks invoked; an undecodable frame
    /// invokes none.
    pub fn dispatch_frame(&self, frame: &str) -> usize {
        dispatch_frame(&self.registry, frame)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.close();
    }
}

fn dispatch_frame(registry: &ListenerRegistry, frame: &str) -> usize {
    match parse_frame(frame) {
        Some(event) => registry.dispatch(&event),
        None => {
            trace!(frame = %frame.trim_end(), "Ignoring undecodable event frame");
            0
        }
    }
}

async fn read_events(socket: UnixStream, registry: ListenerRegistry) -> Result<(), HyprError> {
    let mut reader = BufReader::new(socket);
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(HyprError::ReceiveFailed)?;

        if bytes_read == 0 {
            debug!("Hyprland closed the event stream");
            return Ok(());
        }

        let frame = String::from_utf8_lossy(&line);
        if frame.trim().is_empty() {
            continue;
        }
        dispatch_frame(&registry, &frame);
    }
}
