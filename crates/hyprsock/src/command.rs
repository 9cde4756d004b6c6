//! Command channel
//!
//! Every call opens a fresh connection to `.socket.sock`, writes one request,
//! reads the reply until Hyprland closes the connection, and drops the
//! socket. There is no pooling and no state shared between calls, so a
//! `CommandChannel` can be used from many tasks at once.
//!
//! ## Request format
//!
//! ```text
//! /<command>          plain request
//! <flag>/<command>    flagged request, e.g. j/monitors for JSON output
//! ```
//!
//! A reply of exactly `ok` is the success sentinel. Anything else is an
//! error unless the caller set [`CommandOptions::skip_ok`].

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, trace};

use crate::socket::{connect, SocketConfig};
use crate::HyprError;

/// Literal reply Hyprland sends when a command succeeded
pub const SUCCESS_SENTINEL: &str = "ok";

/// Flag requesting JSON output from query commands
pub const JSON_FLAG: char = 'j';

/// Per-call options for [`CommandChannel::send_command`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Single-character flag placed before the `/` delimiter
    pub flag: Option<char>,
    /// Accept any reply instead of requiring `ok`
    pub skip_ok: bool,
}

impl CommandOptions {
    /// Options for a query: JSON flag set, sentinel not enforced
    pub fn json() -> Self {
        Self {
            flag: Some(JSON_FLAG),
            skip_ok: true,
        }
    }

    /// Options that only disable the sentinel check
    pub fn raw() -> Self {
        Self {
            flag: None,
            skip_ok: true,
        }
    }
}

/// Request/response client for Hyprland's command socket
#[derive(Debug, Clone, Default)]
pub struct CommandChannel {
    config: SocketConfig,
}

impl CommandChannel {
    pub fn new(config: SocketConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SocketConfig {
        &self.config
    }

    /// Send one command and return Hyprland's reply
    ///
    /// The socket path is resolved on every call. No timeout is applied;
    /// wrap the future in `tokio::time::timeout` if you need one.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::SignatureNotSet` if no instance signature is available.
    /// Returns `HyprError::ConnectionFailed` if the socket cannot be opened.
    /// Returns `HyprError::SendFailed` / `ReceiveFailed` on I/O failure.
    /// Returns `HyprError::ConnectionClosed` if Hyprland closed without replying.
    /// Returns `HyprError::CommandRejected` if the reply is not `ok` and
    /// `skip_ok` is false.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let channel = CommandChannel::new(SocketConfig::default());
    /// channel.send_command("dispatch workspace 2", CommandOptions::default()).await?;
    /// let monitors = channel.send_command("monitors", CommandOptions::json()).await?;
    /// ```
    pub async fn send_command(
        &self,
        command: &str,
        options: CommandOptions,
    ) -> Result<String, HyprError> {
        let request = format_request(command, options.flag);
        let response = self.round_trip(&request).await?;
        check_sentinel(response, options.skip_ok)
    }

    /// Write `request` exactly as given and return the reply
    ///
    /// Nothing is prepended and the reply is not checked against `ok`.
    /// For requests [`send_command`](Self::send_command) cannot express,
    /// such as `[[BATCH]]` lists that carry their own prefixes.
    ///
    /// # Errors
    ///
    /// Same as [`send_command`](Self::send_command), except that
    /// `HyprError::CommandRejected` is never returned.
    pub async fn send_raw(&self, request: &str) -> Result<String, HyprError> {
        self.round_trip(request).await
    }

    async fn round_trip(&self, request: &str) -> Result<String, HyprError> {
        let path = self.config.command_socket()?;
        let mut socket = connect(&path).await?;

        debug!(request = %request, "Sending Hyprland command");

        socket
            .write_all(request.as_bytes())
            .await
            .map_err(HyprError::SendFailed)?;
        socket.flush().await.map_err(HyprError::SendFailed)?;

        let mut reply = Vec::new();
        socket
            .read_to_end(&mut reply)
            .await
            .map_err(HyprError::ReceiveFailed)?;
        drop(socket);

        if reply.is_empty() {
            return Err(HyprError::ConnectionClosed);
        }

        trace!(bytes = reply.len(), "Received Hyprland reply");
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }
}

fn format_request(command: &str, flag: Option<char>) -> String {
    match flag {
        Some(flag) => format!("{}/{}", flag, command),
        None => format!("/{}", command),
    }
}

fn check_sentinel(response: String, skip_ok: bool) -> Result<String, HyprError> {
    if !skip_ok && response != SUCCESS_SENTINEL {
        return Err(HyprError::CommandRejected { response });
    }
    Ok(response)
}
