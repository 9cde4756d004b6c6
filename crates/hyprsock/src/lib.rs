//! Client for Hyprland's IPC sockets
//!
//! Hyprland exposes two Unix sockets per running instance under
//! `<runtime dir>/<instance signature>/`:
//!
//! - `.socket.sock`: one request per connection, answered with `ok`, an
//!   error message, or the requested data
//! - `.socket2.sock`: a persistent stream of event frames
//!
//! [`CommandChannel`] covers the first, including typed queries and
//! dispatcher builders. [`EventListener`] covers the second.
//!
//! ```ignore
//! use hyprsock::{CommandChannel, Dispatch, EventKind, EventListener, SocketConfig};
//!
//! let config = SocketConfig::default();
//! let channel = CommandChannel::new(config.clone());
//! channel.dispatch(&Dispatch::Workspace { workspace: "2".into() }).await?;
//!
//! let mut listener = EventListener::new(config);
//! listener.on(EventKind::Workspace, |event| println!("{:?}", event));
//! listener.listen().await?;
//! ```

mod command;
mod error;
mod socket;

pub mod dispatch;
pub mod events;
pub mod query;

#[cfg(test)]
mod test_support;

pub use command::{CommandChannel, CommandOptions, JSON_FLAG, SUCCESS_SENTINEL};
pub use dispatch::Dispatch;
pub use error::HyprError;
pub use events::{Event, EventKind, EventListener, ListenerId, ListenerRegistry};
pub use socket::{InstanceSignature, SocketConfig, DEFAULT_RUNTIME_DIR, INSTANCE_SIGNATURE_ENV};
