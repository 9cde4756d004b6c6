//! Hyprland event stream
//!
//! Hyprland publishes state changes on `.socket2.sock` as newline-terminated
//! text frames of the form `<kind>>><comma separated args>`:
//!
//! ```text
//! workspace>>2
//! activewindow>>firefox,Mozilla Firefox
//! openwindow>>5632a0e4d1a0,2,kitty,~
//! ```
//!
//! ## Architecture
//!
//! - `EventListener`: owns the connection and the reader task
//! - `ListenerRegistry`: per-kind callbacks, shared with the reader task
//! - `parse_frame` / `decode`: one decoder per kind, producing an [`Event`]
//!
//! Frames with an unknown kind, no `>>` separator, or too few arguments for
//! their kind are dropped without invoking any listener.

mod decode;
mod listener;
mod registry;
mod types;

pub use decode::{decode, parse_frame, FRAME_SEPARATOR};
pub use listener::EventListener;
pub use registry::{Callback, EventReceiver, ListenerId, ListenerRegistry, DEFAULT_CHANNEL_BUFFER};
pub use types::{Event, EventKind, ScreencastOwner, UnknownEventKind};
