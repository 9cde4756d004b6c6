//! Configuration parsing for hyprsock
//!
//! Reads the optional KDL file describing log verbosity and where to find
//! Hyprland's sockets.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{default_config_path, load_or_default, parse_config, parse_config_str, DEFAULT_CONFIG_PATH};
