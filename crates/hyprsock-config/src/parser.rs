//! KDL configuration parser
//!
//! ```kdl
//! global {
//!     log-level "debug"
//! }
//!
//! socket {
//!     runtime-dir "/tmp/hypr"
//!     instance-signature "v0.40.0_1700000000_123456789"
//! }
//! ```
//!
//! Every node is optional. Unknown nodes are reported with a warning and
//! otherwise ignored.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::*;

/// Config location used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/hyprsock/config.kdl";

/// [`DEFAULT_CONFIG_PATH`] with the tilde expanded
pub fn default_config_path() -> PathBuf {
    shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned().into()
}

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse `path` if it exists, otherwise return the defaults
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // kdl reports spans with its own miette version; rebuild from offset/len
        let span = miette::SourceSpan::from((e.span.offset(), e.span.len()));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "global" => {
                config.global = parse_global(node)?;
            }
            "socket" => {
                config.socket = parse_socket(node)?;
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

/// First argument of `node` as a string
fn string_arg(node: &kdl::KdlNode) -> Result<&str, ConfigError> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_string())
        .ok_or_else(|| ConfigError::MissingValue {
            node: node.name().value().to_string(),
        })
}

fn parse_global(node: &kdl::KdlNode) -> Result<GlobalConfig, ConfigError> {
    let mut global = GlobalConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "log-level" => {
                    global.log_level = string_arg(child)?
                        .parse::<LogLevel>()
                        .map_err(|message| ConfigError::Invalid { message })?;
                }
                name => {
                    tracing::warn!("Unknown global config option: {}", name);
                }
            }
        }
    }

    Ok(global)
}

fn parse_socket(node: &kdl::KdlNode) -> Result<SocketSettings, ConfigError> {
    let mut socket = SocketSettings::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "runtime-dir" => {
                    let dir = string_arg(child)?;
                    if dir.trim().is_empty() {
                        return Err(ConfigError::Invalid {
                            message: "runtime-dir must not be empty".to_string(),
                        });
                    }
                    socket.runtime_dir = shellexpand::tilde(dir).into_owned().into();
                }
                "instance-signature" => {
                    let signature = string_arg(child)?;
                    if signature.is_empty() || signature.contains('/') {
                        return Err(ConfigError::Invalid {
                            message: format!(
                                "instance-signature '{}' is not a valid directory name",
                                signature
                            ),
                        });
                    }
                    socket.instance_signature = Some(signature.to_string());
                }
                name => {
                    tracing::warn!("Unknown socket config option: {}", name);
                }
            }
        }
    }

    Ok(socket)
}
