use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse KDL")]
    #[diagnostic(code(hyprsock::config::parse_error))]
    ParseError {
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: kdl::KdlError,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(hyprsock::config::invalid))]
    Invalid { message: String },

    #[error("Missing value for `{node}`")]
    #[diagnostic(
        code(hyprsock::config::missing_value),
        help("give the node a string argument, e.g. `{node} \"...\"`")
    )]
    MissingValue { node: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
