/// Crate-level errors
///
/// The scoring core itself is generic over the error type of its tag-link
/// sources and hands those back untouched; this enum covers the pieces this
/// crate owns: the text tag-link reader, configuration and the CLI output.
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tag link at line {line}: {reason}")]
    MalformedLink { line: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type RecommendResult<T> = Result<T, RecommendError>;
