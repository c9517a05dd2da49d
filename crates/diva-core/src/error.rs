use thiserror::Error;

/// Why a single `sing` call did not happen.
///
/// Both variants are terminal for that call and carry no payload, so callers
/// compare them by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PerformError {
    #[error("low energy: please recharge with leeks")]
    LowEnergy,

    #[error("performance cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum DivaError {
    #[error(transparent)]
    Perform(#[from] PerformError),

    #[error("unknown voice version '{0}': expected one of V2_CLASSIC, V3, V4X, NT, SEKAI, V6_AI")]
    UnknownVersion(String),

    #[error("invalid song title {0:?}: must not be blank")]
    InvalidSong(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DivaError>;
