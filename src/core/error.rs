use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrongholdError {
    #[error("Index {index} out of range for log of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown unit type index: {0}")]
    UnknownUnitType(usize),

    #[error("Unknown resource type index: {0}")]
    UnknownResourceType(usize),

    #[error("Invalid unit strength: {0}")]
    InvalidStrength(f32),

    #[error("Unknown decision code: {0}")]
    UnknownDecisionCode(u8),

    #[error("Out of memory while growing log")]
    OutOfMemory,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StrongholdError>;
