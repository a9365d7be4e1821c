use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Champion not found: {0}")]
    ChampionNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Invalid draft sequence: {0} (valid positions are 1-20)")]
    InvalidSequence(u32),

    #[error("Draft is already complete (all 20 actions taken)")]
    DraftComplete,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),
}
