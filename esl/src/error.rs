//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Codec error: {0}")]
    Core(#[from] esl_core::Error),

    #[error("Type error: {0}")]
    Types(#[from] esl_types::Error),

    #[error("Invalid binary frame: {0}")]
    Frame(#[from] hex::FromHexError),

    #[error("Invalid response from tag: {0}")]
    InvalidResponse(String),
}
