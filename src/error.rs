use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("invalid interpolation: {0}")]
    InvalidInterpolation(String),

    #[error("invalid flashcards structure: {0}")]
    Structure(#[from] serde_json::Error),
}
