use thiserror::Error;

/// Errors surfaced by the scheduling engine
///
/// Not-found and invalid-input variants are rejected before any store
/// mutation; `Store` wraps transient failures from the database layer.
/// The engine performs no retries of its own.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Deck not found: {0}")]
    DeckNotFound(String),
    #[error("Card not found: {0}")]
    CardNotFound(String),
    #[error("Quality must be between 0 and 5, got {0}")]
    InvalidQuality(i32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
