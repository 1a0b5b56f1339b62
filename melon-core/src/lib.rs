pub mod clock;
pub mod random;

pub use clock::{Clock, FixedClock, SystemClock};
pub use random::{FixedRandom, RandomSource, ThreadRandom};

/// Raised when an order asks for more melons than a single order may carry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No more than {max} melons!")]
pub struct TooManyMelonsError {
    pub quantity: i32,
    pub max: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(#[from] TooManyMelonsError),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
