//! Error types for the Reed-Solomon codec.
//!
//! Every fallible codec operation returns [`FecResult`]. Decoding failures are
//! reported before the codeword is touched, so a caller that receives an
//! `Err` still holds exactly the bytes it passed in.

/// Result type for codec operations
pub type FecResult<T> = Result<T, FecError>;

/// Errors that can occur while configuring, encoding or decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FecError {
    #[error("Invalid parity count: {parity}. Must be between 1 and 254")]
    InvalidParity { parity: usize },

    #[error("Codeword too long: {data_len} data + {parity} parity bytes exceeds {max}")]
    CodewordTooLong {
        data_len: usize,
        parity: usize,
        max: usize,
    },

    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Syndromes were computed for {actual} parity symbols, codec uses {expected}")]
    ParityMismatch { expected: usize, actual: usize },

    #[error("Too many erasures: {erasures} declared, at most {parity} can be corrected")]
    TooManyErasures { erasures: usize, parity: usize },

    #[error("Erasure position {position} outside codeword of length {len}")]
    ErasureOutOfRange { position: usize, len: usize },

    #[error("Erasure position {position} declared more than once")]
    DuplicateErasure { position: usize },

    #[error("Uncorrectable codeword: locator has {roots} roots, parity allows {parity}")]
    Uncorrectable { roots: usize, parity: usize },

    #[error("Error location {location} outside codeword of length {len}")]
    RootOutOfRange { location: usize, len: usize },

    #[error("Locator derivative vanishes at error location {location}")]
    DegenerateLocator { location: usize },

    #[error("Corrected codeword still has a nonzero syndrome")]
    VerificationFailed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FecError {
    /// True for failures caused by the received data rather than by the
    /// caller's arguments.
    pub fn is_uncorrectable(&self) -> bool {
        matches!(
            self,
            FecError::Uncorrectable { .. }
                | FecError::RootOutOfRange { .. }
                | FecError::DegenerateLocator { .. }
                | FecError::VerificationFailed
        )
    }
}
