//! Transaction-specific error types.
//!
//! The data model itself is total. These errors only come out of the
//! dispatch and signature-splitting helpers layered on top of it.

use thiserror::Error;

/// Errors raised by transaction dispatch and signing helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// The type tag does not name a supported transaction shape.
    #[error("unsupported transaction type {0:#04x}")]
    UnsupportedTxType(u8),

    /// A raw signature was not `r || s || recovery_id`.
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// The recovery id byte of a raw signature was not 0 or 1.
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),

    /// A fee payer operation was applied to a shape without a fee payer.
    #[error("transaction type {0:#04x} is not fee-delegated")]
    NotFeeDelegated(u8),
}

/// Result type for transaction helpers.
pub type TxResult<T> = Result<T, TxError>;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation failed with one or more errors.
    #[error("config validation failed:\n{}", .0.join("\n"))]
    ValidationFailed(Vec<String>),
}
