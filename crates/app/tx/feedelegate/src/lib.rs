//! Fee-delegated transaction support for Evolve.
//!
//! This crate provides the in-memory model of Ethereum-style transactions in
//! which the execution fee is paid by a fee payer distinct from the sender.
//! Both parties sign: the sender over the inner transaction, the fee payer
//! over the envelope that wraps it.
//!
//! # Transaction Types
//!
//! - **Legacy (0x00)**: Pre-EIP-2718 transactions, optionally with EIP-155 replay protection
//! - **Fee-delegated legacy (0x16)**: A legacy transaction plus fee payer, max fee limit
//!   and the fee payer's signature
//!
//! # Usage
//!
//! ```text
//! use evolve_tx_feedelegate::{Eip155Signer, FeeDelegatedLegacyTx, LegacyTx, TxEnvelope};
//!
//! let signer = Eip155Signer::new(1337);
//!
//! // Sender signs the plain transaction
//! let sender_tx = TxEnvelope::from(legacy_tx).with_sender_signature(&signer, &sender_sig)?;
//!
//! // Wrap it and let the fee payer sign the envelope
//! let envelope = FeeDelegatedLegacyTx::new(inner).with_fee_payer(payer);
//! let tx = TxEnvelope::from(envelope).with_fee_payer_signature(&signer, &payer_sig)?;
//! ```
//!
//! # Architecture
//!
//! The crate uses a trait-based design:
//!
//! 1. [`TypedTransaction`] - Accessor contract all transaction types implement
//! 2. [`FeeDelegatedTransaction`] - Fee payer accessors on top of it
//! 3. [`TxEnvelope`] - Closed enum holding any supported transaction type
//! 4. [`TxSigner`] - Lays raw signatures out as `(v, r, s)` triples
//!
//! Encoding, signature creation and sender recovery live outside this crate.

pub mod config;
pub mod envelope;
pub mod error;
pub mod ethereum;
pub mod fee_delegated;
pub mod signature;
pub mod signer;
pub mod traits;

// Re-export main types
pub use config::SignerConfig;
pub use envelope::{tx_type, TxEnvelope, TxType};
pub use error::*;
pub use ethereum::LegacyTx;
pub use fee_delegated::FeeDelegatedLegacyTx;
pub use signature::SignatureValues;
pub use signer::{
    signer_for, to_primitive_signature, Eip155Signer, HomesteadSigner, TxSigner,
    SIGNATURE_LENGTH,
};
pub use traits::{FeeDelegatedTransaction, TypedTransaction};
