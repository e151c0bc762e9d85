//! Mapping between raw secp256k1 signatures and transaction `(v, r, s)`
//! triples.
//!
//! Producing a signature and recovering a key from one happen elsewhere.
//! This module only decides how the 65-byte `r || s || recovery_id` output
//! of a signer is laid out in a transaction, and how a stored triple is
//! handed back to a recovery routine.

use alloy_primitives::{PrimitiveSignature, U256};

use crate::config::SignerConfig;
use crate::error::{TxError, TxResult};
use crate::signature::SignatureValues;

/// Length of a raw `r || s || recovery_id` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Lays out raw signatures as transaction signature triples.
pub trait TxSigner: Send + Sync {
    /// Chain id folded into `v`, if any.
    fn chain_id(&self) -> Option<u64>;

    /// Split a raw 65-byte signature into a `(v, r, s)` triple.
    fn signature_values(&self, sig: &[u8]) -> TxResult<SignatureValues> {
        let (r, s, recovery_id) = split_signature(sig)?;
        Ok(SignatureValues::new(legacy_v(recovery_id, self.chain_id()), r, s))
    }
}

/// Pre-EIP-155 layout: `v = 27 + recovery_id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HomesteadSigner;

impl TxSigner for HomesteadSigner {
    fn chain_id(&self) -> Option<u64> {
        None
    }
}

/// EIP-155 layout: `v = 35 + 2 * chain_id + recovery_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eip155Signer {
    chain_id: u64,
}

impl Eip155Signer {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }
}

impl TxSigner for Eip155Signer {
    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }
}

/// Build the signer described by `config`.
pub fn signer_for(config: &SignerConfig) -> Box<dyn TxSigner> {
    if config.eip155 {
        tracing::debug!(chain_id = config.chain_id, "using EIP-155 signer");
        Box::new(Eip155Signer::new(config.chain_id))
    } else {
        tracing::debug!("using homestead signer");
        Box::new(HomesteadSigner)
    }
}

/// Computes the legacy `v` value for a recovery id.
pub(crate) fn legacy_v(recovery_id: u8, chain_id: Option<u64>) -> U256 {
    let recovery_id = U256::from(recovery_id);
    match chain_id {
        Some(id) => U256::from(id)
            .saturating_mul(U256::from(2))
            .saturating_add(U256::from(35))
            .saturating_add(recovery_id),
        None => U256::from(27) + recovery_id,
    }
}

/// Extracts the y-parity encoded in a legacy `v` value.
fn parity_from_v(v: U256) -> Option<bool> {
    if v == U256::from(27) || v == U256::from(28) {
        return Some(v == U256::from(28));
    }
    if v >= U256::from(35) {
        return Some(!v.bit(0));
    }
    None
}

/// Convert a stored triple into the form a recovery routine consumes.
///
/// Returns `None` while the triple is unset or when `v` is not a legacy
/// encoding. Works for sender and fee payer triples alike.
pub fn to_primitive_signature(values: &SignatureValues) -> Option<PrimitiveSignature> {
    if !values.is_set() {
        return None;
    }
    let (v, r, s) = values.components();
    let parity = parity_from_v(v)?;
    Some(PrimitiveSignature::new(r, s, parity))
}

fn split_signature(sig: &[u8]) -> TxResult<(U256, U256, u8)> {
    let sig: &[u8; SIGNATURE_LENGTH] = sig
        .try_into()
        .map_err(|_| TxError::InvalidSignatureLength(sig.len()))?;

    let (r, rest) = sig.split_at(32);
    let (s, recovery_id) = rest.split_at(32);
    let recovery_id = recovery_id.first().copied().unwrap_or_default();
    if recovery_id > 1 {
        return Err(TxError::InvalidRecoveryId(recovery_id));
    }

    Ok((U256::from_be_slice(r), U256::from_be_slice(s), recovery_id))
}
