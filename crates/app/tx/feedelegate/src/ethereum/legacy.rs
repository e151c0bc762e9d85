//! Legacy (pre-EIP-2718) transaction type.

use alloy_consensus::{Signed, TxLegacy};
use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, Bytes, TxKind, U256};

use crate::envelope::tx_type;
use crate::signature::SignatureValues;
use crate::signer::legacy_v;
use crate::traits::TypedTransaction;

/// A legacy Ethereum transaction together with its sender signature.
///
/// Legacy transactions are pre-EIP-2718 and don't have a type prefix.
/// They support EIP-155 replay protection via chain_id in the signature.
///
/// Content fields are public. The signature triple is only reachable through
/// [`LegacyTx::set_signature_values`], which replaces all three components at
/// once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyTx {
    /// Sender-scoped sequence number.
    pub nonce: u64,
    /// Recipient, or `TxKind::Create` for contract creation.
    pub to: TxKind,
    /// Call data.
    pub input: Bytes,
    pub gas_limit: u64,
    pub gas_price: U256,
    /// Amount transferred, in wei.
    pub value: U256,
    signature: SignatureValues,
}

impl LegacyTx {
    /// Create an unsigned transaction.
    pub fn new(
        nonce: u64,
        to: TxKind,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        input: Bytes,
    ) -> Self {
        Self {
            nonce,
            to,
            input,
            gas_limit,
            gas_price,
            value,
            signature: SignatureValues::UNSET,
        }
    }

    /// Create from an alloy `Signed<TxLegacy>` handed over by the decoder.
    ///
    /// The alloy signature carries only the y-parity; `v` is rebuilt from it
    /// and the transaction's chain id (EIP-155), or as `27 + parity` when the
    /// transaction has no chain id.
    pub fn from_alloy(signed: &Signed<TxLegacy>) -> Self {
        let tx = signed.tx();
        let signature = signed.signature();
        let v = legacy_v(u8::from(signature.v()), tx.chain_id);

        Self {
            nonce: tx.nonce,
            to: tx.to,
            input: Bytes::copy_from_slice(&tx.input),
            gas_limit: tx.gas_limit,
            gas_price: U256::from(tx.gas_price),
            value: tx.value,
            signature: SignatureValues::new(v, signature.r(), signature.s()),
        }
    }

    /// Returns a storage-independent copy.
    ///
    /// The payload is reallocated and absent signature components are copied
    /// as zero.
    pub fn deep_copy(&self) -> Self {
        Self {
            nonce: self.nonce,
            to: self.to,
            input: Bytes::copy_from_slice(&self.input),
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
            value: self.value,
            signature: self.signature.normalized(),
        }
    }

    /// Copy a triple as is, keeping absent components absent.
    pub(crate) fn replace_signature(&mut self, signature: SignatureValues) {
        self.signature = signature;
    }
}

impl TypedTransaction for LegacyTx {
    fn tx_type(&self) -> u8 {
        tx_type::LEGACY
    }

    fn chain_id(&self) -> Option<u64> {
        self.signature.v.and_then(derive_chain_id)
    }

    fn access_list(&self) -> AccessList {
        AccessList::default()
    }

    fn input(&self) -> &[u8] {
        &self.input
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_fee_cap(&self) -> U256 {
        self.gas_price
    }

    fn gas_tip_cap(&self) -> U256 {
        self.gas_price
    }

    fn gas_price(&self) -> U256 {
        self.gas_price
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn to(&self) -> Option<Address> {
        self.to.to().copied()
    }

    fn raw_signature_values(&self) -> SignatureValues {
        self.signature
    }

    /// Legacy transactions carry their chain id inside `v`, so `_chain_id`
    /// is not stored.
    fn set_signature_values(&mut self, _chain_id: Option<u64>, v: U256, r: U256, s: U256) {
        self.signature = SignatureValues::new(v, r, s);
        tracing::trace!(nonce = self.nonce, "sender signature set");
    }
}

/// Derives the EIP-155 chain id encoded in a legacy `v` value.
///
/// `27`/`28` are pre-EIP-155 and carry no chain id; anything below `35`
/// other than those is not a valid encoding either.
fn derive_chain_id(v: U256) -> Option<u64> {
    if v < U256::from(35) {
        return None;
    }
    u64::try_from((v - U256::from(35)) / U256::from(2)).ok()
}
