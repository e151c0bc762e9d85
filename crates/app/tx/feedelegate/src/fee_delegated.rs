//! Fee-delegated wrapper around a legacy transaction.
//!
//! The sender signs the inner [`LegacyTx`] as usual. The fee payer then signs
//! the envelope, which commits to the inner content plus the fee payer
//! fields, and pays the execution fee in the sender's place.

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, Bytes, U256};

use crate::envelope::tx_type;
use crate::ethereum::LegacyTx;
use crate::signature::SignatureValues;
use crate::traits::{FeeDelegatedTransaction, TypedTransaction};

/// A legacy transaction whose fee is paid by a separate fee payer.
///
/// Two signature triples are carried and never read through one another:
/// the sender's lives in the inner transaction, the payer's on the envelope.
/// Content accessors delegate to the inner transaction so the envelope can
/// stand in for a plain transaction wherever only content is needed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeeDelegatedLegacyTx {
    inner: LegacyTx,
    max_fee_limit: Option<U256>,
    fee_payer: Option<Address>,
    fee_payer_signature: SignatureValues,
}

impl FeeDelegatedLegacyTx {
    /// Embed a (normally already sender-signed) transaction.
    pub fn new(inner: LegacyTx) -> Self {
        Self {
            inner,
            max_fee_limit: None,
            fee_payer: None,
            fee_payer_signature: SignatureValues::UNSET,
        }
    }

    /// Set the fee payer (builder style).
    pub fn with_fee_payer(mut self, fee_payer: Address) -> Self {
        self.fee_payer = Some(fee_payer);
        self
    }

    /// Set the max fee limit (builder style).
    pub fn with_max_fee_limit(mut self, max_fee_limit: U256) -> Self {
        self.max_fee_limit = Some(max_fee_limit);
        self
    }

    /// Get a reference to the embedded sender transaction.
    pub fn inner(&self) -> &LegacyTx {
        &self.inner
    }

    /// Consume the envelope, returning the sender transaction.
    pub fn into_inner(self) -> LegacyTx {
        self.inner
    }

    /// Copy the content and sender signature of `sender_tx` into the
    /// embedded transaction.
    ///
    /// The envelope keeps its own storage: later changes to `sender_tx` are
    /// not observed. Nothing is signed and the payer fields are untouched.
    pub fn adopt_inner(&mut self, sender_tx: &LegacyTx) {
        self.inner.nonce = sender_tx.nonce;
        self.inner.to = sender_tx.to;
        self.inner.input = Bytes::copy_from_slice(&sender_tx.input);
        self.inner.gas_limit = sender_tx.gas_limit;
        self.inner.value = sender_tx.value;
        self.inner.gas_price = sender_tx.gas_price;
        self.inner.replace_signature(sender_tx.raw_signature_values());

        tracing::debug!(
            nonce = sender_tx.nonce,
            signed = sender_tx.raw_signature_values().is_set(),
            "adopted sender transaction into fee-delegated envelope"
        );
    }

    /// Returns a storage-independent copy.
    ///
    /// The inner transaction is deep-copied, the max fee limit is copied as
    /// is, and each payer signature component is copied into a fresh value,
    /// reading absent components as zero. An unsigned envelope therefore
    /// copies to one holding the present triple `(0, 0, 0)`.
    pub fn deep_copy(&self) -> Self {
        Self {
            inner: self.inner.deep_copy(),
            max_fee_limit: self.max_fee_limit,
            fee_payer: self.fee_payer,
            fee_payer_signature: self.fee_payer_signature.normalized(),
        }
    }

    /// Set or clear the fee payer.
    pub fn set_fee_payer(&mut self, fee_payer: Option<Address>) {
        self.fee_payer = fee_payer;
    }

    /// Set or clear the max fee limit.
    pub fn set_max_fee_limit(&mut self, max_fee_limit: Option<U256>) {
        self.max_fee_limit = max_fee_limit;
    }

    /// Replace the sender's signature triple on the embedded transaction.
    pub fn set_sender_signature(&mut self, chain_id: Option<u64>, v: U256, r: U256, s: U256) {
        self.inner.set_signature_values(chain_id, v, r, s);
    }
}

impl TypedTransaction for FeeDelegatedLegacyTx {
    fn tx_type(&self) -> u8 {
        tx_type::FEE_DELEGATED_LEGACY
    }

    fn chain_id(&self) -> Option<u64> {
        self.inner.chain_id()
    }

    fn access_list(&self) -> AccessList {
        self.inner.access_list()
    }

    fn input(&self) -> &[u8] {
        self.inner.input()
    }

    fn gas_limit(&self) -> u64 {
        self.inner.gas_limit()
    }

    fn gas_fee_cap(&self) -> U256 {
        self.inner.gas_fee_cap()
    }

    fn gas_tip_cap(&self) -> U256 {
        self.inner.gas_price()
    }

    fn gas_price(&self) -> U256 {
        self.inner.gas_price()
    }

    fn value(&self) -> U256 {
        self.inner.value()
    }

    fn nonce(&self) -> u64 {
        self.inner.nonce()
    }

    fn to(&self) -> Option<Address> {
        self.inner.to()
    }

    /// Returns the sender's triple, not the fee payer's.
    fn raw_signature_values(&self) -> SignatureValues {
        self.inner.raw_signature_values()
    }

    /// Signing an envelope is the fee payer's act, so this stores the payer
    /// triple. Use [`FeeDelegatedLegacyTx::set_sender_signature`] for the
    /// sender.
    fn set_signature_values(&mut self, _chain_id: Option<u64>, v: U256, r: U256, s: U256) {
        self.set_payer_signature(v, r, s);
    }
}

impl FeeDelegatedTransaction for FeeDelegatedLegacyTx {
    fn fee_payer(&self) -> Option<Address> {
        self.fee_payer
    }

    fn max_fee_limit(&self) -> Option<U256> {
        self.max_fee_limit
    }

    fn raw_fee_payer_signature_values(&self) -> SignatureValues {
        self.fee_payer_signature
    }

    fn set_payer_signature(&mut self, v: U256, r: U256, s: U256) {
        self.fee_payer_signature = SignatureValues::new(v, r, s);
        tracing::debug!(
            nonce = self.inner.nonce,
            fee_payer = ?self.fee_payer,
            "fee payer signature set"
        );
    }
}

impl From<LegacyTx> for FeeDelegatedLegacyTx {
    fn from(inner: LegacyTx) -> Self {
        Self::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::TxKind;

    fn signed_sender_tx() -> LegacyTx {
        let mut tx = LegacyTx::new(
            1,
            TxKind::Call(Address::repeat_byte(0x11)),
            U256::from(1000),
            21_000,
            U256::from(5),
            Bytes::from_static(b"payload"),
        );
        tx.set_signature_values(None, U256::from(27), U256::from(0xAA), U256::from(0xBB));
        tx
    }

    #[test]
    fn test_default_envelope_has_zero_inner() {
        let envelope = FeeDelegatedLegacyTx::default();
        assert_eq!(envelope.inner(), &LegacyTx::default());
        assert_eq!(envelope.fee_payer(), None);
        assert_eq!(envelope.max_fee_limit(), None);
        assert_eq!(
            envelope.raw_fee_payer_signature_values(),
            SignatureValues::UNSET
        );
    }

    #[test]
    fn test_adopt_inner_leaves_payer_fields() {
        let mut envelope = FeeDelegatedLegacyTx::default()
            .with_fee_payer(Address::repeat_byte(0x22))
            .with_max_fee_limit(U256::from(1_000_000));
        envelope.set_payer_signature(U256::from(28), U256::from(0xCC), U256::from(0xDD));

        envelope.adopt_inner(&signed_sender_tx());

        assert_eq!(envelope.fee_payer(), Some(Address::repeat_byte(0x22)));
        assert_eq!(envelope.max_fee_limit(), Some(U256::from(1_000_000)));
        assert_eq!(
            envelope.raw_fee_payer_signature_values(),
            SignatureValues::new(U256::from(28), U256::from(0xCC), U256::from(0xDD))
        );
    }

    #[test]
    fn test_adopt_unsigned_keeps_signature_absent() {
        let unsigned = LegacyTx::new(
            3,
            TxKind::Create,
            U256::ZERO,
            53_000,
            U256::from(1),
            Bytes::new(),
        );
        let mut envelope = FeeDelegatedLegacyTx::default();
        envelope.adopt_inner(&unsigned);

        assert_eq!(envelope.raw_signature_values(), SignatureValues::UNSET);
        assert_eq!(envelope.to(), None);
    }

    #[test]
    fn test_set_sender_signature_leaves_payer_triple() {
        let mut envelope = FeeDelegatedLegacyTx::new(signed_sender_tx());
        envelope.set_payer_signature(U256::from(28), U256::from(0xCC), U256::from(0xDD));

        envelope.set_sender_signature(Some(1), U256::from(37), U256::from(1), U256::from(2));

        assert_eq!(
            envelope.raw_signature_values(),
            SignatureValues::new(U256::from(37), U256::from(1), U256::from(2))
        );
        assert_eq!(envelope.chain_id(), Some(1));
        assert_eq!(
            envelope.raw_fee_payer_signature_values(),
            SignatureValues::new(U256::from(28), U256::from(0xCC), U256::from(0xDD))
        );
    }

    #[test]
    fn test_tx_type_differs_from_inner() {
        let envelope = FeeDelegatedLegacyTx::new(signed_sender_tx());
        assert_eq!(envelope.tx_type(), tx_type::FEE_DELEGATED_LEGACY);
        assert_ne!(envelope.tx_type(), envelope.inner().tx_type());
    }

    #[test]
    fn test_deep_copy_keeps_absent_max_fee_limit() {
        let envelope = FeeDelegatedLegacyTx::new(signed_sender_tx());
        let copy = envelope.deep_copy();
        assert_eq!(copy.max_fee_limit(), None);
        assert_eq!(copy.fee_payer(), None);
        assert_eq!(copy.raw_fee_payer_signature_values(), SignatureValues::zero());
    }
}
