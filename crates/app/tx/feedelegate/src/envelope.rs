//! Transaction envelope over every supported transaction shape.

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, U256};

use crate::error::{TxError, TxResult};
use crate::ethereum::LegacyTx;
use crate::fee_delegated::FeeDelegatedLegacyTx;
use crate::signature::SignatureValues;
use crate::signer::TxSigner;
use crate::traits::{FeeDelegatedTransaction, TypedTransaction};

/// Transaction type constants per EIP-2718.
pub mod tx_type {
    /// Legacy transaction (pre-EIP-2718).
    pub const LEGACY: u8 = 0x00;
    /// EIP-2930 access list transaction.
    pub const EIP2930: u8 = 0x01;
    /// EIP-1559 fee market transaction.
    pub const EIP1559: u8 = 0x02;
    /// EIP-4844 blob transaction.
    pub const EIP4844: u8 = 0x03;
    /// Legacy transaction wrapped with a fee payer.
    pub const FEE_DELEGATED_LEGACY: u8 = 0x16;
}

/// Transaction shapes this crate models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    Legacy = tx_type::LEGACY,
    FeeDelegatedLegacy = tx_type::FEE_DELEGATED_LEGACY,
}

impl TxType {
    /// Returns `true` for shapes whose fee is paid by a fee payer.
    pub fn is_fee_delegated(self) -> bool {
        matches!(self, TxType::FeeDelegatedLegacy)
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(ty: u8) -> TxResult<Self> {
        match ty {
            tx_type::LEGACY => Ok(TxType::Legacy),
            tx_type::FEE_DELEGATED_LEGACY => Ok(TxType::FeeDelegatedLegacy),
            // EIP-2930, EIP-1559 and EIP-4844 shapes are not modelled here
            ty => Err(TxError::UnsupportedTxType(ty)),
        }
    }
}

impl From<TxType> for u8 {
    fn from(ty: TxType) -> Self {
        ty as u8
    }
}

/// Unified transaction envelope that can hold any supported transaction type.
///
/// The variant set is closed; [`TxEnvelope::tx_type`] is the discriminator
/// the encoding layer uses to pick a decode path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxEnvelope {
    /// Legacy transaction (type 0x00 or untyped).
    Legacy(LegacyTx),
    /// Fee-delegated legacy transaction (type 0x16).
    FeeDelegatedLegacy(FeeDelegatedLegacyTx),
}

impl TxEnvelope {
    /// Returns the transaction type byte.
    pub fn tx_type(&self) -> u8 {
        self.kind().into()
    }

    /// Returns the transaction shape.
    pub fn kind(&self) -> TxType {
        match self {
            TxEnvelope::Legacy(_) => TxType::Legacy,
            TxEnvelope::FeeDelegatedLegacy(_) => TxType::FeeDelegatedLegacy,
        }
    }

    /// Returns a storage-independent copy, normalizing absent signature
    /// components to zero.
    pub fn deep_copy(&self) -> Self {
        match self {
            TxEnvelope::Legacy(tx) => TxEnvelope::Legacy(tx.deep_copy()),
            TxEnvelope::FeeDelegatedLegacy(tx) => TxEnvelope::FeeDelegatedLegacy(tx.deep_copy()),
        }
    }

    pub fn is_fee_delegated(&self) -> bool {
        self.kind().is_fee_delegated()
    }

    /// Returns the fee payer capabilities, if this shape has them.
    pub fn as_fee_delegated(&self) -> Option<&dyn FeeDelegatedTransaction> {
        match self {
            TxEnvelope::Legacy(_) => None,
            TxEnvelope::FeeDelegatedLegacy(tx) => Some(tx),
        }
    }

    fn as_fee_delegated_mut(&mut self) -> Option<&mut dyn FeeDelegatedTransaction> {
        match self {
            TxEnvelope::Legacy(_) => None,
            TxEnvelope::FeeDelegatedLegacy(tx) => Some(tx),
        }
    }

    /// Returns the fee payer. `None` for plain shapes or when unset.
    pub fn fee_payer(&self) -> Option<Address> {
        self.as_fee_delegated().and_then(|tx| tx.fee_payer())
    }

    /// Returns the max fee limit. `None` for plain shapes or when unbounded.
    pub fn max_fee_limit(&self) -> Option<U256> {
        self.as_fee_delegated().and_then(|tx| tx.max_fee_limit())
    }

    /// Returns the fee payer's triple. `None` for plain shapes.
    pub fn raw_fee_payer_signature_values(&self) -> Option<SignatureValues> {
        self.as_fee_delegated().map(|tx| tx.raw_fee_payer_signature_values())
    }

    /// Store a sender signature laid out by `signer`.
    ///
    /// On a fee-delegated shape this signs the inner transaction and leaves
    /// the payer triple alone.
    pub fn with_sender_signature(mut self, signer: &dyn TxSigner, sig: &[u8]) -> TxResult<Self> {
        let (v, r, s) = signer.signature_values(sig)?.components();
        let chain_id = signer.chain_id();
        match &mut self {
            TxEnvelope::Legacy(tx) => tx.set_signature_values(chain_id, v, r, s),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.set_sender_signature(chain_id, v, r, s),
        }
        Ok(self)
    }

    /// Store a fee payer signature laid out by `signer`.
    ///
    /// Fails with [`TxError::NotFeeDelegated`] on plain shapes.
    pub fn with_fee_payer_signature(mut self, signer: &dyn TxSigner, sig: &[u8]) -> TxResult<Self> {
        let ty = self.tx_type();
        let (v, r, s) = signer.signature_values(sig)?.components();
        self.as_fee_delegated_mut()
            .ok_or(TxError::NotFeeDelegated(ty))?
            .set_payer_signature(v, r, s);
        Ok(self)
    }

    /// Total cost `gas_limit * gas_price + value`, whoever pays it.
    pub fn cost(&self) -> U256 {
        self.fee().saturating_add(self.value())
    }

    /// What the sender must cover: only the value when a fee payer is present.
    pub fn sender_cost(&self) -> U256 {
        if self.is_fee_delegated() {
            self.value()
        } else {
            self.cost()
        }
    }

    /// What the fee payer must cover. `None` for plain shapes.
    pub fn fee_payer_cost(&self) -> Option<U256> {
        self.is_fee_delegated().then(|| self.fee())
    }
}

impl TypedTransaction for TxEnvelope {
    fn tx_type(&self) -> u8 {
        TxEnvelope::tx_type(self)
    }

    fn chain_id(&self) -> Option<u64> {
        match self {
            TxEnvelope::Legacy(tx) => tx.chain_id(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.chain_id(),
        }
    }

    fn access_list(&self) -> AccessList {
        match self {
            TxEnvelope::Legacy(tx) => tx.access_list(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.access_list(),
        }
    }

    fn input(&self) -> &[u8] {
        match self {
            TxEnvelope::Legacy(tx) => tx.input(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.input(),
        }
    }

    fn gas_limit(&self) -> u64 {
        match self {
            TxEnvelope::Legacy(tx) => tx.gas_limit(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.gas_limit(),
        }
    }

    fn gas_fee_cap(&self) -> U256 {
        match self {
            TxEnvelope::Legacy(tx) => tx.gas_fee_cap(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.gas_fee_cap(),
        }
    }

    fn gas_tip_cap(&self) -> U256 {
        match self {
            TxEnvelope::Legacy(tx) => tx.gas_tip_cap(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.gas_tip_cap(),
        }
    }

    fn gas_price(&self) -> U256 {
        match self {
            TxEnvelope::Legacy(tx) => tx.gas_price(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.gas_price(),
        }
    }

    fn value(&self) -> U256 {
        match self {
            TxEnvelope::Legacy(tx) => tx.value(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.value(),
        }
    }

    fn nonce(&self) -> u64 {
        match self {
            TxEnvelope::Legacy(tx) => tx.nonce(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.nonce(),
        }
    }

    fn to(&self) -> Option<Address> {
        match self {
            TxEnvelope::Legacy(tx) => tx.to(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.to(),
        }
    }

    fn raw_signature_values(&self) -> SignatureValues {
        match self {
            TxEnvelope::Legacy(tx) => tx.raw_signature_values(),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.raw_signature_values(),
        }
    }

    fn set_signature_values(&mut self, chain_id: Option<u64>, v: U256, r: U256, s: U256) {
        match self {
            TxEnvelope::Legacy(tx) => tx.set_signature_values(chain_id, v, r, s),
            TxEnvelope::FeeDelegatedLegacy(tx) => tx.set_signature_values(chain_id, v, r, s),
        }
    }
}

impl From<LegacyTx> for TxEnvelope {
    fn from(tx: LegacyTx) -> Self {
        TxEnvelope::Legacy(tx)
    }
}

impl From<FeeDelegatedLegacyTx> for TxEnvelope {
    fn from(tx: FeeDelegatedLegacyTx) -> Self {
        TxEnvelope::FeeDelegatedLegacy(tx)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::signer::{Eip155Signer, HomesteadSigner, SIGNATURE_LENGTH};
    use alloy_primitives::{Bytes, TxKind};

    fn legacy() -> LegacyTx {
        LegacyTx::new(
            4,
            TxKind::Call(Address::repeat_byte(0x33)),
            U256::from(1000),
            21_000,
            U256::from(5),
            Bytes::new(),
        )
    }

    fn raw_sig(recovery_id: u8) -> [u8; SIGNATURE_LENGTH] {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[31] = 0x01;
        raw[63] = 0x02;
        raw[64] = recovery_id;
        raw
    }

    #[test]
    fn test_tx_type_parsing() {
        assert_eq!(TxType::try_from(0x00).unwrap(), TxType::Legacy);
        assert_eq!(
            TxType::try_from(tx_type::FEE_DELEGATED_LEGACY).unwrap(),
            TxType::FeeDelegatedLegacy
        );
        assert_eq!(
            TxType::try_from(tx_type::EIP1559).unwrap_err(),
            TxError::UnsupportedTxType(0x02)
        );
        assert_eq!(u8::from(TxType::FeeDelegatedLegacy), 0x16);
    }

    #[test]
    fn test_plain_shape_has_no_fee_payer_fields() {
        let tx = TxEnvelope::from(legacy());
        assert!(!tx.is_fee_delegated());
        assert_eq!(tx.fee_payer(), None);
        assert_eq!(tx.max_fee_limit(), None);
        assert_eq!(tx.raw_fee_payer_signature_values(), None);
        assert_eq!(tx.fee_payer_cost(), None);
    }

    #[test]
    fn test_fee_payer_signature_on_plain_shape_fails() {
        let tx = TxEnvelope::from(legacy());
        let err = tx.with_fee_payer_signature(&HomesteadSigner, &raw_sig(0)).unwrap_err();
        assert_eq!(err, TxError::NotFeeDelegated(tx_type::LEGACY));
    }

    #[test]
    fn test_signatures_land_on_distinct_triples() {
        let tx = TxEnvelope::from(
            FeeDelegatedLegacyTx::new(legacy()).with_fee_payer(Address::repeat_byte(0x44)),
        );
        let signer = Eip155Signer::new(1);

        let tx = tx.with_sender_signature(&signer, &raw_sig(0)).unwrap();
        let tx = tx.with_fee_payer_signature(&signer, &raw_sig(1)).unwrap();

        assert_eq!(
            tx.raw_signature_values(),
            SignatureValues::new(U256::from(37), U256::from(1), U256::from(2))
        );
        assert_eq!(
            tx.raw_fee_payer_signature_values(),
            Some(SignatureValues::new(U256::from(38), U256::from(1), U256::from(2)))
        );
        assert_eq!(tx.chain_id(), Some(1));
    }

    #[test]
    fn test_cost_split() {
        let plain = TxEnvelope::from(legacy());
        assert_eq!(plain.cost(), U256::from(21_000 * 5 + 1000));
        assert_eq!(plain.sender_cost(), plain.cost());

        let delegated = TxEnvelope::from(FeeDelegatedLegacyTx::new(legacy()));
        assert_eq!(delegated.cost(), plain.cost());
        assert_eq!(delegated.sender_cost(), U256::from(1000));
        assert_eq!(delegated.fee_payer_cost(), Some(U256::from(21_000 * 5)));
    }

    #[test]
    fn test_cost_saturates() {
        let mut tx = legacy();
        tx.gas_price = U256::MAX;
        let tx = TxEnvelope::from(tx);
        assert_eq!(tx.cost(), U256::MAX);
    }

    #[test]
    fn test_deep_copy_keeps_variant() {
        let tx = TxEnvelope::from(FeeDelegatedLegacyTx::new(legacy()));
        let copy = tx.deep_copy();
        assert_eq!(copy.kind(), TxType::FeeDelegatedLegacy);
        assert_eq!(copy.raw_fee_payer_signature_values(), Some(SignatureValues::zero()));
        assert_eq!(copy.raw_signature_values(), SignatureValues::zero());
    }
}
