//! Core traits for typed transactions.

use alloy_eips::eip2930::AccessList;
use alloy_primitives::{Address, U256};

use crate::signature::SignatureValues;

/// Core trait that all transaction shapes implement.
///
/// This is the accessor contract generic code (signing, hashing, fee
/// computation, pool admission) reads through, so it never needs to match on
/// the concrete shape.
pub trait TypedTransaction: Send + Sync {
    /// Returns the EIP-2718 transaction type byte.
    ///
    /// - `0x00-0x7f`: Reserved for Ethereum standard types
    /// - Fee-delegated shapes use their own tags in the same range
    fn tx_type(&self) -> u8;

    /// Returns the chain ID for replay protection (EIP-155).
    ///
    /// Returns `None` for legacy transactions without EIP-155.
    fn chain_id(&self) -> Option<u64>;

    /// Returns the access list. Empty for shapes that predate EIP-2930.
    fn access_list(&self) -> AccessList;

    /// Returns the input data for this transaction.
    fn input(&self) -> &[u8];

    /// Returns the gas limit for this transaction.
    fn gas_limit(&self) -> u64;

    /// Returns the max fee per gas.
    fn gas_fee_cap(&self) -> U256;

    /// Returns the max priority fee per gas.
    fn gas_tip_cap(&self) -> U256;

    /// Returns the gas price.
    fn gas_price(&self) -> U256;

    /// Returns the value (in wei) being transferred.
    fn value(&self) -> U256;

    /// Returns the nonce for this transaction.
    fn nonce(&self) -> u64;

    /// Returns the recipient address, if any.
    ///
    /// Returns `None` for contract creation transactions.
    fn to(&self) -> Option<Address>;

    /// Returns the sender's signature triple.
    fn raw_signature_values(&self) -> SignatureValues;

    /// Stores the triple produced by signing this shape's signing hash.
    ///
    /// Which party's triple that is depends on the shape: the sender for
    /// plain transactions, the fee payer for fee-delegated envelopes.
    fn set_signature_values(&mut self, chain_id: Option<u64>, v: U256, r: U256, s: U256);

    /// Returns `gas_limit * gas_price`, saturating at `U256::MAX`.
    fn fee(&self) -> U256 {
        self.gas_price().saturating_mul(U256::from(self.gas_limit()))
    }
}

/// Capabilities of transaction shapes whose fee is paid by a fee payer.
pub trait FeeDelegatedTransaction: TypedTransaction {
    /// Returns the address expected to provide the payer signature.
    fn fee_payer(&self) -> Option<Address>;

    /// Returns the highest fee the payer authorizes. `None` means unbounded.
    fn max_fee_limit(&self) -> Option<U256>;

    /// Returns the fee payer's signature triple as stored.
    fn raw_fee_payer_signature_values(&self) -> SignatureValues;

    /// Replaces the fee payer's signature triple.
    fn set_payer_signature(&mut self, v: U256, r: U256, s: U256);
}
