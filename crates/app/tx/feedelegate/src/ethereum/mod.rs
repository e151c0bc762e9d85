//! Ethereum standard transaction types.
//!
//! Only the legacy shape is modelled here. It is the inner transaction the
//! fee-delegated envelope wraps, and a standalone variant in its own right.

mod legacy;

pub use legacy::LegacyTx;
