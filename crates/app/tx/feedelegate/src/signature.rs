//! Raw `(v, r, s)` signature triples.

use alloy_primitives::U256;

/// The three scalar components of a secp256k1 signature as carried by a
/// transaction.
///
/// Components are absent until a signer sets them. Absence is kept distinct
/// from zero so the encoding layer can tell an unsigned transaction from one
/// carrying a zero signature; [`SignatureValues::normalized`] collapses the
/// two when a copy is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SignatureValues {
    pub v: Option<U256>,
    pub r: Option<U256>,
    pub s: Option<U256>,
}

impl SignatureValues {
    /// A triple with no component set.
    pub const UNSET: Self = Self {
        v: None,
        r: None,
        s: None,
    };

    /// A triple with every component set.
    pub const fn new(v: U256, r: U256, s: U256) -> Self {
        Self {
            v: Some(v),
            r: Some(r),
            s: Some(s),
        }
    }

    /// The all-zero triple with every component present.
    pub const fn zero() -> Self {
        Self::new(U256::ZERO, U256::ZERO, U256::ZERO)
    }

    /// Returns `true` when every component is present.
    pub fn is_set(&self) -> bool {
        self.v.is_some() && self.r.is_some() && self.s.is_some()
    }

    /// Copies the triple, replacing each absent component with zero.
    pub fn normalized(&self) -> Self {
        let (v, r, s) = self.components();
        Self::new(v, r, s)
    }

    /// Returns the components, reading absent ones as zero.
    pub fn components(&self) -> (U256, U256, U256) {
        (
            self.v.unwrap_or(U256::ZERO),
            self.r.unwrap_or(U256::ZERO),
            self.s.unwrap_or(U256::ZERO),
        )
    }
}

impl From<(U256, U256, U256)> for SignatureValues {
    fn from((v, r, s): (U256, U256, U256)) -> Self {
        Self::new(v, r, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_not_zero() {
        assert_ne!(SignatureValues::UNSET, SignatureValues::zero());
        assert!(!SignatureValues::UNSET.is_set());
        assert!(SignatureValues::zero().is_set());
    }

    #[test]
    fn test_normalized_fills_absent_components() {
        let partial = SignatureValues {
            v: Some(U256::from(27)),
            r: None,
            s: Some(U256::from(0xBB)),
        };

        let normalized = partial.normalized();
        assert!(normalized.is_set());
        assert_eq!(
            normalized,
            SignatureValues::new(U256::from(27), U256::ZERO, U256::from(0xBB))
        );
        // The source keeps its absent component.
        assert_eq!(partial.r, None);
    }

    #[test]
    fn test_components_read_absent_as_zero() {
        assert_eq!(
            SignatureValues::UNSET.components(),
            (U256::ZERO, U256::ZERO, U256::ZERO)
        );
    }
}
