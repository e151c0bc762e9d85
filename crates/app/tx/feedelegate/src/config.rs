//! Signing configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// How raw signatures are laid out in transactions.
///
/// The same layout applies to the sender and the fee payer triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignerConfig {
    /// Chain id folded into `v` when `eip155` is set. Must be > 0 then.
    pub chain_id: u64,

    /// Use EIP-155 replay protection. Default: true.
    #[serde(default = "SignerConfig::default_eip155")]
    pub eip155: bool,
}

impl SignerConfig {
    const fn default_eip155() -> bool {
        true
    }

    /// Validate the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.eip155 && self.chain_id == 0 {
            errors.push(
                "signer.chain_id must be greater than 0 when eip155 is enabled".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed(errors))
        }
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            eip155: Self::default_eip155(),
        }
    }
}
