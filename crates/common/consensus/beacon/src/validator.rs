use ream_bls::PubKey;
use ream_consensus_misc::constants::beacon::FAR_FUTURE_EPOCH;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct Validator {
    pub pubkey: PubKey,

    /// Balance at stake
    #[serde(with = "serde_utils::quoted_u64")]
    pub effective_balance: u64,
    pub slashed: bool,

    /// When criteria for activation were met
    #[serde(with = "serde_utils::quoted_u64")]
    pub activation_eligibility_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub activation_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub exit_epoch: u64,

    /// When validator can withdraw funds
    #[serde(with = "serde_utils::quoted_u64")]
    pub withdrawable_epoch: u64,
}

impl Validator {
    /// A validator that is active from ``activation_epoch`` onwards and has not exited.
    pub fn new(pubkey: PubKey, effective_balance: u64, activation_epoch: u64) -> Self {
        Self {
            pubkey,
            effective_balance,
            slashed: false,
            activation_eligibility_epoch: activation_epoch,
            activation_epoch,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        }
    }

    /// Check if ``validator`` is active.
    pub fn is_active_validator(&self, epoch: u64) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }
}
