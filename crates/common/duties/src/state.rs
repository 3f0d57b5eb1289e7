use alloy_primitives::B256;
use hashbrown::HashMap;
use ream_bls::PubKey;
use ream_consensus_beacon::{beacon_state::BeaconState, committee::CommitteeAssignment};

use crate::traits::DutiesState;

impl DutiesState for BeaconState {
    fn pubkey_at_index(&self, validator_index: u64) -> Option<PubKey> {
        self.get_validator_pubkey(validator_index).cloned()
    }

    fn committee_assignments(
        &self,
        epoch: u64,
        validator_indices: &[u64],
    ) -> anyhow::Result<HashMap<u64, CommitteeAssignment>> {
        self.get_committee_assignments(epoch, validator_indices)
    }

    fn active_validator_count(&self, epoch: u64) -> anyhow::Result<u64> {
        Ok(self.get_active_validator_indices(epoch).len() as u64)
    }

    fn attestation_dependent_root(&self, epoch: u64) -> anyhow::Result<B256> {
        self.attester_shuffling_decision_root(epoch)
    }
}
