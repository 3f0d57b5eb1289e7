use std::sync::Arc;

use alloy_primitives::{B256, aliases::B32};
use anyhow::{anyhow, ensure};
use ethereum_hashing::hash_fixed;
use hashbrown::{HashMap, HashSet};
use ream_bls::PubKey;
use ream_consensus_misc::{
    constants::beacon::{
        DOMAIN_BEACON_ATTESTER, EPOCHS_PER_HISTORICAL_VECTOR, GENESIS_SLOT, MIN_SEED_LOOKAHEAD,
        SLOTS_PER_EPOCH, SLOTS_PER_HISTORICAL_ROOT,
    },
    misc::{compute_committee, compute_committee_count_per_slot, compute_epoch_at_slot},
};
use serde::{Deserialize, Serialize};

use crate::{
    committee::{CommitteeAssignment, EpochShuffling},
    validator::Validator,
};

/// The parts of a beacon state that committee shuffling and duty lookups read.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BeaconState {
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,

    /// Root of the block this state was produced from.
    pub latest_block_root: B256,
    pub block_roots: Vec<B256>,
    /// Never written by empty slot processing, so snapshots of one chain share it.
    pub randao_mixes: Arc<Vec<B256>>,

    pub validators: Vec<Validator>,
}

impl BeaconState {
    /// Return the current epoch.
    pub fn get_current_epoch(&self) -> u64 {
        compute_epoch_at_slot(self.slot)
    }

    pub fn get_next_epoch(&self) -> u64 {
        self.get_current_epoch().saturating_add(1)
    }

    /// Return the block root at a recent ``slot``.
    pub fn get_block_root_at_slot(&self, slot: u64) -> anyhow::Result<B256> {
        ensure!(
            slot < self.slot && self.slot <= slot.saturating_add(SLOTS_PER_HISTORICAL_ROOT),
            "slot {slot} was outside of block_roots range for state at slot {}",
            self.slot
        );
        self.block_roots
            .get((slot % SLOTS_PER_HISTORICAL_ROOT) as usize)
            .copied()
            .ok_or_else(|| anyhow!("block_roots has no entry for slot {slot}"))
    }

    /// Return the randao mix at a recent ``epoch``.
    pub fn get_randao_mix(&self, epoch: u64) -> anyhow::Result<B256> {
        self.randao_mixes
            .get((epoch % EPOCHS_PER_HISTORICAL_VECTOR) as usize)
            .copied()
            .ok_or_else(|| anyhow!("randao_mixes has no entry for epoch {epoch}"))
    }

    /// Return the sequence of active validator indices at ``epoch``.
    pub fn get_active_validator_indices(&self, epoch: u64) -> Vec<u64> {
        self.validators
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_active_validator(epoch).then_some(i as u64))
            .collect()
    }

    /// Return the seed at ``epoch``.
    pub fn get_seed(&self, epoch: u64, domain_type: B32) -> anyhow::Result<B256> {
        // epoch + EPOCHS_PER_HISTORICAL_VECTOR - MIN_SEED_LOOKAHEAD - 1, reduced first so far
        // future epochs cannot overflow
        let mix = self.get_randao_mix(
            epoch % EPOCHS_PER_HISTORICAL_VECTOR + EPOCHS_PER_HISTORICAL_VECTOR
                - MIN_SEED_LOOKAHEAD
                - 1,
        )?;
        let epoch_with_index =
            [domain_type.as_slice(), &epoch.to_le_bytes(), mix.as_slice()].concat();
        Ok(B256::from(hash_fixed(&epoch_with_index)))
    }

    /// Return the number of committees in each slot for the given ``epoch``.
    pub fn get_committee_count_per_slot(&self, epoch: u64) -> u64 {
        compute_committee_count_per_slot(self.get_active_validator_indices(epoch).len() as u64)
    }

    /// Return the beacon committee at ``slot`` for ``index``.
    pub fn get_beacon_committee(&self, slot: u64, index: u64) -> anyhow::Result<Vec<u64>> {
        let epoch = compute_epoch_at_slot(slot);
        let committees_per_slot = self.get_committee_count_per_slot(epoch);
        compute_committee(
            &self.get_active_validator_indices(epoch),
            self.get_seed(epoch, DOMAIN_BEACON_ATTESTER)?,
            (slot % SLOTS_PER_EPOCH) * committees_per_slot + index,
            committees_per_slot * SLOTS_PER_EPOCH,
        )
    }

    /// Return all beacon committees of ``epoch``.
    ///
    /// Committees can be derived up to the next epoch: its seed comes from a randao mix that is
    /// already fixed, while anything further out depends on blocks that do not exist yet.
    pub fn get_epoch_shuffling(&self, epoch: u64) -> anyhow::Result<EpochShuffling> {
        ensure!(
            epoch <= self.get_next_epoch(),
            "Epoch {epoch} is beyond the next epoch {} of the state at slot {}",
            self.get_next_epoch(),
            self.slot
        );
        EpochShuffling::new(
            epoch,
            self.get_active_validator_indices(epoch),
            self.get_seed(epoch, DOMAIN_BEACON_ATTESTER)?,
        )
    }

    /// Return the committee assignment in ``epoch`` of each of ``validator_indices``.
    ///
    /// Validators that are not active in ``epoch`` have no entry. The shuffling is computed once
    /// for the whole batch.
    pub fn get_committee_assignments(
        &self,
        epoch: u64,
        validator_indices: &[u64],
    ) -> anyhow::Result<HashMap<u64, CommitteeAssignment>> {
        let requested: HashSet<u64> = validator_indices.iter().copied().collect();
        let shuffling = self.get_epoch_shuffling(epoch)?;

        let mut assignments = HashMap::with_capacity(requested.len());
        for (slot, committee_index, committee) in shuffling.committees() {
            for validator_index in committee {
                if requested.contains(validator_index) {
                    assignments.insert(
                        *validator_index,
                        CommitteeAssignment {
                            committee_index,
                            committee: committee.to_vec(),
                            attester_slot: slot,
                        },
                    );
                }
            }
        }
        Ok(assignments)
    }

    /// Return the public key of the validator at ``index``, if the registry has one.
    pub fn get_validator_pubkey(&self, index: u64) -> Option<&PubKey> {
        self.validators
            .get(index as usize)
            .map(|validator| &validator.pubkey)
    }

    /// Return the last slot whose block decides the attester shuffling of ``epoch``.
    pub fn attester_shuffling_decision_slot(epoch: u64) -> u64 {
        if epoch <= 1 {
            GENESIS_SLOT
        } else {
            (epoch - 1).saturating_mul(SLOTS_PER_EPOCH) - 1
        }
    }

    /// Return the root of the block that decided the attester shuffling of ``epoch``.
    pub fn attester_shuffling_decision_root(&self, epoch: u64) -> anyhow::Result<B256> {
        let decision_slot = Self::attester_shuffling_decision_slot(epoch);
        if decision_slot == self.slot {
            return Ok(self.latest_block_root);
        }
        self.get_block_root_at_slot(decision_slot)
    }

    /// Advance the state through empty slots up to ``target_slot``.
    ///
    /// Each skipped slot records the current head root in ``block_roots``, the same way slot
    /// processing does when no block is applied.
    pub fn process_empty_slots(&mut self, target_slot: u64) -> anyhow::Result<()> {
        ensure!(
            target_slot > self.slot,
            "Target slot {target_slot} must be after the state slot {}",
            self.slot
        );
        while self.slot < target_slot {
            let index = (self.slot % SLOTS_PER_HISTORICAL_ROOT) as usize;
            let root = self
                .block_roots
                .get_mut(index)
                .ok_or_else(|| anyhow!("block_roots has no entry for slot {}", self.slot))?;
            *root = self.latest_block_root;
            self.slot += 1;
        }
        Ok(())
    }

    /// Record a block with ``block_root`` as applied at the current slot.
    pub fn apply_block_root(&mut self, block_root: B256) {
        self.latest_block_root = block_root;
    }
}
