use alloy_primitives::B256;
use anyhow::{anyhow, ensure};
use ream_consensus_misc::{
    constants::beacon::{SHUFFLE_ROUND_COUNT, SLOTS_PER_EPOCH},
    misc::{compute_committee_count_per_slot, shuffle_list, try_compute_end_slot_at_epoch},
};

/// The committee a validator attests in during an epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitteeAssignment {
    /// Index of the committee within ``attester_slot``.
    pub committee_index: u64,
    /// Members of the committee, in committee order.
    pub committee: Vec<u64>,
    pub attester_slot: u64,
}

/// Every beacon committee of one epoch, computed from a single shuffle of the active validator
/// set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochShuffling {
    epoch: u64,
    start_slot: u64,
    committees_per_slot: u64,
    shuffling: Vec<u64>,
}

impl EpochShuffling {
    pub fn new(epoch: u64, active_validator_indices: Vec<u64>, seed: B256) -> anyhow::Result<Self> {
        let end_slot = try_compute_end_slot_at_epoch(epoch)
            .ok_or_else(|| anyhow!("Slots of epoch {epoch} do not fit in a u64"))?;
        let committees_per_slot =
            compute_committee_count_per_slot(active_validator_indices.len() as u64);
        let shuffling = if active_validator_indices.is_empty() {
            active_validator_indices
        } else {
            shuffle_list(active_validator_indices, SHUFFLE_ROUND_COUNT, seed, false)?
        };

        Ok(Self {
            epoch,
            start_slot: end_slot - (SLOTS_PER_EPOCH - 1),
            committees_per_slot,
            shuffling,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn committees_per_slot(&self) -> u64 {
        self.committees_per_slot
    }

    pub fn active_validator_count(&self) -> u64 {
        self.shuffling.len() as u64
    }

    /// Total number of committees in the epoch.
    pub fn committee_count(&self) -> u64 {
        self.committees_per_slot * SLOTS_PER_EPOCH
    }

    /// Return the members of committee ``committee_index`` at ``slot``.
    pub fn committee(&self, slot: u64, committee_index: u64) -> anyhow::Result<&[u64]> {
        let start_slot = self.start_slot;
        ensure!(
            (start_slot..=start_slot + (SLOTS_PER_EPOCH - 1)).contains(&slot),
            "Slot {slot} is outside of epoch {}",
            self.epoch
        );
        ensure!(
            committee_index < self.committees_per_slot,
            "Committee index {committee_index} out of range, slot has {} committees",
            self.committees_per_slot
        );
        Ok(self.committee_at((slot - start_slot) * self.committees_per_slot + committee_index))
    }

    /// Iterate over `(slot, committee_index, members)` for every committee of the epoch.
    pub fn committees(&self) -> impl Iterator<Item = (u64, u64, &[u64])> {
        let start_slot = self.start_slot;
        (0..self.committee_count()).map(move |index_in_epoch| {
            (
                start_slot + index_in_epoch / self.committees_per_slot,
                index_in_epoch % self.committees_per_slot,
                self.committee_at(index_in_epoch),
            )
        })
    }

    fn committee_at(&self, index_in_epoch: u64) -> &[u64] {
        let count = self.committee_count();
        let length = self.shuffling.len() as u64;
        let start = (length * index_in_epoch / count) as usize;
        let end = (length * (index_in_epoch + 1) / count) as usize;
        &self.shuffling[start..end]
    }
}
