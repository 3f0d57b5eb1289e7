//! Collaborators the duty resolver reads chain information from.

use std::sync::Arc;

use alloy_primitives::B256;
use async_trait::async_trait;
use hashbrown::HashMap;
use ream_bls::PubKey;
use ream_consensus_beacon::committee::CommitteeAssignment;

/// Source of the node's current slot, as seen by its wall clock.
pub trait SlotClock: Send + Sync {
    fn current_slot(&self) -> anyhow::Result<u64>;
}

pub trait SyncChecker: Send + Sync {
    /// `true` while the node is still catching up with the chain.
    fn is_syncing(&self) -> bool;
}

#[async_trait]
pub trait OptimisticModeFetcher: Send + Sync {
    /// `true` if the head has not had its execution payload verified yet.
    async fn is_optimistic(&self) -> anyhow::Result<bool>;
}

/// Hands out immutable state snapshots by slot.
#[async_trait]
pub trait StateProvider<S>: Send + Sync {
    /// Return the state at exactly ``slot``, or `None` if the provider does not have it.
    async fn state_by_slot(&self, slot: u64) -> anyhow::Result<Option<Arc<S>>>;
}

/// Read access to a state snapshot for building attester duties.
pub trait DutiesState: Send + Sync {
    /// Public key of the validator at ``validator_index``, `None` if the index is unknown.
    fn pubkey_at_index(&self, validator_index: u64) -> Option<PubKey>;

    /// Committee assignments in ``epoch`` of ``validator_indices``, computed in one pass.
    /// Validators without a duty in ``epoch`` are absent from the map.
    fn committee_assignments(
        &self,
        epoch: u64,
        validator_indices: &[u64],
    ) -> anyhow::Result<HashMap<u64, CommitteeAssignment>>;

    fn active_validator_count(&self, epoch: u64) -> anyhow::Result<u64>;

    /// Root of the block that fixed the attester shuffling of ``epoch``.
    fn attestation_dependent_root(&self, epoch: u64) -> anyhow::Result<B256>;
}
