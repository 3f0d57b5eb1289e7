use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use alloy_primitives::{B256, b256};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;
use ream_bls::PubKey;
use ream_consensus_beacon::{
    beacon_state::BeaconState,
    committee::CommitteeAssignment,
    genesis::{interop_genesis_state, interop_pubkey},
};

use crate::traits::{DutiesState, OptimisticModeFetcher, StateProvider, SyncChecker};

pub const GENESIS_ROOT: B256 =
    b256!("0x7e76880eb67bbdc86250aa578958e9d0675e64e714337855204fb5abaaf82c2b");

pub fn genesis_state(validator_count: u64) -> BeaconState {
    interop_genesis_state(validator_count, 0, B256::repeat_byte(0x42), GENESIS_ROOT)
}

/// State with hand-set answers and switchable failures.
#[derive(Default)]
pub struct MockState {
    pub pubkeys: HashMap<u64, PubKey>,
    pub assignments: HashMap<u64, CommitteeAssignment>,
    pub active_validator_count: u64,
    pub dependent_root: B256,
    pub fail_assignments: bool,
    pub fail_active_count: bool,
    pub fail_dependent_root: bool,
}

impl MockState {
    pub fn with_validators(validator_count: u64) -> Self {
        Self {
            pubkeys: (0..validator_count)
                .map(|index| (index, interop_pubkey(index)))
                .collect(),
            active_validator_count: validator_count,
            ..Default::default()
        }
    }
}

impl DutiesState for MockState {
    fn pubkey_at_index(&self, validator_index: u64) -> Option<PubKey> {
        self.pubkeys.get(&validator_index).cloned()
    }

    fn committee_assignments(
        &self,
        _epoch: u64,
        validator_indices: &[u64],
    ) -> anyhow::Result<HashMap<u64, CommitteeAssignment>> {
        if self.fail_assignments {
            bail!("shuffling unavailable");
        }
        Ok(validator_indices
            .iter()
            .filter_map(|index| {
                self.assignments
                    .get(index)
                    .map(|assignment| (*index, assignment.clone()))
            })
            .collect())
    }

    fn active_validator_count(&self, _epoch: u64) -> anyhow::Result<u64> {
        if self.fail_active_count {
            bail!("registry unavailable");
        }
        Ok(self.active_validator_count)
    }

    fn attestation_dependent_root(&self, _epoch: u64) -> anyhow::Result<B256> {
        if self.fail_dependent_root {
            bail!("block root pruned");
        }
        Ok(self.dependent_root)
    }
}

/// Serves states stored by slot and counts every fetch.
pub struct MockStateProvider<S> {
    states: RwLock<HashMap<u64, Arc<S>>>,
    fetches: AtomicUsize,
    fail: AtomicBool,
}

impl<S> Default for MockStateProvider<S> {
    fn default() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }
}

impl<S> MockStateProvider<S> {
    pub fn insert(&self, slot: u64, state: S) {
        self.states.write().insert(slot, Arc::new(state));
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: Send + Sync + 'static> StateProvider<S> for MockStateProvider<S> {
    async fn state_by_slot(&self, slot: u64) -> anyhow::Result<Option<Arc<S>>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("database closed"));
        }
        Ok(self.states.read().get(&slot).cloned())
    }
}

#[derive(Default)]
pub struct MockNodeStatus {
    pub syncing: AtomicBool,
    pub optimistic: AtomicBool,
    pub fail_optimistic: AtomicBool,
}

impl SyncChecker for MockNodeStatus {
    fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OptimisticModeFetcher for MockNodeStatus {
    async fn is_optimistic(&self) -> anyhow::Result<bool> {
        if self.fail_optimistic.load(Ordering::SeqCst) {
            bail!("fork choice unavailable");
        }
        Ok(self.optimistic.load(Ordering::SeqCst))
    }
}
