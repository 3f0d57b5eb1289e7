use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;
use ream_consensus_beacon::beacon_state::BeaconState;
use ream_duties::traits::StateProvider;

/// Epoch start states kept in memory, keyed by slot.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    states: RwLock<HashMap<u64, Arc<BeaconState>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store ``state`` under its own slot, replacing any state already there.
    pub fn insert(&self, state: BeaconState) {
        self.states.write().insert(state.slot, Arc::new(state));
    }

    pub fn get(&self, slot: u64) -> Option<Arc<BeaconState>> {
        self.states.read().get(&slot).cloned()
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    /// Drop every state older than ``slot``.
    pub fn prune_before(&self, slot: u64) {
        self.states.write().retain(|state_slot, _| *state_slot >= slot);
    }
}

#[async_trait]
impl StateProvider<BeaconState> for InMemoryStateStore {
    async fn state_by_slot(&self, slot: u64) -> anyhow::Result<Option<Arc<BeaconState>>> {
        Ok(self.get(slot))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use ream_consensus_beacon::genesis::interop_genesis_state;

    use super::*;

    #[tokio::test]
    async fn test_states_are_served_by_exact_slot() {
        let store = InMemoryStateStore::new();
        let mut state = interop_genesis_state(8, 0, B256::ZERO, B256::ZERO);
        store.insert(state.clone());
        state.process_empty_slots(32).expect("slots advance");
        store.insert(state);

        assert_eq!(store.len(), 2);
        assert_eq!(
            store
                .state_by_slot(32)
                .await
                .expect("store reads")
                .map(|state| state.slot),
            Some(32)
        );
        assert!(store.state_by_slot(31).await.expect("store reads").is_none());

        store.prune_before(32);
        assert!(store.get(0).is_none());
        assert!(store.get(32).is_some());
    }
}
