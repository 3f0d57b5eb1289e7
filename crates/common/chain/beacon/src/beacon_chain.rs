use std::sync::Arc;

use ream_consensus_beacon::beacon_state::BeaconState;
use ream_consensus_misc::{
    constants::beacon::{SECONDS_PER_SLOT, SLOTS_PER_EPOCH, SLOTS_PER_HISTORICAL_ROOT},
    misc::compute_start_slot_at_epoch,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::state_store::InMemoryStateStore;

/// Epochs of epoch start states kept in the store behind the head.
pub const STATE_RETENTION_EPOCHS: u64 = SLOTS_PER_HISTORICAL_ROOT / SLOTS_PER_EPOCH;

/// BeaconChain owns the head state and publishes a snapshot at every epoch boundary.
pub struct BeaconChain {
    head: Mutex<BeaconState>,
    state_store: Arc<InMemoryStateStore>,
}

impl BeaconChain {
    /// Creates a new instance of `BeaconChain` starting from ``genesis_state``.
    pub fn new(genesis_state: BeaconState, state_store: Arc<InMemoryStateStore>) -> Self {
        state_store.insert(genesis_state.clone());
        Self {
            head: Mutex::new(genesis_state),
            state_store,
        }
    }

    pub fn state_store(&self) -> Arc<InMemoryStateStore> {
        self.state_store.clone()
    }

    pub async fn head_slot(&self) -> u64 {
        self.head.lock().await.slot
    }

    /// Advance the head to the slot of unix ``time``. Times before genesis are ignored.
    pub async fn process_tick(&self, time: u64) -> anyhow::Result<()> {
        let genesis_time = self.head.lock().await.genesis_time;
        if time < genesis_time {
            return Ok(());
        }
        self.process_slots((time - genesis_time) / SECONDS_PER_SLOT)
            .await
    }

    /// Advance the head through empty slots up to ``target_slot``, storing the state at every
    /// epoch start on the way.
    pub async fn process_slots(&self, target_slot: u64) -> anyhow::Result<()> {
        let mut head = self.head.lock().await;
        if target_slot <= head.slot {
            return Ok(());
        }

        while head.slot < target_slot {
            let next_epoch_start = compute_start_slot_at_epoch(head.get_next_epoch());
            head.process_empty_slots(next_epoch_start.min(target_slot))?;
            if head.slot % SLOTS_PER_EPOCH == 0 {
                debug!(slot = head.slot, "Storing epoch start state");
                self.state_store.insert(head.clone());
            }
        }

        let retained_from = compute_start_slot_at_epoch(
            head.get_current_epoch()
                .saturating_sub(STATE_RETENTION_EPOCHS),
        );
        self.state_store.prune_before(retained_from);

        info!(
            slot = head.slot,
            epoch = head.get_current_epoch(),
            "Head advanced"
        );
        Ok(())
    }
}
