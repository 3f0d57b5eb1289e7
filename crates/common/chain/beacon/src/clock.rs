use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::anyhow;
use ream_consensus_misc::constants::beacon::{GENESIS_SLOT, SECONDS_PER_SLOT};
use ream_duties::traits::SlotClock;

/// Slot clock driven by the system wall clock.
#[derive(Debug, Clone)]
pub struct SystemSlotClock {
    genesis_time: u64,
    seconds_per_slot: u64,
}

impl SystemSlotClock {
    pub fn new(genesis_time: u64) -> Self {
        Self {
            genesis_time,
            seconds_per_slot: SECONDS_PER_SLOT,
        }
    }

    pub fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    /// Return the slot at unix ``time``. Times before genesis map to the genesis slot.
    pub fn slot_at_time(&self, time: u64) -> u64 {
        GENESIS_SLOT + time.saturating_sub(self.genesis_time) / self.seconds_per_slot
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::from_secs(self.seconds_per_slot)
    }

    /// Return the time from ``now`` (since the unix epoch) until the next slot starts, or until
    /// genesis if it has not happened yet.
    pub fn duration_to_next_slot(&self, now: Duration) -> Duration {
        let genesis = Duration::from_secs(self.genesis_time);
        if now < genesis {
            return genesis - now;
        }
        let slot_millis = self.slot_duration().as_millis();
        let into_slot = (now - genesis).as_millis() % slot_millis;
        Duration::from_millis((slot_millis - into_slot) as u64)
    }
}

impl SlotClock for SystemSlotClock {
    fn current_slot(&self) -> anyhow::Result<u64> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| anyhow!("System time is before the unix epoch: {err}"))?
            .as_secs();
        Ok(self.slot_at_time(now))
    }
}

/// Slot clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualSlotClock {
    slot: AtomicU64,
}

impl ManualSlotClock {
    pub fn new(slot: u64) -> Self {
        Self {
            slot: AtomicU64::new(slot),
        }
    }

    pub fn set_slot(&self, slot: u64) {
        self.slot.store(slot, Ordering::Release);
    }
}

impl SlotClock for ManualSlotClock {
    fn current_slot(&self) -> anyhow::Result<u64> {
        Ok(self.slot.load(Ordering::Acquire))
    }
}
