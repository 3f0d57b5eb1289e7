use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use ream_duties::traits::{OptimisticModeFetcher, SyncChecker};

/// Sync and optimistic flags of the local node.
#[derive(Debug, Default)]
pub struct NodeStatus {
    syncing: AtomicBool,
    optimistic: AtomicBool,
}

impl NodeStatus {
    pub fn new(syncing: bool, optimistic: bool) -> Self {
        Self {
            syncing: AtomicBool::new(syncing),
            optimistic: AtomicBool::new(optimistic),
        }
    }

    pub fn set_syncing(&self, syncing: bool) {
        self.syncing.store(syncing, Ordering::Release);
    }

    pub fn set_optimistic(&self, optimistic: bool) {
        self.optimistic.store(optimistic, Ordering::Release);
    }
}

impl SyncChecker for NodeStatus {
    fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }
}

#[async_trait]
impl OptimisticModeFetcher for NodeStatus {
    async fn is_optimistic(&self) -> anyhow::Result<bool> {
        Ok(self.optimistic.load(Ordering::Acquire))
    }
}
