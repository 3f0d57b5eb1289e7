use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use alloy_primitives::keccak256;
use anyhow::anyhow;
use clap::Parser;
use ream_chain_beacon::{
    beacon_chain::BeaconChain, clock::SystemSlotClock, node_status::NodeStatus,
    state_store::InMemoryStateStore,
};
use ream_consensus_beacon::genesis::interop_genesis_state;
use ream_duties::{resolver::AttesterDutiesResolver, traits::SlotClock};
use ream_duty_node::cli::{
    Cli, Commands, constants::INTEROP_ETH1_BLOCK_HASH, dev_node::DevNodeConfig,
    verbosity::Verbosity,
};
use ream_rpc_common::config::RpcServerConfig;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// The head enters each slot this long before the slot starts, so an epoch start state is stored
/// before the slot clock reaches it.
const SLOT_ADVANCE_LEAD: Duration = Duration::from_millis(500);

fn since_unix_epoch() -> anyhow::Result<Duration> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| anyhow!("System time is before the unix epoch: {err}"))
}

fn unix_time() -> anyhow::Result<u64> {
    Ok(since_unix_epoch()?.as_secs())
}

/// Move the chain head forward once per slot, ticking on the slot boundaries of ``slot_clock``.
async fn advance_chain(
    beacon_chain: Arc<BeaconChain>,
    slot_clock: SystemSlotClock,
) -> anyhow::Result<()> {
    let now = since_unix_epoch()?;
    beacon_chain.process_tick(now.as_secs()).await?;
    let mut next_slot = if now.as_secs() < slot_clock.genesis_time() {
        beacon_chain.head_slot().await
    } else {
        slot_clock.slot_at_time(now.as_secs()) + 1
    };

    let start =
        Instant::now() + slot_clock.duration_to_next_slot(now).saturating_sub(SLOT_ADVANCE_LEAD);
    let mut interval = interval_at(start, slot_clock.slot_duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        // A stalled tick is caught up from the wall clock.
        let target_slot = match slot_clock.current_slot() {
            Ok(slot) => slot.max(next_slot),
            Err(err) => {
                error!("Failed to read slot clock: {err}");
                next_slot
            }
        };
        if let Err(err) = beacon_chain.process_slots(target_slot).await {
            error!(target_slot, "Failed to advance head: {err}");
            continue;
        }
        next_slot = target_slot + 1;
    }
}

async fn run_dev_node(config: DevNodeConfig) -> anyhow::Result<()> {
    init_tracing(config.verbosity);

    let genesis_time = match config.genesis_time {
        Some(genesis_time) => genesis_time,
        None => unix_time()?,
    };
    info!(
        validator_count = config.validator_count,
        genesis_time, "Starting dev node"
    );

    let genesis_block_root = keccak256(genesis_time.to_le_bytes());
    let genesis_state = interop_genesis_state(
        config.validator_count,
        genesis_time,
        INTEROP_ETH1_BLOCK_HASH,
        genesis_block_root,
    );

    let state_store = Arc::new(InMemoryStateStore::new());
    let beacon_chain = Arc::new(BeaconChain::new(genesis_state, state_store.clone()));
    let node_status = Arc::new(NodeStatus::default());
    let system_clock = SystemSlotClock::new(genesis_time);
    let slot_clock: Arc<dyn SlotClock> = Arc::new(system_clock.clone());
    let resolver = AttesterDutiesResolver::new(node_status.clone(), node_status, state_store);

    let chain_task = tokio::spawn(async move {
        if let Err(err) = advance_chain(beacon_chain, system_clock).await {
            error!("Chain task stopped: {err}");
        }
    });

    let server_config = RpcServerConfig::new(config.http_address, config.http_port);
    let result = ream_rpc_beacon::server::start(server_config, resolver, slot_clock).await;

    chain_task.abort();
    info!("Dev node stopped");
    result.map_err(|err| anyhow!("HTTP server failed: {err}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dev(config) => run_dev_node(*config).await,
    }
}
