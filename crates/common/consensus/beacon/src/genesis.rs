use std::sync::Arc;

use alloy_primitives::B256;
use ethereum_hashing::hash;
use ream_bls::{PubKey, pubkey::PUBLIC_KEY_BYTES_LEN};
use ream_consensus_misc::constants::beacon::{
    EPOCHS_PER_HISTORICAL_VECTOR, GENESIS_EPOCH, GENESIS_SLOT, MIN_ACTIVATION_BALANCE,
    SLOTS_PER_HISTORICAL_ROOT,
};

use crate::{beacon_state::BeaconState, validator::Validator};

/// Deterministic stand-in for the public key of interop validator ``index``.
///
/// These bytes are not points on the curve; they only need to be unique and non-zero.
pub fn interop_pubkey(index: u64) -> PubKey {
    let first = hash(&index.to_le_bytes());
    let second = hash(&first);

    let mut bytes = [0u8; PUBLIC_KEY_BYTES_LEN];
    bytes[..32].copy_from_slice(&first);
    bytes[32..].copy_from_slice(&second[..PUBLIC_KEY_BYTES_LEN - 32]);
    PubKey::from(bytes)
}

/// Build a genesis state with ``validator_count`` validators, all active from the genesis epoch.
pub fn interop_genesis_state(
    validator_count: u64,
    genesis_time: u64,
    eth1_block_hash: B256,
    genesis_block_root: B256,
) -> BeaconState {
    BeaconState {
        genesis_time,
        slot: GENESIS_SLOT,
        latest_block_root: genesis_block_root,
        block_roots: vec![B256::ZERO; SLOTS_PER_HISTORICAL_ROOT as usize],
        randao_mixes: Arc::new(vec![eth1_block_hash; EPOCHS_PER_HISTORICAL_VECTOR as usize]),
        validators: (0..validator_count)
            .map(|index| {
                Validator::new(interop_pubkey(index), MIN_ACTIVATION_BALANCE, GENESIS_EPOCH)
            })
            .collect(),
    }
}
