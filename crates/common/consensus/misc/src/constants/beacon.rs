use alloy_primitives::{aliases::B32, fixed_bytes};

pub const DOMAIN_BEACON_ATTESTER: B32 = fixed_bytes!("0x01000000");
pub const EPOCHS_PER_HISTORICAL_VECTOR: u64 = 65536;
pub const FAR_FUTURE_EPOCH: u64 = 18446744073709551615;
pub const GENESIS_EPOCH: u64 = 0;
pub const GENESIS_SLOT: u64 = 0;
pub const MAX_COMMITTEES_PER_SLOT: u64 = 64;
pub const MIN_SEED_LOOKAHEAD: u64 = 1;
pub const SECONDS_PER_SLOT: u64 = 12;
pub const SHUFFLE_ROUND_COUNT: u8 = 90;
pub const SLOTS_PER_EPOCH: u64 = 32;
pub const SLOTS_PER_HISTORICAL_ROOT: u64 = 8192;
pub const TARGET_COMMITTEE_SIZE: u64 = 128;

// Gwei values
pub const MIN_ACTIVATION_BALANCE: u64 = 32_000_000_000;
