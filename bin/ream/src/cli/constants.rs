use std::net::{IpAddr, Ipv4Addr};

use alloy_primitives::{B256, b256};

pub const DEFAULT_HTTP_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
pub const DEFAULT_HTTP_PORT: u16 = 5052;
pub const DEFAULT_VALIDATOR_COUNT: u64 = 64;
pub const DEFAULT_VERBOSITY: &str = "3";

/// Eth1 block hash the interop genesis seeds its randao mixes with.
pub const INTEROP_ETH1_BLOCK_HASH: B256 =
    b256!("0x4242424242424242424242424242424242424242424242424242424242424242");
