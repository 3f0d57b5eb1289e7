use std::net::IpAddr;

use clap::Parser;

use crate::cli::{
    constants::{DEFAULT_HTTP_ADDRESS, DEFAULT_HTTP_PORT, DEFAULT_VALIDATOR_COUNT, DEFAULT_VERBOSITY},
    verbosity::{Verbosity, verbosity_parser},
};

#[derive(Debug, Parser)]
pub struct DevNodeConfig {
    /// Verbosity level
    #[arg(short, long, default_value = DEFAULT_VERBOSITY, value_parser = verbosity_parser)]
    pub verbosity: Verbosity,

    #[arg(long, help = "Set HTTP address", default_value_t = DEFAULT_HTTP_ADDRESS)]
    pub http_address: IpAddr,

    #[arg(long, help = "Set HTTP Port", default_value_t = DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    #[arg(
        long,
        help = "Number of interop validators in the genesis state",
        default_value_t = DEFAULT_VALIDATOR_COUNT
    )]
    pub validator_count: u64,

    #[arg(
        long,
        env = "GENESIS_TIME",
        help = "Unix time of genesis. Defaults to the time the node starts."
    )]
    pub genesis_time: Option<u64>,
}
