pub mod constants;
pub mod dev_node;
pub mod verbosity;

use clap::{Parser, Subcommand};

use crate::cli::dev_node::DevNodeConfig;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a single node chain of interop validators that serves attester duties
    #[command(name = "dev")]
    Dev(Box<DevNodeConfig>),
}
