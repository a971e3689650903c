pub mod fetch;
pub mod reboot;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nodectl")]
#[command(about = "Operator utilities for embedded network nodes.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Snapshot a node's JSON configuration into a local directory
    #[command(alias = "f")]
    Fetch {
        /// Hostname or IP of the node, scheme optional, e.g. node_486149.local.
        remote_node: String,
        /// Destination directory, created if absent
        local_directory: PathBuf,
    },
    /// Reboot a node over UDP and wait for it to come back online
    #[command(alias = "r")]
    Reboot {
        /// Target IP address
        ip: IpAddr,
        /// Repeat the reboot cycle indefinitely
        #[arg(short, long)]
        forever: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
