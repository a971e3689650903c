mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, fetch, reboot};
use terminal::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Fetch {
            remote_node,
            local_directory,
        } => fetch::fetch(&remote_node, local_directory).await,
        Commands::Reboot { ip, forever } => reboot::reboot(ip, forever).await,
    }
}
