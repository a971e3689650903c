use std::path::PathBuf;
use std::process::ExitCode;

use colored::*;
use nodectl_common::fail;
use nodectl_common::network::host::{self, ResolvedHost};
use nodectl_core::discovery::{DiscoveryReport, DiscoverySession};
use nodectl_protocols::http::JsonClient;

use crate::terminal::print;

/// Snapshot every JSON config resource the node advertises.
///
/// Exit code 0 on a fully clean session, 2 as soon as anything failed,
/// including the hard manifest failure.
pub async fn fetch(remote_node: &str, local_directory: PathBuf) -> ExitCode {
    print::header("config snapshot");

    let host: String = host::normalize_host(remote_node);
    print::status(&format!("Resolving {}", host.as_str().bold()));

    // Resolved once; everything below addresses the node by IP.
    let resolved: ResolvedHost = match host::resolve_once(&host).await {
        Ok(resolved) => resolved,
        Err(e) => {
            fail!("{e}");
            return ExitCode::FAILURE;
        }
    };

    print::aligned_line(
        "Remote",
        &format!("{} (resolved -> {})", resolved.display, resolved.ip),
    );
    print::aligned_line("Output", &local_directory.display().to_string());
    print::blank();

    let client: JsonClient = match JsonClient::new() {
        Ok(client) => client,
        Err(e) => {
            fail!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let session = DiscoverySession::new(&client, resolved.ip, local_directory);
    let report: DiscoveryReport = match session.run().await {
        Ok(report) => report,
        Err(e) => {
            fail!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    print::blank();
    print::summary(&report);

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
