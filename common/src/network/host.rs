//! # Host Normalization & Single-Shot Resolution
//!
//! User input like `http://node_486149.local./` is reduced to a bare host,
//! then resolved to one IP address for the whole run. Resolving `.local`
//! names over mDNS can take seconds per lookup, so every exchange after the
//! first addresses the node by IP instead of by name.

use std::net::{IpAddr, SocketAddr};

use tokio::net::lookup_host;

use crate::error::NodeError;

/// A host that has been resolved exactly once for the lifetime of the run.
///
/// Callers thread this value into every subsequent request; nothing in the
/// workspace re-resolves a name after construction.
#[derive(Clone, Debug)]
pub struct ResolvedHost {
    /// The normalized host as the user gave it, kept for display.
    pub display: String,
    /// The address every subsequent request is sent to.
    pub ip: IpAddr,
}

/// Strips an `http://`/`https://` scheme, any path, and trailing dots.
///
/// Trailing dots tolerate fully-qualified mDNS names (`node.local.`).
/// Idempotent: normalizing an already-normalized host is a no-op.
pub fn normalize_host(raw: &str) -> String {
    let host: &str = raw.trim();
    let host: &str = host
        .strip_prefix("http://")
        .or_else(|| host.strip_prefix("https://"))
        .unwrap_or(host);
    let host: &str = host.split('/').next().unwrap_or("");
    host.trim_end_matches('.').to_string()
}

/// Resolves `host` to a single address, preferring IPv4 records.
///
/// Embedded nodes commonly announce both families but only serve v4, so an
/// IPv4 record wins over anything else; the first record is the fallback.
pub async fn resolve_once(host: &str) -> Result<ResolvedHost, NodeError> {
    let candidates: Vec<SocketAddr> = lookup_host((host, 80u16))
        .await
        .map_err(|e| NodeError::Resolution(format!("DNS/mDNS lookup failed for {host}: {e}")))?
        .collect();

    let ip: IpAddr = pick_address(&candidates).ok_or_else(|| {
        NodeError::Resolution(format!("DNS/mDNS lookup failed for {host}: no addresses returned"))
    })?;

    Ok(ResolvedHost {
        display: host.to_string(),
        ip,
    })
}

/// First IPv4 record if any, otherwise the first record of any family.
fn pick_address(candidates: &[SocketAddr]) -> Option<IpAddr> {
    candidates
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| candidates.first())
        .map(|addr| addr.ip())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
