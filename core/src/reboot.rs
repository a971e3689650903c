//! # Reboot Cycle State Machine
//!
//! Drives CheckingLive → (WaitingForLive) → Rebooting → WaitingForReturn →
//! Done over a [`CommandExchange`], reporting each transition to a
//! [`RebootObserver`]. The two waiting phases are intentionally unbounded:
//! boot time is unpredictable, and the operator interrupts externally if a
//! node never comes back.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use nodectl_protocols::udp::{self, LIST_CMD, REBOOT_CMD};
use tokio::time::sleep;
use tracing::trace;

/// Phases of one reboot cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebootPhase {
    /// Initial liveness probe.
    CheckingLive,
    /// The initial probe got nothing; poll until the node answers.
    WaitingForLive,
    /// Node confirmed live; settle, then fire the reboot command.
    Rebooting,
    /// Poll until the node answers again after the reboot.
    WaitingForReturn,
    /// Cycle complete.
    Done,
}

/// Receives each phase transition with the liveness text observed at that
/// point. Presentation (colors, spinner) lives entirely behind this seam.
pub trait RebootObserver {
    fn entered(&mut self, phase: RebootPhase, liveness: &str);
}

/// One-shot command seam.
///
/// "No reply within the window" and transport errors are both `None`:
/// best-effort liveness polling treats them identically and keeps going.
#[async_trait]
pub trait CommandExchange {
    async fn send(&self, cmd: &[u8], wait: Duration) -> Option<Vec<u8>>;
}

/// Production exchange over the node's UDP control port.
pub struct UdpCommander {
    addr: SocketAddr,
}

impl UdpCommander {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

#[async_trait]
impl CommandExchange for UdpCommander {
    async fn send(&self, cmd: &[u8], wait: Duration) -> Option<Vec<u8>> {
        match udp::exchange(self.addr, cmd, Some(wait)).await {
            Ok(result) => result.reply,
            Err(e) => {
                trace!("udp exchange with {} failed: {e}", self.addr);
                None
            }
        }
    }
}

/// Cadence knobs for one cycle. Defaults match the device's behavior in the
/// field; tests shrink them.
#[derive(Clone, Copy, Debug)]
pub struct RebootTiming {
    /// How long each liveness query waits for a reply.
    pub liveness_timeout: Duration,
    /// Pause before issuing the reboot command, so prior state stabilizes.
    pub settle_delay: Duration,
    /// Cadence of liveness polls while waiting for the node to return.
    pub poll_interval: Duration,
    /// Idle sleep between polls while waiting for first liveness.
    pub idle_sleep: Duration,
}

impl Default for RebootTiming {
    fn default() -> Self {
        Self {
            liveness_timeout: Duration::from_secs(1),
            settle_delay: Duration::from_secs(2),
            poll_interval: Duration::from_millis(250),
            idle_sleep: Duration::from_millis(100),
        }
    }
}

/// Decoded, trimmed liveness payload. Empty means "not online yet".
fn reply_text(reply: Option<Vec<u8>>) -> String {
    match reply {
        Some(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        None => String::new(),
    }
}

/// Runs one full reboot cycle.
pub async fn run_cycle<X, O>(exchange: &X, observer: &mut O, timing: &RebootTiming)
where
    X: CommandExchange,
    O: RebootObserver,
{
    // CheckingLive: one probe, reported whether or not it was answered.
    let mut online: String = reply_text(exchange.send(LIST_CMD, timing.liveness_timeout).await);
    observer.entered(RebootPhase::CheckingLive, &online);

    // WaitingForLive: only entered when the first probe came back empty.
    // A freshly powered node may take arbitrarily long to boot.
    if online.is_empty() {
        observer.entered(RebootPhase::WaitingForLive, &online);
        online = poll_until_live(exchange, timing.liveness_timeout, timing.idle_sleep).await;
    }

    // Rebooting: settle first, then fire. The node may drop the link
    // immediately, so no reply is required.
    observer.entered(RebootPhase::Rebooting, &online);
    sleep(timing.settle_delay).await;
    let _ = exchange.send(REBOOT_CMD, timing.liveness_timeout).await;

    observer.entered(RebootPhase::WaitingForReturn, &online);
    let back: String = poll_until_live(exchange, timing.liveness_timeout, timing.poll_interval).await;
    observer.entered(RebootPhase::Done, &back);
}

/// Re-enters CheckingLive immediately after each completed cycle.
pub async fn run_forever<X, O>(exchange: &X, observer: &mut O, timing: &RebootTiming)
where
    X: CommandExchange,
    O: RebootObserver,
{
    loop {
        run_cycle(exchange, observer, timing).await;
    }
}

/// Polls the liveness command until a non-empty reply arrives. Unbounded.
async fn poll_until_live<X: CommandExchange>(
    exchange: &X,
    wait: Duration,
    pause: Duration,
) -> String {
    loop {
        let text: String = reply_text(exchange.send(LIST_CMD, wait).await);
        if !text.is_empty() {
            return text;
        }
        sleep(pause).await;
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
