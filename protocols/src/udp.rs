//! One-shot UDP exchange with a node's remote configuration port.
//!
//! Fire a fixed command datagram, optionally listen for a single reply.
//! There is no retry, sequencing, or correlation here; cadence and backoff
//! belong to callers.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;

/// UDP port the node's remote configuration handler listens on.
pub const CONTROL_PORT: u16 = 0x2905;

/// Liveness/status query. A non-empty reply means the node is online.
pub const LIST_CMD: &[u8] = b"?list#";

/// Reboot command. The node may drop off the network without answering.
pub const REBOOT_CMD: &[u8] = b"?reboot##";

const MAX_REPLY_LEN: usize = 1500;

/// Outcome of a single fire-and-optionally-receive exchange.
///
/// `reply` is `None` when no datagram arrived inside the wait window. That
/// is a valid outcome signalling liveness-absent, not a transport error.
#[derive(Debug)]
pub struct UdpExchange {
    pub sent: usize,
    pub reply: Option<Vec<u8>>,
}

/// Socket address of the control port on `ip`.
pub fn control_addr(ip: IpAddr) -> SocketAddr {
    SocketAddr::new(ip, CONTROL_PORT)
}

/// Sends `payload` to `addr`, then waits up to `wait` for one reply datagram.
///
/// Pass `None` to skip listening entirely. The socket exists only for this
/// exchange and is released whether or not a reply arrived.
pub async fn exchange(
    addr: SocketAddr,
    payload: &[u8],
    wait: Option<Duration>,
) -> io::Result<UdpExchange> {
    let bind_addr: SocketAddr = match addr {
        SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    };
    let socket: UdpSocket = UdpSocket::bind(bind_addr).await?;
    let sent: usize = socket.send_to(payload, addr).await?;

    let Some(wait) = wait else {
        return Ok(UdpExchange { sent, reply: None });
    };

    let mut buf: Vec<u8> = vec![0u8; MAX_REPLY_LEN];
    match timeout(wait, socket.recv_from(&mut buf)).await {
        Ok(Ok((len, _from))) => {
            buf.truncate(len);
            Ok(UdpExchange { sent, reply: Some(buf) })
        }
        Ok(Err(e)) => Err(e),
        Err(_elapsed) => Ok(UdpExchange { sent, reply: None }),
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
