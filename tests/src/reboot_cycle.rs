#![cfg(test)]
//! Full-stack reboot cycle: the real `UdpCommander` against a UDP node
//! double on localhost that goes quiet for a few polls after `?reboot##`.

use std::net::SocketAddr;
use std::time::Duration;

use nodectl_core::reboot::{self, RebootObserver, RebootPhase, RebootTiming, UdpCommander};
use nodectl_protocols::udp::{LIST_CMD, REBOOT_CMD};
use tokio::net::UdpSocket;

const STATUS: &[u8] = b"node gd32_486149\n";

/// Answers `?list#` with a status string; after `?reboot##` it stays mute
/// for the next few liveness queries, like a device mid-boot.
async fn spawn_node_double(down_polls: usize) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut remaining_down = 0usize;
        let mut buf = [0u8; 64];
        loop {
            let (len, from) = match socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(_) => break,
            };
            match &buf[..len] {
                cmd if cmd == REBOOT_CMD => remaining_down = down_polls,
                cmd if cmd == LIST_CMD => {
                    if remaining_down > 0 {
                        remaining_down -= 1;
                    } else {
                        let _ = socket.send_to(STATUS, from).await;
                    }
                }
                _ => {}
            }
        }
    });

    addr
}

fn quick_timing() -> RebootTiming {
    RebootTiming {
        liveness_timeout: Duration::from_millis(200),
        settle_delay: Duration::from_millis(100),
        poll_interval: Duration::from_millis(50),
        idle_sleep: Duration::from_millis(20),
    }
}

#[derive(Default)]
struct Recorder {
    transitions: Vec<(RebootPhase, String)>,
}

impl RebootObserver for Recorder {
    fn entered(&mut self, phase: RebootPhase, liveness: &str) {
        self.transitions.push((phase, liveness.to_string()));
    }
}

#[tokio::test]
async fn cycle_completes_once_the_node_answers_again() {
    let addr = spawn_node_double(3).await;
    let commander = UdpCommander::new(addr);
    let mut recorder = Recorder::default();

    reboot::run_cycle(&commander, &mut recorder, &quick_timing()).await;

    let phases: Vec<RebootPhase> = recorder.transitions.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        phases,
        vec![
            RebootPhase::CheckingLive,
            RebootPhase::Rebooting,
            RebootPhase::WaitingForReturn,
            RebootPhase::Done,
        ]
    );

    assert_eq!(recorder.transitions[0].1, "node gd32_486149");
    assert_eq!(recorder.transitions[3].1, "node gd32_486149");
}

#[tokio::test]
async fn socket_errors_poll_on_like_silence() {
    // 127.0.0.1:9 is almost certainly closed; sends either vanish or come
    // back as ICMP-driven errors. Both must read as "not yet online".
    let closed: SocketAddr = "127.0.0.1:9".parse().unwrap();
    let commander = UdpCommander::new(closed);
    let mut recorder = Recorder::default();

    let bounded = tokio::time::timeout(
        Duration::from_millis(600),
        reboot::run_cycle(&commander, &mut recorder, &quick_timing()),
    )
    .await;

    assert!(bounded.is_err(), "cycle must keep polling a dead address");
    let phases: Vec<RebootPhase> = recorder.transitions.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        phases,
        vec![RebootPhase::CheckingLive, RebootPhase::WaitingForLive],
        "a silent node never gets past WaitingForLive"
    );
}
