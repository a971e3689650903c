use std::net::IpAddr;
use std::process::ExitCode;

use colored::*;
use indicatif::ProgressBar;
use nodectl_core::reboot::{self, RebootObserver, RebootPhase, RebootTiming, UdpCommander};
use nodectl_protocols::udp;

use crate::terminal::{print, spinner};

/// Reboot the node at `ip`, then wait for it to come back online.
pub async fn reboot(ip: IpAddr, forever: bool) -> ExitCode {
    print::header("reboot");

    let commander = UdpCommander::new(udp::control_addr(ip));
    let timing = RebootTiming::default();
    let mut observer = TerminalObserver { spinner: None };

    if forever {
        reboot::run_forever(&commander, &mut observer, &timing).await;
    } else {
        reboot::run_cycle(&commander, &mut observer, &timing).await;
    }

    ExitCode::SUCCESS
}

/// Renders phase transitions: colored status lines plus the wait spinner.
struct TerminalObserver {
    spinner: Option<ProgressBar>,
}

impl RebootObserver for TerminalObserver {
    fn entered(&mut self, phase: RebootPhase, liveness: &str) {
        match phase {
            RebootPhase::CheckingLive => {
                print::print(&format!("{}", format!("[{liveness}]").yellow()));
            }
            RebootPhase::WaitingForLive => {
                print::status("node is silent, waiting for first reply");
            }
            RebootPhase::Rebooting => {
                print::print(&format!("{}", format!("[{liveness}]").cyan()));
            }
            RebootPhase::WaitingForReturn => {
                self.spinner = Some(spinner::start_wait_spinner());
            }
            RebootPhase::Done => {
                if let Some(spinner) = self.spinner.take() {
                    spinner.finish_and_clear();
                }
                print::print(&format!("{}", format!("Back online: [{liveness}]").green()));
            }
        }
    }
}
