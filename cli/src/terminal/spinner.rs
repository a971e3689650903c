use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner shown while waiting for a rebooted node to come back online.
///
/// The caller clears it with `finish_and_clear` once the node answers.
pub fn start_wait_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{msg} {spinner:.cyan}")
        .unwrap()
        .tick_strings(&["|", "/", "-", "\\"]);

    pb.set_style(style);
    pb.set_message("Waiting for reboot");
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}
