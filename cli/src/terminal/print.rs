use colored::*;
use nodectl_core::discovery::DiscoveryReport;
use tracing::info;

use crate::terminal::logging::RAW_TARGET;

pub const TOTAL_WIDTH: usize = 64;

const KEY_WIDTH: usize = 7;

/// Raw pass-through to the subscriber; no level symbol is prefixed.
pub fn print(msg: &str) {
    info!(target: RAW_TARGET, "{msg}");
}

pub fn blank() {
    print("");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn status(msg: &str) {
    let prefix: ColoredString = ">".bright_black();
    print(&format!("{} {}", prefix, msg));
}

/// `Remote...: value` style key/value line.
pub fn aligned_line(key: &str, value: &str) {
    let dots: String = ".".repeat(KEY_WIDTH.saturating_sub(key.len()));
    print(&format!(
        "{}{}{} {}",
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    ));
}

/// Centered line; width is measured with ANSI escapes excluded.
pub fn centerln(msg: &str) {
    let width: usize = console::measure_text_width(msg);
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{space}{msg}"));
}

pub fn summary(report: &DiscoveryReport) {
    let ok: ColoredString = format!("OK={}", report.tally.ok).green().bold();
    let failed: ColoredString = if report.tally.failed == 0 {
        format!("FAIL={}", report.tally.failed).bright_black()
    } else {
        format!("FAIL={}", report.tally.failed).red().bold()
    };
    centerln(&format!("Done. {ok} {failed}"));
}
