//! Output macros shared by every crate in the workspace.
//!
//! These forward to `tracing`, so the cli's subscriber decides how a message
//! is rendered. Core crates never talk to the terminal directly.

/// An affirmative, operator-facing event. Rendered with a `[+]` marker.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => { ::tracing::info!($($arg)*) };
}

/// A failed attempt worth the operator's attention. Rendered with `[-]`.
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => { ::tracing::error!($($arg)*) };
}
