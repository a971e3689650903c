use thiserror::Error;

/// The closed set of failure kinds surfaced by the node utilities.
///
/// Callers dispatch on the kind at the boundary where it matters (resolution
/// is fatal, fetch failures are tallied) and otherwise just print the
/// message.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Name resolution failed. Never retried; fatal to the calling tool.
    #[error("{0}")]
    Resolution(String),

    /// HTTP or UDP I/O failure below the protocol level.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status, or a response violating the device contract.
    #[error("{0}")]
    Protocol(String),

    /// Response body was not valid JSON.
    #[error("{0}")]
    Decode(String),
}
