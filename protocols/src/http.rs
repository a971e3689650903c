//! GET-JSON primitive used by the config snapshot session.
//!
//! Requests always carry `Accept: application/json` and the fixed client
//! tag. The three ways a fetch can fail (transport, non-2xx, bad JSON) all
//! collapse into [`NodeError`]; callers only ever print the message.

use std::time::Duration;

use nodectl_common::error::NodeError;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const CLIENT_TAG: &str = "nodectl/0.2";

pub struct JsonClient {
    client: reqwest::Client,
}

impl JsonClient {
    pub fn new() -> Result<Self, NodeError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| NodeError::Transport(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetches `url` and decodes the body as JSON.
    ///
    /// The body is decoded with the charset the response declares (UTF-8
    /// otherwise), replacing invalid byte sequences rather than failing.
    pub async fn get_json(&self, url: &str) -> Result<Value, NodeError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_TAG)
            .send()
            .await
            .map_err(|e| NodeError::Transport(format!("URL error for {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort on the body; an unreadable one becomes "".
            let body: String = response.text().await.unwrap_or_default();
            let detail: String = format!("HTTP {} for {url}\n{body}", status.as_u16());
            return Err(NodeError::Protocol(detail.trim_end().to_string()));
        }

        let body: String = response
            .text()
            .await
            .map_err(|e| NodeError::Transport(format!("reading body from {url}: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| NodeError::Decode(format!("Invalid JSON from {url}: {e}")))
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
