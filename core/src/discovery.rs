//! # Config Snapshot Session
//!
//! Downloads a node's JSON configuration in three ordered steps: the two
//! fixed endpoints, the directory manifest, then one fetch per manifest
//! entry. Per-endpoint failures are tallied and do not stop the session;
//! losing the manifest does, since nothing further can be discovered
//! without it.

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use nodectl_common::error::NodeError;
use nodectl_common::{fail, success};
use nodectl_protocols::http::JsonClient;
use serde_json::{Map, Value};

use crate::persist;

const DEFAULT_ENDPOINTS: [(&str, &str); 2] = [
    ("/json/version", "version.json"),
    ("/json/list", "list.json"),
];

const DIRECTORY_PATH: &str = "/json/config/directory";
const DIRECTORY_FILE: &str = "config_directory.json";

/// Fetch-and-decode seam so the session can be exercised without a device.
#[async_trait]
pub trait JsonFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, NodeError>;
}

#[async_trait]
impl JsonFetcher for JsonClient {
    async fn get_json(&self, url: &str) -> Result<Value, NodeError> {
        JsonClient::get_json(self, url).await
    }
}

/// Running OK/FAIL tally across one discovery session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchTally {
    pub ok: usize,
    pub failed: usize,
}

/// End-of-session report.
#[derive(Clone, Copy, Debug)]
pub struct DiscoveryReport {
    pub tally: FetchTally,
    /// True when the directory manifest could not be fetched or had the
    /// wrong shape. Per-entry fetches were never attempted in that case.
    pub aborted: bool,
}

impl DiscoveryReport {
    pub fn is_clean(&self) -> bool {
        !self.aborted && self.tally.failed == 0
    }
}

pub struct DiscoverySession<'a, F: JsonFetcher> {
    fetcher: &'a F,
    authority: String,
    out_dir: PathBuf,
    tally: FetchTally,
}

impl<'a, F: JsonFetcher> DiscoverySession<'a, F> {
    /// Session against the node's HTTP server on the default port.
    pub fn new(fetcher: &'a F, ip: IpAddr, out_dir: PathBuf) -> Self {
        let authority: String = match ip {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{v6}]"),
        };
        Self::for_authority(fetcher, authority, out_dir)
    }

    /// Session against an explicit `host[:port]` authority.
    pub fn for_authority(fetcher: &'a F, authority: String, out_dir: PathBuf) -> Self {
        Self {
            fetcher,
            authority,
            out_dir,
            tally: FetchTally::default(),
        }
    }

    /// Runs the full session and reports the tally.
    ///
    /// Only the output directory being uncreatable is a hard error; every
    /// network-level failure ends up in the tally instead.
    pub async fn run(mut self) -> anyhow::Result<DiscoveryReport> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating {}", self.out_dir.display()))?;

        for (path, out_name) in DEFAULT_ENDPOINTS {
            self.fetch_and_save(path, out_name).await;
        }

        let files: Map<String, Value> = match self.fetch_manifest().await {
            Some(files) => files,
            None => {
                self.tally.failed += 1;
                return Ok(DiscoveryReport {
                    tally: self.tally,
                    aborted: true,
                });
            }
        };

        for key in files.keys() {
            let remote_path: String = remote_fetch_path(key);
            let out_name: String = output_name(key);
            self.fetch_and_save(&remote_path, &out_name).await;
        }

        Ok(DiscoveryReport {
            tally: self.tally,
            aborted: false,
        })
    }

    /// Fetches and persists the directory manifest, returning its `files`
    /// mapping. `None` on any failure, including an unexpected JSON shape.
    async fn fetch_manifest(&mut self) -> Option<Map<String, Value>> {
        let url: String = self.url_for(DIRECTORY_PATH);

        let directory: Value = match self.fetcher.get_json(&url).await {
            Ok(payload) => payload,
            Err(e) => {
                fail!("{url}: {e}");
                return None;
            }
        };

        if let Err(e) = persist::save_json(&self.out_dir, DIRECTORY_FILE, &directory) {
            fail!("{url}: saving {DIRECTORY_FILE}: {e}");
            return None;
        }
        success!("{url} -> {DIRECTORY_FILE}");
        self.tally.ok += 1;

        match directory.get("files").and_then(Value::as_object) {
            Some(files) => Some(files.clone()),
            None => {
                fail!("Unexpected directory JSON shape from {url}");
                None
            }
        }
    }

    async fn fetch_and_save(&mut self, url_path: &str, out_name: &str) {
        let url: String = self.url_for(url_path);
        match self.try_fetch(&url, out_name).await {
            Ok(()) => {
                success!("{url} -> {out_name}");
                self.tally.ok += 1;
            }
            Err(e) => {
                fail!("{url}: {e}");
                self.tally.failed += 1;
            }
        }
    }

    async fn try_fetch(&self, url: &str, out_name: &str) -> anyhow::Result<()> {
        let payload: Value = self.fetcher.get_json(url).await?;
        persist::save_json(&self.out_dir, out_name, &payload)?;
        Ok(())
    }

    fn url_for(&self, url_path: &str) -> String {
        if url_path.starts_with('/') {
            format!("http://{}{url_path}", self.authority)
        } else {
            format!("http://{}/{url_path}", self.authority)
        }
    }
}

/// `/json/<key>`, with any leading separator on the key stripped.
pub fn remote_fetch_path(key: &str) -> String {
    format!("/json/{}", key.trim_start_matches('/'))
}

/// `<basename>.json`, from the final `/`-delimited segment of the key.
pub fn output_name(key: &str) -> String {
    let trimmed: &str = key.trim_start_matches('/');
    let basename: &str = trimmed.rsplit('/').next().unwrap_or(trimmed);
    format!("{basename}.json")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
