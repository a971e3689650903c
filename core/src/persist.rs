//! JSON persistence for fetched payloads.
//!
//! Files are written pretty-printed with 4-space indentation, recursively
//! sorted keys, and a trailing newline, so successive snapshots of the same
//! node diff cleanly.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

/// Writes `payload` as `<dir>/<filename>`.
pub fn save_json(dir: &Path, filename: &str, payload: &Value) -> io::Result<()> {
    let mut out: Vec<u8> = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    sort_keys(payload)
        .serialize(&mut serializer)
        .map_err(io::Error::from)?;
    out.push(b'\n');
    fs::write(dir.join(filename), out)
}

/// Deep copy with every object's keys in lexicographic order.
///
/// The in-memory maps preserve manifest order for iteration; ordering is
/// applied only at the persistence boundary.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted: Map<String, Value> = Map::new();
            for (key, val) in entries {
                sorted.insert(key.clone(), sort_keys(val));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
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
