//! mcr-logging: append-only NDJSON events for rollout estimates.
//!
//! Only batch summaries are written here. Individual trajectories are never logged.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version stamped into every event.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Stable hash of the raw config bytes a run was started with.
pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub schema_version: u32,
    pub crate_version: &'static str,
}

impl Default for VersionInfoV1 {
    fn default() -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            crate_version: VERSION,
        }
    }
}

/// One batch of rollouts averaged into a value estimate.
#[derive(Debug, Clone, Serialize)]
pub struct RolloutEstimateEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub model_id: String,
    pub mode: &'static str,
    pub max_depth: u32,

    pub episodes: u32,
    pub mean_return: f64,
    pub total_steps: u64,
    /// Rollouts that ended in a terminal state.
    pub terminal: u32,
    /// Rollouts stopped by the adaptive convergence test.
    pub converged: u32,

    pub config_hash: Option<String>,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        s.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .collect()
    }

    fn sample_event(mean_return: f64) -> RolloutEstimateEventV1 {
        RolloutEstimateEventV1 {
            event: "rollout_estimate",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            model_id: "tiger".to_string(),
            mode: "adaptive",
            max_depth: 50,
            episodes: 10,
            mean_return,
            total_steps: 321,
            terminal: 0,
            converged: 7,
            config_hash: Some(hash_config_bytes(b"rollout: {max_depth: 50}")),
        }
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn config_hash_is_stable() {
        assert_eq!(hash_config_bytes(b"abc"), hash_config_bytes(b"abc"));
        assert_ne!(hash_config_bytes(b"abc"), hash_config_bytes(b"abd"));
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&sample_event(1.5)).unwrap();
        w.write_event(&sample_event(-2.0)).unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "rollout_estimate");
        assert_eq!(vals[0]["mean_return"], 1.5);
        assert_eq!(vals[1]["mean_return"], -2.0);
        assert_eq!(vals[1]["v"]["schema_version"], EVENT_SCHEMA_VERSION);
    }

    #[test]
    fn periodic_flush_makes_lines_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();

        w.write_event(&sample_event(0.25)).unwrap();
        // No explicit flush: the writer flushed after the first line.
        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["converged"], 7);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&sample_event(3.0)).unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"rollout_estimate","mean_return":"#)
            .unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["mean_return"], 3.0);
    }
}
