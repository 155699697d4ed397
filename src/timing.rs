//! Timing extraction from captured playbook output.
//!
//! A profiled playbook run ends with a timing block: a delimiter line of
//! repeated `=` characters followed by one line per task of the form
//! `task name ------ 0:00:01.234`. [`extract_timings`] scans the captured
//! output backwards, stopping at the delimiter, so only the trailing block of
//! the most recent play is harvested.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Record key holding the Python interpreter version.
pub const KEY_PYTHON: &str = "py";

/// Record key holding the ansible-core version.
pub const KEY_ANSIBLE: &str = "ans";

/// A timing line: task name, a run of dashes, then the duration.
///
/// The duration capture excludes dashes so a dash run inside the task name
/// (`task-a ----- 0:00:01`) is not mistaken for the separator.
static TIMING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<n>.+?) *-+(?P<d>[^-]+)$").expect("timing pattern must compile")
});

/// Delimiter prefix marking the start of the trailing timing block.
const BLOCK_DELIMITER: &str = "======";

/// Extract (task name, duration) pairs from captured playbook output.
///
/// Lines are scanned bottom-up and the scan stops at the first delimiter
/// line, so the returned pairs cover only the last delimited section, in
/// bottom-up order. Lines that do not match the timing pattern are skipped.
/// Without any delimiter the whole text is scanned; empty input yields an
/// empty result.
pub fn extract_timings(output: &str) -> Vec<(String, String)> {
    let mut timings = Vec::new();

    for line in output.lines().rev() {
        if line.starts_with(BLOCK_DELIMITER) {
            break;
        }
        if let Some(caps) = TIMING_PATTERN.captures(line) {
            timings.push((caps["n"].trim().to_string(), caps["d"].trim().to_string()));
        }
    }

    timings
}

/// One benchmark result: the version pair plus every extracted task timing,
/// keyed by task name and ordered lexicographically for deterministic
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimingRecord(BTreeMap<String, String>);

impl TimingRecord {
    /// Create a record seeded with the fixed version keys.
    pub fn new(python_version: &str, ansible_version: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(KEY_PYTHON.to_string(), python_version.to_string());
        map.insert(KEY_ANSIBLE.to_string(), ansible_version.to_string());
        Self(map)
    }

    /// Insert a task timing; a duplicate task name overwrites the earlier
    /// entry.
    pub fn insert(&mut self, name: impl Into<String>, duration: impl Into<String>) {
        self.0.insert(name.into(), duration.into());
    }

    /// Value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries, fixed keys included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when even the fixed keys are absent.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
