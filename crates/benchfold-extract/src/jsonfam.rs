// SPDX-License-Identifier: MIT OR Apache-2.0
//! The PTS per-thread JSON export family.
//!
//! Most benchmarks export a small `<thread>-thread.json` per run: a
//! top-level `results` mapping whose entries carry `title`, `description`,
//! `scale` and one nested per-system result with `value`, `raw_values`,
//! and `test_run_times`. The time used for cost attribution is the median
//! of `test_run_times` when that sequence is non-empty, else no cost is
//! attributed.
//!
//! Benchmark modules compose the helpers here with their own entry
//! filtering, unit normalization, and description fixups.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use benchfold_core::artifact::{median, parse_freq_file, parse_perf_stats};
use benchfold_core::doc::{Metric, Series, TestResult, ThreadRecord};

/// A `<thread>-thread.json` export.
#[derive(Debug, Default, Deserialize)]
pub struct PtsExport {
    /// Result entries keyed by PTS run identifier.
    #[serde(default)]
    pub results: IndexMap<String, PtsEntry>,
}

/// One entry of the export's `results` mapping.
#[derive(Debug, Default, Deserialize)]
pub struct PtsEntry {
    /// Test title, e.g. `"Redis SET"`.
    #[serde(default)]
    pub title: String,
    /// Scenario description, e.g. `"Parallel Connections: 50"`.
    #[serde(default)]
    pub description: String,
    /// Unit of the reported value, e.g. `"Requests Per Second"`.
    #[serde(default)]
    pub scale: String,
    /// Per-system results; single-system exports carry exactly one.
    #[serde(default)]
    pub results: IndexMap<String, PtsSystemResult>,
}

/// The nested per-system result of one entry.
#[derive(Debug, Default, Deserialize)]
pub struct PtsSystemResult {
    /// Aggregated score; number, or numeric string in older exports.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Individual raw samples.
    #[serde(default)]
    pub raw_values: Option<Vec<f64>>,
    /// Individual run durations in seconds.
    #[serde(default)]
    pub test_run_times: Option<Vec<f64>>,
}

impl PtsEntry {
    /// Test-key for this entry: `"<title> - <description>"` when a
    /// description exists, else the title alone. `None` for entries with
    /// no title (the caller decides whether to synthesize a key).
    #[must_use]
    pub fn test_key(&self) -> Option<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let description = self.description.trim();
        if description.is_empty() {
            Some(title.to_string())
        } else {
            Some(format!("{title} - {description}"))
        }
    }

    /// The score as a number, accepting numeric strings from older
    /// exports.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        let system = self.results.values().next()?;
        match system.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Read and parse the export for one thread. `None` (with a warning) for
/// missing or malformed files.
#[must_use]
pub fn read_export(benchmark_dir: &Path, thread_id: &str) -> Option<PtsExport> {
    let path = benchmark_dir.join(format!("{thread_id}-thread.json"));
    let text = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(export) => Some(export),
        Err(e) => {
            log::warn!("unparseable PTS export {}: {e}", path.display());
            None
        }
    }
}

/// Build one [`TestResult`] from an entry, with `unit` already
/// normalized by the calling benchmark module. `None` when the entry
/// carries no usable score, which marks the entry (not the thread)
/// incomplete.
#[must_use]
pub fn result_from_entry(entry: &PtsEntry, unit: String, cost_per_hour: f64) -> Option<TestResult> {
    let score = entry.score()?;
    let system = entry.results.values().next()?;
    let raw_values = system
        .raw_values
        .as_ref()
        .filter(|v| !v.is_empty())
        .map_or_else(Series::missing, |v| Series::Numbers(v.clone()));
    let run_times = system
        .test_run_times
        .as_ref()
        .filter(|v| !v.is_empty())
        .cloned();
    let time_seconds = run_times.as_deref().and_then(median);
    Some(TestResult {
        description: entry.description.trim().to_string(),
        values: Metric::Number(score),
        raw_values,
        unit,
        time: time_seconds.map_or_else(Metric::missing, Metric::Number),
        test_run_times: run_times.map_or_else(Series::missing, Series::Numbers),
        cost: TestResult::compute_cost(cost_per_hour, time_seconds),
    })
}

/// Insert a result under a unique key, disambiguating repeats with a
/// trailing counter. PTS occasionally repeats a title/description pair
/// across otherwise distinct runs.
pub fn insert_unique(record: &mut ThreadRecord, key: String, result: TestResult) {
    if !record.test_name.contains_key(&key) {
        record.test_name.insert(key, result);
        return;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{key} - {n}");
        if !record.test_name.contains_key(&candidate) {
            record.test_name.insert(candidate, result);
            return;
        }
        n += 1;
    }
}

/// Attach `start_freq`/`end_freq` snapshots when the artifacts exist and
/// are non-empty; absent artifacts leave the sub-keys omitted.
pub fn attach_freq(benchmark_dir: &Path, thread_id: &str, record: &mut ThreadRecord) {
    record.perf_stat.start_freq =
        parse_freq_file(&benchmark_dir.join(format!("{thread_id}-thread_freq_start.txt")));
    record.perf_stat.end_freq =
        parse_freq_file(&benchmark_dir.join(format!("{thread_id}-thread_freq_end.txt")));
}

/// Attach perf-stat counters; only the benchmarks whose runner captures
/// the dump call this.
pub fn attach_perf_events(benchmark_dir: &Path, thread_id: &str, record: &mut ThreadRecord) {
    record.perf_stat.events =
        parse_perf_stats(&benchmark_dir.join(format!("{thread_id}-thread_perf_stats.txt")));
}

/// Final gate shared by the family: a record with zero results means the
/// thread did not complete.
#[must_use]
pub fn finish(record: ThreadRecord) -> Option<ThreadRecord> {
    if record.test_name.is_empty() {
        None
    } else {
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, description: &str, scale: &str, value: serde_json::Value) -> PtsEntry {
        let mut results = IndexMap::new();
        results.insert(
            "local".to_string(),
            PtsSystemResult {
                value: Some(value),
                raw_values: Some(vec![1.0, 2.0]),
                test_run_times: Some(vec![100.0, 140.0]),
            },
        );
        PtsEntry {
            title: title.to_string(),
            description: description.to_string(),
            scale: scale.to_string(),
            results,
        }
    }

    #[test]
    fn test_test_key_convention() {
        let e = entry("Redis SET", "Parallel Connections: 50", "RPS", 1.into());
        assert_eq!(
            e.test_key().unwrap(),
            "Redis SET - Parallel Connections: 50"
        );
        let e = entry("Redis SET", "", "RPS", 1.into());
        assert_eq!(e.test_key().unwrap(), "Redis SET");
        let e = entry("", "desc", "RPS", 1.into());
        assert_eq!(e.test_key(), None);
    }

    #[test]
    fn test_score_accepts_numeric_strings() {
        let e = entry("t", "", "u", serde_json::json!("123.5"));
        assert_eq!(e.score(), Some(123.5));
        let e = entry("t", "", "u", serde_json::json!(42));
        assert_eq!(e.score(), Some(42.0));
    }

    #[test]
    fn test_result_uses_median_run_time_for_cost() {
        let e = entry("t", "d", "Seconds", serde_json::json!(10.0));
        let r = result_from_entry(&e, "Seconds".to_string(), 0.36).unwrap();
        // median of [100, 140] is 120 -> 0.36 * 120 / 3600 = 0.012
        assert_eq!(r.time, Metric::Number(120.0));
        assert!((r.cost - 0.012).abs() < 1e-12);
    }

    #[test]
    fn test_entry_without_value_is_skipped() {
        let mut e = entry("t", "d", "u", serde_json::json!(1.0));
        e.results.values_mut().next().unwrap().value = None;
        assert!(result_from_entry(&e, "u".to_string(), 0.0).is_none());
    }

    #[test]
    fn test_insert_unique_disambiguates() {
        let mut record = ThreadRecord::default();
        let e = entry("t", "", "u", serde_json::json!(1.0));
        let r = result_from_entry(&e, "u".to_string(), 0.0).unwrap();
        insert_unique(&mut record, "X".to_string(), r.clone());
        insert_unique(&mut record, "X".to_string(), r);
        let keys: Vec<&String> = record.test_name.keys().collect();
        assert_eq!(keys, ["X", "X - 2"]);
    }
}
