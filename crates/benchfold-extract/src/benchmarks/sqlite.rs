// SPDX-License-Identifier: MIT OR Apache-2.0
//! SQLite insertion benchmark. Scores are durations (`Seconds`,
//! lower-is-better downstream); scenarios vary by `Threads / Copies: N`.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

/// Extract one thread of a SQLite run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        let unit = entry.scale.trim().to_string();
        let Some(result) = jsonfam::result_from_entry(entry, unit, cost_per_hour) else {
            continue;
        };
        let key = entry.test_key().unwrap_or_else(|| {
            synthetic += 1;
            format!("Run {synthetic}")
        });
        jsonfam::insert_unique(&mut record, key, result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchfold_core::doc::Metric;

    #[test]
    fn test_duration_entry() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "s": {"title": "SQLite", "description": "Threads / Copies: 8",
                      "scale": "Seconds",
                      "results": {"local": {"value": 14.2, "raw_values": [14.1, 14.3],
                                             "test_run_times": [14.1, 14.3]}}}
            }
        });
        std::fs::write(dir.path().join("8-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "8", 0.36).unwrap();
        let r = &record.test_name["SQLite - Threads / Copies: 8"];
        assert_eq!(r.unit, "Seconds");
        assert_eq!(r.time, Metric::Number(14.2));
        assert!(r.cost > 0.0);
    }
}
