// SPDX-License-Identifier: MIT OR Apache-2.0
//! Memcached benchmark. Entries vary by set:get ratio
//! (`Set To Get Ratio: 1:10`); older exports spell the unit `Ops/sec`.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "Ops/sec" | "Op/s" => "Ops Per Second".to_string(),
        other => other.to_string(),
    }
}

/// Extract one thread of a Memcached run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        let unit = normalize_unit(&entry.scale);
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

    #[test]
    fn test_ratio_entries() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "m1": {"title": "Memcached", "description": "Set To Get Ratio: 1:10",
                       "scale": "Ops/sec", "results": {"local": {"value": 1_850_000.0}}},
                "m2": {"title": "Memcached", "description": "Set To Get Ratio: 1:100",
                       "scale": "Ops/sec", "results": {"local": {"value": 2_010_000.0}}}
            }
        });
        std::fs::write(dir.path().join("32-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "32", 0.0).unwrap();
        assert!(
            record
                .test_name
                .contains_key("Memcached - Set To Get Ratio: 1:100")
        );
        assert_eq!(record.test_name.len(), 2);
    }
}
