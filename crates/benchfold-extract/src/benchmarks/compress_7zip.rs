// SPDX-License-Identifier: MIT OR Apache-2.0
//! 7-Zip benchmark. Two rating entries per run (Compression /
//! Decompression, in MIPS); everything else in the export is runner
//! chatter and is dropped.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

/// Extract one thread of a 7-Zip run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    for entry in export.results.values() {
        if !entry.description.contains("Rating") {
            continue;
        }
        let unit = if entry.scale.trim().is_empty() {
            "MIPS".to_string()
        } else {
            entry.scale.trim().to_string()
        };
        let Some(result) = jsonfam::result_from_entry(entry, unit, cost_per_hour) else {
            continue;
        };
        let key = entry
            .test_key()
            .unwrap_or_else(|| entry.description.trim().to_string());
        jsonfam::insert_unique(&mut record, key, result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rating_entries_survive() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "c": {"title": "7-Zip Compression", "description": "Compression Rating",
                      "scale": "MIPS", "results": {"local": {"value": 412_335.0}}},
                "d": {"title": "7-Zip Compression", "description": "Decompression Rating",
                      "scale": "MIPS", "results": {"local": {"value": 389_120.0}}},
                "x": {"title": "7-Zip Compression", "description": "Dictionary Setup",
                      "scale": "Seconds", "results": {"local": {"value": 1.2}}}
            }
        });
        std::fs::write(dir.path().join("64-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "64", 0.0).unwrap();
        assert_eq!(record.test_name.len(), 2);
        assert!(
            record
                .test_name
                .contains_key("7-Zip Compression - Compression Rating")
        );
    }
}
