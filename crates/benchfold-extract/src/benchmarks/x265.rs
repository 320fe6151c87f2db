// SPDX-License-Identifier: MIT OR Apache-2.0
//! x265 encoding benchmark. Scenarios vary by input video
//! (`Video Input: Bosphorus 4K`); zero-frame runs are aborts and are
//! dropped.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

/// Extract one thread of an x265 run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        if entry.score().is_some_and(|s| s <= 0.0) {
            continue;
        }
        let unit = if entry.scale.trim().is_empty() {
            "Frames Per Second".to_string()
        } else {
            entry.scale.trim().to_string()
        };
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
    fn test_zero_frame_runs_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "ok": {"title": "x265", "description": "Video Input: Bosphorus 4K",
                       "scale": "Frames Per Second", "results": {"local": {"value": 21.4}}},
                "bad": {"title": "x265", "description": "Video Input: Bosphorus 1080p",
                        "scale": "Frames Per Second", "results": {"local": {"value": 0.0}}}
            }
        });
        std::fs::write(dir.path().join("8-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "8", 0.0).unwrap();
        assert_eq!(record.test_name.len(), 1);
        assert!(record.test_name.contains_key("x265 - Video Input: Bosphorus 4K"));
    }
}
