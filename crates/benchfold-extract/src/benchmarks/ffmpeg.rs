// SPDX-License-Identifier: MIT OR Apache-2.0
//! FFmpeg encoding benchmark. Scenarios combine encoder and workload
//! (`Encoder: libx264 - Scenario: Video On Demand`); the unit is spelled
//! `FPS` and is normalized.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "FPS" | "fps" => "Frames Per Second".to_string(),
        other => other.to_string(),
    }
}

/// Extract one thread of an FFmpeg run.
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
    fn test_fps_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "f": {"title": "FFmpeg",
                      "description": "Encoder: libx264 - Scenario: Video On Demand",
                      "scale": "FPS", "results": {"local": {"value": 68.31}}}
            }
        });
        std::fs::write(dir.path().join("16-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "16", 0.0).unwrap();
        let r = &record.test_name["FFmpeg - Encoder: libx264 - Scenario: Video On Demand"];
        assert_eq!(r.unit, "Frames Per Second");
    }
}
