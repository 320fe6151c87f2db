// SPDX-License-Identifier: MIT OR Apache-2.0
//! nginx benchmark. Descriptions are sometimes a bare concurrency number
//! in older exports; those are rewritten to the `Connections: N` form so
//! test keys line up across machines.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "Reqs/sec" | "Requests/sec" => "Requests Per Second".to_string(),
        other => other.to_string(),
    }
}

fn normalize_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
        format!("Connections: {trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Extract one thread of an nginx run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        let unit = normalize_unit(&entry.scale);
        let Some(mut result) = jsonfam::result_from_entry(entry, unit, cost_per_hour) else {
            continue;
        };
        result.description = normalize_description(&entry.description);
        let key = if entry.title.trim().is_empty() {
            synthetic += 1;
            format!("Run {synthetic}")
        } else if result.description.is_empty() {
            entry.title.trim().to_string()
        } else {
            format!("{} - {}", entry.title.trim(), result.description)
        };
        jsonfam::insert_unique(&mut record, key, result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number_description_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "n": {
                    "title": "nginx",
                    "description": "200",
                    "scale": "Reqs/sec",
                    "results": {"local": {"value": 88_000.0}}
                }
            }
        });
        std::fs::write(dir.path().join("16-thread.json"), export.to_string()).unwrap();
        let record = extract(dir.path(), "16", 0.0).unwrap();
        let r = &record.test_name["nginx - Connections: 200"];
        assert_eq!(r.description, "Connections: 200");
        assert_eq!(r.unit, "Requests Per Second");
    }
}
