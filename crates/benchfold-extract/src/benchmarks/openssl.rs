// SPDX-License-Identifier: MIT OR Apache-2.0
//! OpenSSL sign/verify benchmark.
//!
//! Entries carry the algorithm in the description (`Algorithm: RSA4096`);
//! the unit is spelled `sign/s` or `verify/s` and is normalized so the
//! analytics' throughput inference treats it as a rate.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "sign/s" => "Signs Per Second".to_string(),
        "verify/s" => "Verifies Per Second".to_string(),
        other => other.to_string(),
    }
}

/// Extract one thread of an OpenSSL run.
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
    fn test_sign_and_verify_units_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let export = serde_json::json!({
            "results": {
                "a": {
                    "title": "OpenSSL",
                    "description": "Algorithm: RSA4096",
                    "scale": "sign/s",
                    "results": {"local": {"value": 4213.0}}
                },
                "b": {
                    "title": "OpenSSL",
                    "description": "Algorithm: RSA4096",
                    "scale": "verify/s",
                    "results": {"local": {"value": 271_002.0}}
                }
            }
        });
        std::fs::write(
            dir.path().join("64-thread.json"),
            export.to_string(),
        )
        .unwrap();
        let record = extract(dir.path(), "64", 0.0).unwrap();
        // identical title/description pairs are disambiguated, not lost
        assert_eq!(record.test_name.len(), 2);
        let units: Vec<&str> = record
            .test_name
            .values()
            .map(|r| r.unit.as_str())
            .collect();
        assert_eq!(units, ["Signs Per Second", "Verifies Per Second"]);
    }
}
