// SPDX-License-Identifier: MIT OR Apache-2.0
//! Redis benchmark.
//!
//! Entries are `Redis SET` / `Redis GET` at varying parallel-connection
//! counts. Aborted runs leave zero-valued entries in the export; those are
//! dropped rather than recorded, and older exports spell the unit
//! `Reqs/sec`.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "Reqs/sec" | "Requests/sec" => "Requests Per Second".to_string(),
        other => other.to_string(),
    }
}

/// Extract one thread of a Redis run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        if entry.score().is_some_and(|s| s <= 0.0) {
            log::debug!("dropping zero-valued redis entry {:?}", entry.title);
            continue;
        }
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
