// SPDX-License-Identifier: MIT OR Apache-2.0
//! CoreMark benchmark. One entry per run (`CoreMark Size 666 -
//! Iterations Per Second`); also consumes the perf-stat dump.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

/// Extract one thread of a CoreMark run.
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
            "Iterations Per Second".to_string()
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
    jsonfam::attach_perf_events(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}
