// SPDX-License-Identifier: MIT OR Apache-2.0
//! pgbench PostgreSQL benchmark.
//!
//! Each scenario yields a throughput entry (`TPS`) and a latency entry
//! (`ms`). Both are kept: the latency unit is normalized to
//! `Milliseconds` so the analytics' duration inference ranks it
//! lower-is-better.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

fn normalize_unit(scale: &str) -> String {
    match scale.trim() {
        "TPS" => "Transactions Per Second".to_string(),
        "ms" => "Milliseconds".to_string(),
        other => other.to_string(),
    }
}

/// Extract one thread of a pgbench run.
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
        // throughput and latency entries share a description; the unit
        // keeps their keys distinct
        let key = match entry.test_key() {
            Some(base) if result.unit == "Milliseconds" => format!("{base} - Average Latency"),
            Some(base) => base,
            None => {
                synthetic += 1;
                format!("Run {synthetic}")
            }
        };
        jsonfam::insert_unique(&mut record, key, result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}
