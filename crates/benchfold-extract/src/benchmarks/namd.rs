// SPDX-License-Identifier: MIT OR Apache-2.0
//! NAMD molecular dynamics benchmark. Reports simulated nanoseconds per
//! day (`ns/day`, throughput) per input system; some PTS versions invert
//! the scale to `days/ns`, which is converted so scores compare across
//! machines.

use std::path::Path;

use benchfold_core::doc::{Metric, ThreadRecord};

use crate::jsonfam;

/// Extract one thread of a NAMD run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    let mut synthetic = 0u32;
    for entry in export.results.values() {
        let inverted = entry.scale.trim() == "days/ns";
        let Some(mut result) =
            jsonfam::result_from_entry(entry, "ns Per Day".to_string(), cost_per_hour)
        else {
            continue;
        };
        if inverted && let Some(v) = result.values.as_number() {
            if v <= 0.0 {
                continue;
            }
            result.values = Metric::Number(1.0 / v);
            result.raw_values = benchfold_core::doc::Series::missing();
        }
        let key = entry.test_key().unwrap_or_else(|| {
            synthetic += 1;
            format!("Run {synthetic}")
        });
        jsonfam::insert_unique(&mut record, key, result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}
