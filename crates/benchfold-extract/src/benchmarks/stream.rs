// SPDX-License-Identifier: MIT OR Apache-2.0
//! STREAM memory bandwidth benchmark.
//!
//! Only the four canonical kernels (Copy, Scale, Add, Triad) are kept;
//! PTS sometimes appends warm-up entries that would skew cross-machine
//! grouping. This is one of the extractors that consumes the perf-stat
//! dump into `perf_stat.events`.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::jsonfam;

const KERNELS: [&str; 4] = ["Copy", "Scale", "Add", "Triad"];

fn kernel_of(entry_description: &str) -> Option<&'static str> {
    let description = entry_description.trim();
    KERNELS
        .iter()
        .find(|k| description.eq_ignore_ascii_case(k) || description.starts_with(**k))
        .copied()
}

/// Extract one thread of a STREAM run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    let export = jsonfam::read_export(benchmark_dir, thread_id)?;
    let mut record = ThreadRecord::default();
    for entry in export.results.values() {
        let Some(kernel) = kernel_of(&entry.description) else {
            log::debug!("dropping non-kernel stream entry {:?}", entry.description);
            continue;
        };
        let unit = if entry.scale.trim().is_empty() {
            "MB/s".to_string()
        } else {
            entry.scale.trim().to_string()
        };
        let Some(mut result) = jsonfam::result_from_entry(entry, unit, cost_per_hour) else {
            continue;
        };
        result.description = kernel.to_string();
        jsonfam::insert_unique(&mut record, format!("Stream - {kernel}"), result);
    }
    jsonfam::attach_freq(benchmark_dir, thread_id, &mut record);
    jsonfam::attach_perf_events(benchmark_dir, thread_id, &mut record);
    jsonfam::finish(record)
}
