// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed Linux kernel compilation.
//!
//! The log interleaves PTS status output with one section per kernel
//! configuration. A section opens with a `Build: <config>` line
//! (`defconfig`, `allmodconfig`) and closes with the averaged build time.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use benchfold_core::doc::ThreadRecord;

use crate::logfam::{LogGrammar, average_seconds_re};

fn grammar() -> &'static LogGrammar {
    static GRAMMAR: OnceLock<LogGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| LogGrammar {
        header: Some(Regex::new(r"^\s*Build:\s*(.+?)\s*$").unwrap()),
        average: average_seconds_re(),
        unit: "Seconds",
        value_is_seconds: true,
    })
}

/// Extract one thread of a kernel-build run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}
