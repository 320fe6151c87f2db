// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed LLVM compilation. Sections are labeled by build system
//! (`Build System: Ninja` / `Build System: Unix Makefiles`).

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use benchfold_core::doc::ThreadRecord;

use crate::logfam::{LogGrammar, average_seconds_re};

fn grammar() -> &'static LogGrammar {
    static GRAMMAR: OnceLock<LogGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| LogGrammar {
        header: Some(Regex::new(r"^\s*Build System:\s*(.+?)\s*$").unwrap()),
        average: average_seconds_re(),
        unit: "Seconds",
        value_is_seconds: true,
    })
}

/// Extract one thread of an LLVM-build run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}
