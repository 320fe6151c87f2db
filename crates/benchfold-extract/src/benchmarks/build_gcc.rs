// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed GCC compilation. A single unlabeled run per log, so results get
//! synthetic `Run N` keys.

use std::path::Path;
use std::sync::OnceLock;

use benchfold_core::doc::ThreadRecord;

use crate::logfam::{LogGrammar, average_seconds_re};

fn grammar() -> &'static LogGrammar {
    static GRAMMAR: OnceLock<LogGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| LogGrammar {
        header: None,
        average: average_seconds_re(),
        unit: "Seconds",
        value_is_seconds: true,
    })
}

/// Extract one thread of a GCC-build run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unlabeled_run() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("32-thread.log"),
            "Timed GCC Compilation 13.2\nAverage: 1024.33 Seconds\n",
        )
        .unwrap();
        let record = extract(dir.path(), "32", 0.0).unwrap();
        assert_eq!(record.test_name.len(), 1);
        assert!(record.test_name.contains_key("Run 1"));
    }
}
