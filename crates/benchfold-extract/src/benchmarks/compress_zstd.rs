// SPDX-License-Identifier: MIT OR Apache-2.0
//! Zstandard compression.
//!
//! Sections are labeled by compression level (`Compression Level: 8`,
//! `Compression Level: 19, Long Mode`) and average a throughput, not a
//! duration, so no run time is attributed to the results.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use benchfold_core::doc::ThreadRecord;

use crate::logfam::LogGrammar;

fn grammar() -> &'static LogGrammar {
    static GRAMMAR: OnceLock<LogGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| LogGrammar {
        header: Some(Regex::new(r"^\s*Compression Level:\s*(.+?)\s*$").unwrap()),
        average: Regex::new(r"^\s*Average:\s*([0-9]+(?:\.[0-9]+)?)\s*MB/s\b").unwrap(),
        unit: "MB/s",
        value_is_seconds: false,
    })
}

/// Extract one thread of a zstd run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchfold_core::doc::{Metric, Series};

    #[test]
    fn test_levels_become_keys_and_no_time_is_attributed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("16-thread.log"),
            "Compression Level: 8\nAverage: 1250.4 MB/s\n\
             Compression Level: 19, Long Mode\nAverage: 96.1 MB/s\n",
        )
        .unwrap();
        let record = extract(dir.path(), "16", 2.5).unwrap();
        let r = &record.test_name["19, Long Mode"];
        assert_eq!(r.values, Metric::Number(96.1));
        assert_eq!(r.time, Metric::missing());
        assert_eq!(r.test_run_times, Series::missing());
        assert!((r.cost - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seconds_average_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("4-thread.log"),
            "Compression Level: 3\nAverage: 12.0 Seconds\n",
        )
        .unwrap();
        assert!(extract(dir.path(), "4", 0.0).is_none());
    }
}
