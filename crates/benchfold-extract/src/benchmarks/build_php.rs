// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed PHP compilation. Single unlabeled run per log.

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

/// Extract one thread of a PHP-build run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchfold_core::doc::Metric;

    #[test]
    fn test_colored_log() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("8-thread.log"),
            "\x1b[1;34mTimed PHP Compilation 8.3\x1b[0m\n\x1b[32mAverage: 61.42 Seconds\x1b[0m\n",
        )
        .unwrap();
        let record = extract(dir.path(), "8", 0.0).unwrap();
        assert_eq!(record.test_name["Run 1"].values, Metric::Number(61.42));
    }
}
