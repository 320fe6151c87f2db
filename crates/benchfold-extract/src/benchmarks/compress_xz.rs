// SPDX-License-Identifier: MIT OR Apache-2.0
//! XZ compression. Like zstd, but each section label carries the
//! direction as well (`Compression Level: 9` / `Decompression`).

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use benchfold_core::doc::ThreadRecord;

use crate::logfam::LogGrammar;

fn grammar() -> &'static LogGrammar {
    static GRAMMAR: OnceLock<LogGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| LogGrammar {
        header: Some(
            Regex::new(r"^\s*((?:Compression Level: \S.*|Decompression.*?))\s*$").unwrap(),
        ),
        average: Regex::new(r"^\s*Average:\s*([0-9]+(?:\.[0-9]+)?)\s*MB/s\b").unwrap(),
        unit: "MB/s",
        value_is_seconds: false,
    })
}

/// Extract one thread of an xz run.
#[must_use]
pub fn extract(benchmark_dir: &Path, thread_id: &str, cost_per_hour: f64) -> Option<ThreadRecord> {
    grammar().extract(benchmark_dir, thread_id, cost_per_hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("8-thread.log"),
            "Compression Level: 9\nAverage: 42.3 MB/s\n\
             Decompression\nAverage: 310.8 MB/s\n",
        )
        .unwrap();
        let record = extract(dir.path(), "8", 0.0).unwrap();
        let keys: Vec<&String> = record.test_name.keys().collect();
        assert_eq!(keys, ["Compression Level: 9", "Decompression"]);
    }
}
