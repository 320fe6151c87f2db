// SPDX-License-Identifier: MIT OR Apache-2.0
//! The log-text family.
//!
//! Compiler builds and similar long-running benchmarks leave only a
//! `<thread>-thread.log`: ANSI-colored text where a benchmark-specific
//! header line (build target, compression level) is followed, within the
//! same section, by an `Average: <float> <unit>` line. Each header/average
//! pair becomes one test result; an average with no preceding header gets
//! a synthetic `Run N` label, N incrementing per thread record.
//!
//! Benchmark modules own their grammar (header and average regexes and
//! the unit); the pairing scan, ANSI stripping, and record assembly live
//! here.

use std::fs;
use std::path::Path;

use regex::Regex;

use benchfold_core::artifact::strip_ansi;
use benchfold_core::doc::{Metric, Series, TestResult, ThreadRecord};

use crate::jsonfam::{attach_freq, insert_unique};

/// One benchmark's log grammar.
#[derive(Debug)]
pub struct LogGrammar {
    /// Header regex with one capture group for the section label, or
    /// `None` for logs whose runs are never labeled.
    pub header: Option<Regex>,
    /// Average regex with one capture group for the float value.
    pub average: Regex,
    /// Unit of the averaged value.
    pub unit: &'static str,
    /// Whether the averaged value is itself the run time in seconds
    /// (drives cost attribution for duration-unit grammars).
    pub value_is_seconds: bool,
}

impl LogGrammar {
    /// Run the grammar over one thread's log.
    ///
    /// `None` when the log is missing or contains no average line (the
    /// average is the family's completion marker).
    #[must_use]
    pub fn extract(
        &self,
        benchmark_dir: &Path,
        thread_id: &str,
        cost_per_hour: f64,
    ) -> Option<ThreadRecord> {
        let path = benchmark_dir.join(format!("{thread_id}-thread.log"));
        let text = fs::read_to_string(&path).ok()?;
        let text = strip_ansi(&text);

        let mut record = ThreadRecord::default();
        let mut pending_label: Option<String> = None;
        let mut synthetic = 0u32;
        for line in text.lines() {
            if let Some(header) = &self.header
                && let Some(caps) = header.captures(line)
            {
                pending_label = Some(caps[1].trim().to_string());
                continue;
            }
            if let Some(caps) = self.average.captures(line) {
                let Ok(value) = caps[1].parse::<f64>() else {
                    log::warn!("unparseable average in {}: {line}", path.display());
                    continue;
                };
                let (key, description) = match pending_label.take() {
                    Some(label) => (label.clone(), label),
                    None => {
                        synthetic += 1;
                        (format!("Run {synthetic}"), String::new())
                    }
                };
                let time_seconds = self.value_is_seconds.then_some(value);
                let result = TestResult {
                    description,
                    values: Metric::Number(value),
                    raw_values: Series::missing(),
                    unit: self.unit.to_string(),
                    time: time_seconds.map_or_else(Metric::missing, Metric::Number),
                    test_run_times: Series::missing(),
                    cost: TestResult::compute_cost(cost_per_hour, time_seconds),
                };
                insert_unique(&mut record, key, result);
            }
        }

        if record.test_name.is_empty() {
            return None;
        }
        attach_freq(benchmark_dir, thread_id, &mut record);
        Some(record)
    }
}

/// The `Average: <float> Seconds` line shared by the compiler-build
/// grammars.
#[must_use]
pub fn average_seconds_re() -> Regex {
    Regex::new(r"^\s*Average:\s*([0-9]+(?:\.[0-9]+)?)\s*Seconds\b").unwrap()
}
