// SPDX-License-Identifier: MIT OR Apache-2.0
//! The flat sample stream and scoring rules shared by every view.

use benchfold_core::doc::{Document, TestResult};
use benchfold_core::machine::MachineInfo;
use serde_json::{Map, Value};

/// One test result with its full coordinate set, borrowed from the
/// document.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    /// Machine identifier (document key).
    pub machine: &'a str,
    /// Resolved machine metadata.
    pub info: &'a MachineInfo,
    /// OS name.
    pub os: &'a str,
    /// Test category.
    pub category: &'a str,
    /// Benchmark name.
    pub benchmark: &'a str,
    /// Thread-count label (decimal string).
    pub thread: &'a str,
    /// Test key within the thread record.
    pub test: &'a str,
    /// The result itself.
    pub result: &'a TestResult,
}

impl Sample<'_> {
    /// Numeric score, when the result carries one.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.result.values.as_number()
    }
}

/// Flatten a document into samples, in document order, optionally
/// restricted to one test category (exact, case-sensitive match).
#[must_use]
pub fn samples<'a>(doc: &'a Document, testcategory: Option<&str>) -> Vec<Sample<'a>> {
    let mut out = Vec::new();
    for (machine, machine_record) in &doc.machines {
        for (os, os_record) in &machine_record.os {
            for (category, category_record) in &os_record.testcategory {
                if testcategory.is_some_and(|want| want != category) {
                    continue;
                }
                for (benchmark, bench_record) in &category_record.benchmark {
                    for (thread, thread_record) in &bench_record.thread {
                        for (test, result) in &thread_record.test_name {
                            out.push(Sample {
                                machine,
                                info: &machine_record.info,
                                os,
                                category,
                                benchmark,
                                thread,
                                test,
                                result,
                            });
                        }
                    }
                }
            }
        }
    }
    out
}

/// Direction inference from the unit string: duration-like units
/// ("second", "microsecond") mean a smaller score is better, unless the
/// unit is a rate ("per second").
#[must_use]
pub fn lower_is_better(unit: &str) -> bool {
    let unit = unit.to_ascii_lowercase();
    (unit.contains("second") || unit.contains("microsecond")) && !unit.contains("per second")
}

/// Economic efficiency: throughput per dollar-hour, where throughput is
/// the score itself (higher-is-better) or its reciprocal
/// (lower-is-better). `None` without a positive score and a positive
/// hourly cost.
#[must_use]
pub fn efficiency(score: f64, lower: bool, cost_per_hour: f64) -> Option<f64> {
    if score <= 0.0 || cost_per_hour <= 0.0 {
        return None;
    }
    let throughput = if lower { 1.0 / score } else { score };
    Some(throughput / cost_per_hour)
}

/// Round to 2 decimal places.
#[must_use]
pub fn round2(x: f64) -> f64 {
    benchfold_core::artifact::round_dp(x, 2)
}

/// Walk (creating as needed) a nested object path and return the leaf
/// map. Every intermediate level is an object.
pub fn nest<'a>(root: &'a mut Map<String, Value>, path: &[&str]) -> &'a mut Map<String, Value> {
    let mut current = root;
    for key in path {
        let entry = current
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(map) => current = map,
            // only reachable if a caller mixed leaf and branch keys
            other => {
                *other = Value::Object(Map::new());
                let Value::Object(map) = other else {
                    unreachable!()
                };
                current = map;
            }
        }
    }
    current
}

/// Wrap a workload object with its human-readable description.
#[must_use]
pub fn view(description: &str, workload: Map<String, Value>) -> Value {
    let mut out = Map::new();
    out.insert(
        "description".to_string(),
        Value::String(description.to_string()),
    );
    out.insert("workload".to_string(), Value::Object(workload));
    Value::Object(out)
}

/// Sort thread-count labels numerically, non-numeric labels last.
pub fn sort_threads(threads: &mut [&str]) {
    threads.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_is_better_inference() {
        assert!(lower_is_better("Seconds"));
        assert!(lower_is_better("Microseconds"));
        assert!(!lower_is_better("Requests Per Second"));
        assert!(!lower_is_better("MB/s"));
        assert!(!lower_is_better("Iterations Per Second"));
    }

    #[test]
    fn test_efficiency_requires_positive_inputs() {
        assert_eq!(efficiency(100.0, false, 2.0), Some(50.0));
        assert_eq!(efficiency(4.0, true, 0.5), Some(0.5));
        assert_eq!(efficiency(100.0, false, 0.0), None);
        assert_eq!(efficiency(0.0, false, 2.0), None);
        assert_eq!(efficiency(-1.0, true, 2.0), None);
    }

    #[test]
    fn test_sort_threads_numeric() {
        let mut threads = vec!["16", "2", "4", "x"];
        sort_threads(&mut threads);
        assert_eq!(threads, ["2", "4", "16", "x"]);
    }
}
