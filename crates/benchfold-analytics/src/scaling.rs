// SPDX-License-Identifier: MIT OR Apache-2.0
//! Thread-scaling curves.
//!
//! Groups by `(category, benchmark, test)` only, collapsing OS and
//! machine into one series per `"machine (isa)"` label. Every series is
//! normalized against its own value at its highest thread count, to a
//! 0-100 scale, so curve shapes compare across machines regardless of
//! absolute magnitude. A series needs at least two distinct thread counts
//! to show a curve.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use benchfold_core::doc::Document;

use crate::common::{self, lower_is_better, round2, sort_threads};

const DESCRIPTION: &str =
    "Per-test scaling curves, one series per machine, normalized to 100 at each \
     machine's own highest thread count";

/// Build the `thread_scaling_comparison` view.
#[must_use]
pub fn thread_scaling_comparison(doc: &Document, testcategory: Option<&str>) -> Value {
    // (category, benchmark, test) -> series label -> thread -> score
    let mut groups: IndexMap<(String, String, String), (String, IndexMap<String, IndexMap<String, f64>>)> =
        IndexMap::new();
    for sample in common::samples(doc, testcategory) {
        let Some(score) = sample.score() else {
            continue;
        };
        let label = format!("{} ({})", sample.machine, sample.info.cpu_isa);
        let group = groups
            .entry((
                sample.category.to_string(),
                sample.benchmark.to_string(),
                sample.test.to_string(),
            ))
            .or_insert_with(|| (sample.result.unit.clone(), IndexMap::new()));
        group
            .1
            .entry(label)
            .or_default()
            .entry(sample.thread.to_string())
            .or_insert(score);
    }

    let mut workload = Map::new();
    for ((category, benchmark, test), (unit, series)) in groups {
        let lower = lower_is_better(&unit);
        let mut curves = Map::new();
        for (label, points) in series {
            if points.len() < 2 {
                log::debug!("dropping single-point scaling series for {label}");
                continue;
            }
            let mut threads: Vec<&str> = points.keys().map(String::as_str).collect();
            sort_threads(&mut threads);
            let Some(max_thread) = threads.last().copied() else {
                continue;
            };
            let max_value = points[max_thread];
            if max_value <= 0.0 {
                continue;
            }
            let mut curve = Map::new();
            for thread in threads {
                let value = points[thread];
                let normalized = if lower {
                    max_value / value * 100.0
                } else {
                    value / max_value * 100.0
                };
                let Some(n) = Number::from_f64(round2(normalized)) else {
                    continue;
                };
                curve.insert(thread.to_string(), Value::Number(n));
            }
            curves.insert(label, Value::Object(curve));
        }
        if curves.is_empty() {
            continue;
        }
        let leaf = common::nest(&mut workload, &[&category, &benchmark, &test]);
        leaf.insert("unit".to_string(), Value::String(unit));
        leaf.insert("curves".to_string(), Value::Object(curves));
    }
    common::view(DESCRIPTION, workload)
}
