// SPDX-License-Identifier: MIT OR Apache-2.0
//! Performance leaderboards.
//!
//! Groups results by `(category, benchmark, test, os, thread)` and ranks
//! the machines in each group by score, best first. `relative_performance`
//! expresses every entry against the group winner, so the winner is always
//! `1.0` and everything else at most `1.0`.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use benchfold_core::doc::Document;

use crate::common::{self, Sample, lower_is_better, round2};

const DESCRIPTION: &str =
    "Machines ranked per test at matching OS and thread count; relative_performance is \
     against the group winner";

/// Build the `performance_comparison` view.
#[must_use]
pub fn performance_comparison(doc: &Document, testcategory: Option<&str>) -> Value {
    let mut groups: IndexMap<(String, String, String, String, String), Vec<Sample<'_>>> =
        IndexMap::new();
    for sample in common::samples(doc, testcategory) {
        groups
            .entry((
                sample.category.to_string(),
                sample.benchmark.to_string(),
                sample.test.to_string(),
                sample.os.to_string(),
                sample.thread.to_string(),
            ))
            .or_default()
            .push(sample);
    }

    let mut workload = Map::new();
    for ((category, benchmark, test, os, thread), samples) in groups {
        let Some(unit) = samples.first().map(|s| s.result.unit.clone()) else {
            continue;
        };
        let lower = lower_is_better(&unit);
        let mut scored: Vec<(&Sample<'_>, f64)> = samples
            .iter()
            .filter_map(|s| s.score().map(|score| (s, score)))
            .collect();
        if scored.is_empty() {
            continue;
        }
        scored.sort_by(|(_, a), (_, b)| {
            if lower {
                a.total_cmp(b)
            } else {
                b.total_cmp(a)
            }
        });
        let best = scored[0].1;
        let leaderboard: Vec<Value> = scored
            .iter()
            .map(|(sample, score)| {
                let relative = if lower { best / score } else { score / best };
                json!({
                    "machine": sample.machine,
                    "cpu_name": sample.info.cpu_name,
                    "score": score,
                    "relative_performance": round2(relative),
                })
            })
            .collect();
        let leaf = common::nest(
            &mut workload,
            &[&category, &benchmark, &test, &os, &thread],
        );
        leaf.insert("unit".to_string(), Value::String(unit));
        leaf.insert("leaderboard".to_string(), Value::Array(leaderboard));
    }
    common::view(DESCRIPTION, workload)
}
