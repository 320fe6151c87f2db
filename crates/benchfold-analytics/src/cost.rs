// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cost-efficiency rankings.
//!
//! Same grouping as the performance view, ranked by economic efficiency
//! (throughput per dollar-hour) instead of raw score. Machines without a
//! positive hourly cost carry no pricing signal and are left out.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use benchfold_core::doc::Document;

use crate::common::{self, Sample, efficiency, lower_is_better, round2};

const DESCRIPTION: &str =
    "Machines ranked per test by economic efficiency (throughput per dollar-hour); \
     relative_cost_efficiency is against the group winner";

/// Build the `cost_comparison` view.
#[must_use]
pub fn cost_comparison(doc: &Document, testcategory: Option<&str>) -> Value {
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
        let mut ranked: Vec<(&Sample<'_>, f64)> = samples
            .iter()
            .filter_map(|s| {
                let score = s.score()?;
                let eff = efficiency(score, lower, s.info.cost_per_hour)?;
                Some((s, eff))
            })
            .collect();
        if ranked.is_empty() {
            continue;
        }
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        let best = ranked[0].1;
        let ranking: Vec<Value> = ranked
            .iter()
            .map(|(sample, eff)| {
                json!({
                    "machine": sample.machine,
                    "hourly_cost": sample.info.cost_per_hour,
                    "efficiency": benchfold_core::artifact::round_dp(*eff, 6),
                    "relative_cost_efficiency": round2(eff / best),
                })
            })
            .collect();
        let leaf = common::nest(
            &mut workload,
            &[&category, &benchmark, &test, &os, &thread],
        );
        leaf.insert("unit".to_string(), Value::String(unit));
        leaf.insert("ranking".to_string(), Value::Array(ranking));
    }
    common::view(DESCRIPTION, workload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{Row, document};

    fn row<'a>(machine: &'a str, value: f64) -> Row<'a> {
        Row {
            machine,
            os: "ubuntu-24.04",
            category: "database",
            benchmark: "redis",
            thread: "8",
            test: "Redis GET",
            unit: "Requests Per Second",
            value,
        }
    }

    fn ranking(view: &Value) -> &Vec<Value> {
        view["workload"]["database"]["redis"]["Redis GET"]["ubuntu-24.04"]["8"]["ranking"]
            .as_array()
            .unwrap()
    }

    #[test]
    fn test_cheaper_machine_can_win_on_efficiency() {
        // c4a is slower in absolute terms but cheaper per hour
        let doc = document(&[row("aws-m7g", 120_000.0), row("gcp-c4a", 118_000.0)]);
        let view = cost_comparison(&doc, None);
        let ranked = ranking(&view);
        // m7g: 120000 / 2.6112 ~ 45955; c4a: 118000 / 2.48986 ~ 47392
        assert_eq!(ranked[0]["machine"], "gcp-c4a");
        assert_eq!(ranked[0]["relative_cost_efficiency"], 1.0);
        assert_eq!(ranked[1]["machine"], "aws-m7g");
        assert!(ranked[1]["relative_cost_efficiency"].as_f64().unwrap() < 1.0);
    }

    #[test]
    fn test_unpriced_machines_are_left_out() {
        let doc = document(&[row("aws-m7g", 120_000.0), row("lab-box", 150_000.0)]);
        let view = cost_comparison(&doc, None);
        let ranked = ranking(&view);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0]["machine"], "aws-m7g");
    }

    #[test]
    fn test_group_with_no_priced_machine_is_absent() {
        let doc = document(&[row("lab-box", 150_000.0)]);
        let view = cost_comparison(&doc, None);
        assert!(view["workload"].as_object().unwrap().is_empty());
    }
}
