// SPDX-License-Identifier: MIT OR Apache-2.0
//! CSP/architecture trends.
//!
//! Groups by `(category, benchmark, test)` and then by inferred cloud
//! provider. Within each provider group one machine is designated the
//! ARM64 baseline (name contains `m8g`, `c4a` or `a1.flex`); every other
//! machine is expressed as per-thread relative efficiency against it,
//! with three derived insights. Provider groups without a baseline carry
//! no reference point and are skipped.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value, json};

use benchfold_core::doc::{Document, NOT_AVAILABLE};

use crate::common::{self, efficiency, lower_is_better, round2, sort_threads};

const DESCRIPTION: &str =
    "Per-provider efficiency of each machine relative to that provider's ARM64 \
     baseline instance, per thread count";

/// Name substrings identifying an ARM64 baseline instance.
const BASELINE_MARKERS: &[&str] = &["m8g", "c4a", "a1.flex"];

/// Infer the cloud provider from the machine name. Explicitly a
/// heuristic table, kept as data so a new shape is one row.
#[must_use]
pub fn infer_provider(machine_name: &str) -> &'static str {
    const RULES: &[(&str, &str)] = &[
        ("aws", "AWS"),
        ("m7", "AWS"),
        ("m8", "AWS"),
        ("gcp", "GCP"),
        ("oci", "OCI"),
    ];
    if machine_name.trim().is_empty() {
        return "Unknown";
    }
    let name = machine_name.to_ascii_lowercase();
    for (marker, provider) in RULES {
        if name.contains(marker) {
            return provider;
        }
    }
    "Local/Other"
}

fn is_baseline(machine_name: &str) -> bool {
    let name = machine_name.to_ascii_lowercase();
    BASELINE_MARKERS.iter().any(|marker| name.contains(marker))
}

/// thread -> efficiency, per machine.
type EfficiencySeries = IndexMap<String, f64>;

/// Build the `csp_instance_comparison` view.
#[must_use]
pub fn csp_instance_comparison(doc: &Document, testcategory: Option<&str>) -> Value {
    // (category, benchmark, test) -> unit + provider -> machine -> series
    #[allow(clippy::type_complexity)]
    let mut groups: IndexMap<
        (String, String, String),
        (String, IndexMap<&'static str, IndexMap<String, EfficiencySeries>>),
    > = IndexMap::new();
    for sample in common::samples(doc, testcategory) {
        let provider = infer_provider(sample.machine);
        if provider == "Unknown" {
            continue;
        }
        let Some(score) = sample.score() else {
            continue;
        };
        let lower = lower_is_better(&sample.result.unit);
        let Some(eff) = efficiency(score, lower, sample.info.cost_per_hour) else {
            continue;
        };
        let group = groups
            .entry((
                sample.category.to_string(),
                sample.benchmark.to_string(),
                sample.test.to_string(),
            ))
            .or_insert_with(|| (sample.result.unit.clone(), IndexMap::new()));
        group
            .1
            .entry(provider)
            .or_default()
            .entry(sample.machine.to_string())
            .or_default()
            .entry(sample.thread.to_string())
            .or_insert(eff);
    }

    let mut workload = Map::new();
    for ((category, benchmark, test), (unit, providers)) in groups {
        let mut trends = Map::new();
        for (provider, machines) in providers {
            let Some(baseline_name) = machines.keys().find(|name| is_baseline(name)).cloned()
            else {
                log::debug!("{provider} group for {benchmark}/{test} has no ARM64 baseline");
                continue;
            };
            let baseline = machines[&baseline_name].clone();
            let mut compared = Map::new();
            for (machine, series) in &machines {
                if *machine == baseline_name {
                    continue;
                }
                if let Some(entry) = compare_to_baseline(series, &baseline) {
                    compared.insert(machine.clone(), entry);
                }
            }
            if compared.is_empty() {
                continue;
            }
            trends.insert(
                provider.to_string(),
                json!({"baseline": baseline_name, "machines": compared}),
            );
        }
        if trends.is_empty() {
            continue;
        }
        let leaf = common::nest(&mut workload, &[&category, &benchmark, &test]);
        leaf.insert("unit".to_string(), Value::String(unit));
        leaf.insert("trends".to_string(), Value::Object(trends));
    }
    common::view(DESCRIPTION, workload)
}

/// Relative efficiency of one machine against the baseline, restricted to
/// thread counts both sides ran. `None` without a shared thread count.
fn compare_to_baseline(series: &EfficiencySeries, baseline: &EfficiencySeries) -> Option<Value> {
    let mut threads: Vec<&str> = series
        .keys()
        .filter(|t| baseline.contains_key(t.as_str()))
        .map(String::as_str)
        .collect();
    if threads.is_empty() {
        return None;
    }
    sort_threads(&mut threads);

    let mut relative = Map::new();
    let mut points: Vec<(String, f64)> = Vec::with_capacity(threads.len());
    for thread in threads {
        let base = baseline[thread];
        if base <= 0.0 {
            continue;
        }
        let rel = round2(series[thread] / base * 100.0);
        let n = Number::from_f64(rel)?;
        relative.insert(thread.to_string(), Value::Number(n));
        points.push((thread.to_string(), rel));
    }
    if points.is_empty() {
        return None;
    }

    Some(json!({
        "relative_efficiency": relative,
        "insights": insights(&points),
    }))
}

/// The three derived insight fields over an ordered relative-efficiency
/// sequence.
fn insights(points: &[(String, f64)]) -> Value {
    let max_advantage_thread = points
        .iter()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or_else(|| NOT_AVAILABLE.to_string(), |(t, _)| t.clone());

    let crossing = points
        .windows(2)
        .find(|pair| {
            let before = pair[0].1 - 100.0;
            let after = pair[1].1 - 100.0;
            (before < 0.0 && after > 0.0) || (before > 0.0 && after < 0.0)
        })
        .map_or_else(
            || NOT_AVAILABLE.to_string(),
            |pair| format!("{}->{}", pair[0].0, pair[1].0),
        );

    let trend = match (points.first(), points.last()) {
        (Some((_, first)), Some((_, last))) if *last > first * 1.05 => {
            "improving_relative_to_arm"
        }
        (Some((_, first)), Some((_, last))) if *last < first * 0.95 => {
            "declining_relative_to_arm"
        }
        _ => "consistent",
    };

    json!({
        "max_advantage_thread": max_advantage_thread,
        "boundary_crossing": crossing,
        "trend": trend,
    })
}
