// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end pipeline tests: raw artifact directories through the
//! builder, the merger, and the analytics views.

use std::path::Path;

use benchfold::analytics::{self, Views};
use benchfold::build::build_tree;
use benchfold::doc::{Document, GENERATION_LOG_KEY, Metric};
use benchfold::machine::MachineTable;
use benchfold::merge::{ConflictPolicy, merge_documents};

fn write_redis_export(dir: &Path, thread: &str, value: f64) {
    let export = serde_json::json!({
        "results": {
            "r": {
                "title": "Redis SET",
                "description": "",
                "scale": "Requests Per Second",
                "results": {
                    "local": {
                        "value": value,
                        "raw_values": [value - 1000.0, value + 1000.0],
                        "test_run_times": [110.0, 130.0]
                    }
                }
            }
        }
    });
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(format!("{thread}-thread.json")),
        serde_json::to_string_pretty(&export).unwrap(),
    )
    .unwrap();
}

fn build_one(root: &Path) -> Document {
    build_tree(&[root.to_path_buf()], &MachineTable::default()).unwrap()
}

#[test]
fn test_single_machine_single_benchmark() {
    let tmp = tempfile::tempdir().unwrap();
    write_redis_export(
        &tmp.path().join("aws-m7g/ubuntu-24.04/database/redis"),
        "4",
        120_000.0,
    );

    let doc = build_one(tmp.path());
    assert_eq!(doc.machines.len(), 1);
    let thread = &doc.machines["aws-m7g"].os["ubuntu-24.04"].testcategory["database"]
        .benchmark["redis"]
        .thread["4"];
    assert_eq!(thread.test_name.len(), 1);
    let result = &thread.test_name["Redis SET"];
    assert_eq!(result.values, Metric::Number(120_000.0));
    // median run time 120s at the m7g on-demand rate
    let expected_cost = (2.6112_f64 * 120.0 / 3600.0 * 1e6).round() / 1e6;
    assert!((result.cost - expected_cost).abs() < 1e-12);
}

#[test]
fn test_merge_keeps_disjoint_machines_intact() {
    let tmp = tempfile::tempdir().unwrap();
    let root_a = tmp.path().join("a");
    let root_b = tmp.path().join("b");
    write_redis_export(&root_a.join("aws-m7g/ubuntu-24.04/database/redis"), "4", 120_000.0);
    write_redis_export(&root_b.join("gcp-c4a/ubuntu-24.04/database/redis"), "4", 118_000.0);

    let doc_a = build_one(&root_a).to_value().unwrap();
    let doc_b = build_one(&root_b).to_value().unwrap();
    let contexts = vec!["a".to_string(), "b".to_string()];
    let merged =
        merge_documents(vec![doc_a.clone(), doc_b.clone()], &contexts, ConflictPolicy::default())
            .unwrap();

    let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
    assert_eq!(keys, [GENERATION_LOG_KEY, "aws-m7g", "gcp-c4a"]);
    assert_eq!(merged["aws-m7g"], doc_a["aws-m7g"]);
    assert_eq!(merged["gcp-c4a"], doc_b["gcp-c4a"]);
}

#[test]
fn test_performance_view_over_merged_document() {
    let tmp = tempfile::tempdir().unwrap();
    for (machine, seconds) in [("aws-m7g", 10.0), ("gcp-c4a", 20.0)] {
        let dir = tmp
            .path()
            .join(machine)
            .join("ubuntu-24.04/compilation/build-linux-kernel");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("64-thread.log"),
            format!("Build: defconfig\nAverage: {seconds} Seconds\n"),
        )
        .unwrap();
    }

    let doc = build_one(tmp.path());
    let report = analytics::analyze(
        &doc,
        Views {
            perf: true,
            cost: false,
            scaling: false,
            csp: false,
        },
        None,
    );
    let board = &report["performance_comparison"]["workload"]["compilation"]
        ["build-linux-kernel"]["defconfig"]["ubuntu-24.04"]["64"]["leaderboard"];
    assert_eq!(board[0]["machine"], "aws-m7g");
    assert_eq!(board[0]["relative_performance"], 1.0);
    assert_eq!(board[1]["machine"], "gcp-c4a");
    assert_eq!(board[1]["relative_performance"], 0.5);
}

#[test]
fn test_rebuilding_and_remerging_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    write_redis_export(&tmp.path().join("aws-m7g/ubuntu-24.04/database/redis"), "4", 120_000.0);

    let doc = build_one(tmp.path()).to_value().unwrap();
    let contexts: Vec<String> = (0..3).map(|i| format!("input {i}")).collect();
    let once = merge_documents(
        vec![doc.clone(), doc.clone()],
        &contexts[..2],
        ConflictPolicy::default(),
    )
    .unwrap();
    let twice = merge_documents(
        vec![doc.clone(), doc.clone(), doc],
        &contexts,
        ConflictPolicy::default(),
    )
    .unwrap();
    // generation logs differ by timestamp; the machine payload must not
    assert_eq!(once["aws-m7g"], twice["aws-m7g"]);
}
