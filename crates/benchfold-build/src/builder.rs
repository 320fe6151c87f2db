// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical document assembly.
//!
//! Tree mode searches one or more roots for directories whose name is a
//! registered benchmark, places each hit with the hierarchy walker,
//! groups hits by machine, and fans the per-machine builds onto a rayon
//! pool. The per-machine documents are reduced through the merger, whose
//! union is commutative for disjoint machine keys.
//!
//! A benchmark directory producing zero complete threads is dropped
//! entirely, never recorded with an empty thread mapping: absence is the
//! only "no data" signal.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use walkdir::WalkDir;

use benchfold_core::doc::{
    BenchmarkRecord, CategoryRecord, Document, MachineRecord, OsRecord,
};
use benchfold_core::error::Result;
use benchfold_core::machine::{MachineInfo, MachineTable};
use benchfold_core::version::GenerationLog;
use benchfold_extract::registry;
use benchfold_merge::{ConflictPolicy, merge_documents};

use crate::walker::locate;

/// One benchmark directory assigned to a machine/os/category slot.
#[derive(Debug, Clone)]
struct Hit {
    benchmark: String,
    dir: PathBuf,
    os_name: String,
    category_name: String,
}

/// Build the canonical document for every machine found under the given
/// search roots.
///
/// # Errors
/// Only merge-level failures propagate; anything recoverable (unplaceable
/// benchmark directories, incomplete threads) is logged and skipped.
pub fn build_tree(roots: &[PathBuf], table: &MachineTable) -> Result<Document> {
    let mut groups: IndexMap<String, (MachineInfo, Vec<Hit>)> = IndexMap::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    log::warn!("skipping unreadable entry under {}: {err}", root.display());
                    None
                }
            })
        {
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !registry::is_known_benchmark(name) {
                continue;
            }
            let Some(located) = locate(entry.path(), root, table) else {
                log::warn!(
                    "cannot place benchmark directory {} in a machine hierarchy",
                    entry.path().display()
                );
                continue;
            };
            let info = if located.info.is_unknown() {
                // fallback placement: one more resolution attempt on the
                // directory name before accepting the sentinel
                table.resolve(&located.machine_name)
            } else {
                located.info.clone()
            };
            let group = groups
                .entry(located.machine_name.clone())
                .or_insert_with(|| (info, Vec::new()));
            group.1.push(Hit {
                benchmark: name.to_string(),
                dir: entry.path().to_path_buf(),
                os_name: located.os_name,
                category_name: located.category_name,
            });
        }
    }

    let machine_docs: Vec<serde_json::Value> = groups
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter_map(|(machine_name, (info, hits))| {
            let record = build_machine_record(&info, &hits)?;
            let mut doc = Document::new(GenerationLog::now());
            doc.machines.insert(machine_name, record);
            match doc.to_value() {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("dropping unserializable machine document: {e}");
                    None
                }
            }
        })
        .collect();

    let contexts: Vec<String> = (0..machine_docs.len())
        .map(|i| format!("machine document {i}"))
        .collect();
    let merged = merge_documents(machine_docs, &contexts, ConflictPolicy::KeepExisting)?;
    Document::from_value(merged, "built document")
}

/// Legacy fixed 3-level mode: walk `machine/os/category/benchmark`
/// directly from one machine directory, without the hierarchy walker.
///
/// # Errors
/// Propagates serialization failures only; recoverable conditions are
/// logged and skipped as in [`build_tree`].
pub fn build_machine_dir(machine_dir: &Path, table: &MachineTable) -> Result<Document> {
    let machine_name = machine_dir
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let info = table.resolve(&machine_name);

    let mut hits = Vec::new();
    for os_dir in subdirectories(machine_dir) {
        let os_name = dir_name(&os_dir);
        for category_dir in subdirectories(&os_dir) {
            let category_name = dir_name(&category_dir);
            for benchmark_dir in subdirectories(&category_dir) {
                let benchmark = dir_name(&benchmark_dir);
                if registry::is_known_benchmark(&benchmark) {
                    hits.push(Hit {
                        benchmark,
                        dir: benchmark_dir,
                        os_name: os_name.clone(),
                        category_name: category_name.clone(),
                    });
                }
            }
        }
    }

    let mut doc = Document::new(GenerationLog::now());
    if let Some(record) = build_machine_record(&info, &hits) {
        doc.machines.insert(machine_name, record);
    }
    Ok(doc)
}

fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .map(|e| e.path())
        .collect();
    dirs.sort();
    dirs
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
}

/// Extract every hit for one machine into a nested record. `None` when
/// no benchmark produced a complete thread.
fn build_machine_record(info: &MachineInfo, hits: &[Hit]) -> Option<MachineRecord> {
    let mut record = MachineRecord::new(info.clone());
    for hit in hits {
        let thread_ids = benchfold_core::artifact::discover_threads(&hit.dir);
        let mut bench = BenchmarkRecord::default();
        for thread_id in &thread_ids {
            let Some(thread_record) = registry::extract_thread(
                &hit.benchmark,
                &hit.dir,
                thread_id,
                info.cost_per_hour,
            ) else {
                log::warn!(
                    "thread {thread_id} of {} did not complete, skipping",
                    hit.dir.display()
                );
                continue;
            };
            // first complete extraction of a thread id wins
            bench
                .thread
                .entry(thread_id.clone())
                .or_insert(thread_record);
        }
        if bench.thread.is_empty() {
            log::warn!(
                "benchmark directory {} produced no complete threads, dropping",
                hit.dir.display()
            );
            continue;
        }
        let category = record
            .os
            .entry(hit.os_name.clone())
            .or_insert_with(OsRecord::default)
            .testcategory
            .entry(hit.category_name.clone())
            .or_insert_with(CategoryRecord::default);
        let existing = category
            .benchmark
            .entry(hit.benchmark.clone())
            .or_insert_with(BenchmarkRecord::default);
        for (thread_id, thread_record) in bench.thread {
            existing.thread.entry(thread_id).or_insert(thread_record);
        }
    }
    if record.os.is_empty() {
        None
    } else {
        Some(record)
    }
}
