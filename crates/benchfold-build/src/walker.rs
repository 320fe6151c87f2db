// SPDX-License-Identifier: MIT OR Apache-2.0
//! Upward ancestor search for the machine directory.
//!
//! Benchmark directories sit at varying depth below the machine directory
//! (cloud runs add per-provider or per-date levels), so the machine level
//! cannot be read off a fixed path shape. Starting above the category
//! directory, each ancestor's name is offered to the machine-info
//! resolver; the first one that resolves to a non-unknown machine is the
//! machine directory.
//!
//! Known limitation: `os_name` is the single component directly above the
//! category directory. When more than one level sits between machine and
//! category, the intermediate levels are silently collapsed into that
//! deepest one.

use std::path::Path;

use benchfold_core::machine::{MachineInfo, MachineTable};

/// A benchmark directory placed in the machine/os/category hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Name of the machine directory.
    pub machine_name: String,
    /// Deepest path component between machine and category directories.
    pub os_name: String,
    /// Name of the category directory (parent of the benchmark).
    pub category_name: String,
    /// Resolved machine metadata; the unknown sentinel when the walk
    /// fell back to the grandparent-of-category.
    pub info: MachineInfo,
}

fn name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Locate the machine directory above `benchmark_dir`, searching no
/// higher than `search_root`.
///
/// `None` only when the directory layout is too shallow to carry a
/// category and an os level at all (such hits are skipped by the
/// builder).
#[must_use]
pub fn locate(benchmark_dir: &Path, search_root: &Path, table: &MachineTable) -> Option<Located> {
    let category_dir = benchmark_dir.parent()?;
    let category_name = name_of(category_dir)?;
    let os_dir = category_dir.parent()?;
    let os_name = name_of(os_dir)?;

    let mut candidate = Some(os_dir);
    while let Some(dir) = candidate {
        if dir == search_root {
            break;
        }
        if let Some(name) = name_of(dir) {
            let info = table.resolve(&name);
            if !info.is_unknown() {
                return Some(Located {
                    machine_name: name,
                    os_name,
                    category_name,
                    info,
                });
            }
        }
        candidate = dir.parent();
    }

    // walk exhausted: fall back to grandparent-of-category with the
    // unknown sentinel, leaving re-resolution to the caller
    let machine_dir = os_dir.parent()?;
    Some(Located {
        machine_name: name_of(machine_dir)?,
        os_name,
        category_name,
        info: MachineInfo::unknown(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkdirs(root: &Path, rel: &str) -> std::path::PathBuf {
        let dir = root.join(rel);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_fixed_depth_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let bench = mkdirs(tmp.path(), "aws-m7g/ubuntu-24.04/database/redis");
        let located = locate(&bench, tmp.path(), &MachineTable::default()).unwrap();
        assert_eq!(located.machine_name, "aws-m7g");
        assert_eq!(located.os_name, "ubuntu-24.04");
        assert_eq!(located.category_name, "database");
        assert_eq!(located.info.csp, "AWS");
    }

    #[test]
    fn test_deep_nesting_collapses_os_to_deepest_level() {
        let tmp = tempfile::tempdir().unwrap();
        let bench = mkdirs(tmp.path(), "runs/gcp-c4a/2026-08/ubuntu-24.04/web/nginx");
        let located = locate(&bench, tmp.path(), &MachineTable::default()).unwrap();
        assert_eq!(located.machine_name, "gcp-c4a");
        // the 2026-08 level silently collapses away
        assert_eq!(located.os_name, "ubuntu-24.04");
        assert_eq!(located.info.csp, "GCP");
    }

    #[test]
    fn test_unresolvable_ancestry_falls_back_to_grandparent() {
        let tmp = tempfile::tempdir().unwrap();
        let bench = mkdirs(tmp.path(), "lab-box/fedora-42/cpu/coremark");
        let located = locate(&bench, tmp.path(), &MachineTable::default()).unwrap();
        assert_eq!(located.machine_name, "lab-box");
        assert_eq!(located.os_name, "fedora-42");
        assert!(located.info.is_unknown());
    }
}
