// SPDX-License-Identifier: MIT OR Apache-2.0
//! # benchfold
//!
//! Benchmark result normalization and cross-machine analytics: turns raw
//! per-thread benchmark artifacts (logs, exports, frequency and perf-stat
//! dumps) into one canonical nested JSON document per machine, merges
//! per-machine documents with a schema-version gate, and derives
//! comparative analytics views over the merged result.
//!
//! This is the umbrella crate re-exporting the workspace members:
//!
//! - [`doc`] / [`machine`] / [`artifact`] / [`error`] / [`version`] -
//!   the canonical document model and shared helpers
//! - [`extract`] - per-benchmark artifact extractors behind one registry
//! - [`merge`] - union-without-overwrite merging plus the version gate
//! - [`build`] - directory walking and document assembly
//! - [`analytics`] - performance, cost, scaling and CSP views
//!
//! ## Example
//!
//! ```no_run
//! use benchfold::build::build_tree;
//! use benchfold::machine::MachineTable;
//!
//! # fn main() -> benchfold::error::Result<()> {
//! let table = MachineTable::load();
//! let doc = build_tree(&[std::path::PathBuf::from("runs")], &table)?;
//! println!("{}", serde_json::to_string_pretty(&doc.to_value()?).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

pub use benchfold_core::{artifact, doc, error, machine, version};

pub use benchfold_analytics as analytics;
pub use benchfold_build as build;
pub use benchfold_extract as extract;
pub use benchfold_merge as merge;
