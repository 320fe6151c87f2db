// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-benchmark artifact extractors for benchfold
//!
//! Each supported benchmark has one extractor sharing a single contract:
//!
//! ```text
//! extract(benchmark_dir, thread_id, cost_per_hour) -> Option<ThreadRecord>
//! ```
//!
//! `None` means "this thread did not complete": the artifact was missing,
//! unparseable, or lacked the completion markers the benchmark's format
//! requires. Callers skip `None` silently; a warning goes to the log
//! stream, never an error.
//!
//! Two source-format families, fixed per benchmark:
//!
//! - [`logfam`] - ANSI-colored log text scanned for header/average pairs
//!   (compiler builds and similar long-running benchmarks)
//! - [`jsonfam`] - the small per-thread PTS JSON export (everything else)
//!
//! The [`registry`] is a static table: the set of benchmarks is
//! deliberately closed, so lookup failures are impossible to introduce at
//! runtime.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// One module per supported benchmark
pub mod benchmarks;
/// PTS per-thread JSON export family
pub mod jsonfam;
/// Log-text family (header/average grammars)
pub mod logfam;
/// Static benchmark-name dispatch table
pub mod registry;

pub use registry::{ExtractFn, extract_thread, is_known_benchmark, known_benchmarks};
