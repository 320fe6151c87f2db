// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Document building
//!
//! Drives the extractors over a directory tree to assemble the canonical
//! nested document:
//!
//! - [`walker`] - finds the machine directory above a benchmark directory
//!   when the nesting depth is not fixed (cloud runs nest the machine name
//!   at varying depth)
//! - [`builder`] - tree mode (search roots, rayon fan-out per machine,
//!   reduce through the merger) and the legacy fixed 3-level mode
//!
//! Extraction of each benchmark directory is independent of every other,
//! so per-machine builds are an embarrassingly parallel map with a
//! merge-reduce at the end.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Canonical document assembly
pub mod builder;
/// Machine-directory location above benchmark directories
pub mod walker;

pub use builder::{build_machine_dir, build_tree};
pub use walker::{Located, locate};
