// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Document merging
//!
//! Combines canonical documents, keyed by machine name, by recursive
//! union-without-overwrite: keys missing from the accumulator are copied
//! wholesale, mappings present on both sides recurse, and a leaf present
//! on both sides keeps the accumulator's value (under the default
//! policy). This makes merges idempotent and order-independent for
//! disjoint inputs, which is what enables incremental and parallel
//! re-runs across dozens of machines.
//!
//! Merging is gated on the schema version: every input's
//! `vMAJOR.MINOR.PATCH` prefix must match the first input's, or the whole
//! merge fails with no partial result. Schema changes between versions
//! can silently reinterpret fields; a hard failure is the only safe
//! answer.
//!
//! The merged document's generation log is regenerated fresh (this tool's
//! version, new timestamp), never propagated from an input.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Schema-version gate
pub mod gate;
/// Recursive union-without-overwrite
pub mod union;

pub use gate::check_versions;
pub use union::{ConflictPolicy, merge_documents, union_into};
