// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and foundational helpers for benchfold
//!
//! This crate provides the foundational types used across the benchfold
//! workspace:
//!
//! - [`error`] - Error types and Result alias
//! - [`doc`] - The canonical nested result document
//! - [`machine`] - Machine-info resolution and the pricing catalog
//! - [`artifact`] - Shared raw-artifact parsing helpers
//! - [`version`] - Schema versioning and generation-log records

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Shared raw-artifact parsing helpers
pub mod artifact;
/// Canonical nested result document
pub mod doc;
/// Error types for benchfold operations
pub mod error;
/// Machine-info resolution against the pricing catalog
pub mod machine;
/// Schema versioning and generation-log records
pub mod version;

// Re-exports for convenience
pub use doc::{
    BenchmarkRecord, CategoryRecord, Document, Metric, OsRecord, PerfStat, Series, TestResult,
    ThreadRecord, GENERATION_LOG_KEY,
};
pub use error::{Error, Result};
pub use machine::{MachineInfo, MachineTable, PricingCatalog};
pub use version::{GenerationLog, SchemaVersion};
