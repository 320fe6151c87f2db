// SPDX-License-Identifier: MIT OR Apache-2.0
//! # benchfold-cli
//!
//! Command-line interface for benchfold - benchmark result normalization
//! and cross-machine analytics.
//!
//! ## Installation
//!
//! ```bash
//! cargo install benchfold-cli
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Build a result document from one or more search roots
//! benchfold build runs/ -o m7g_result.json
//!
//! # Build from a fixed machine/os/category/benchmark layout
//! benchfold build --legacy-machine-dir runs/aws-m7g -o m7g_result.json
//!
//! # Merge per-machine documents (output must not be named result.json)
//! benchfold merge m7g_result.json c4a_result.json -o merged.json
//!
//! # All four analytics views
//! benchfold analyze merged.json -o report.json
//!
//! # Only the cost view, restricted to one test category
//! benchfold analyze merged.json --cost --testcategory database
//! ```
//!
//! Logging goes to stderr via `env_logger`; set `RUST_LOG=debug` for
//! per-artifact detail.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
