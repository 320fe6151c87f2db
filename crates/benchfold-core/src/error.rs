// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types shared across the benchfold workspace.
//!
//! Recoverable conditions (a missing per-thread artifact, a benchmark
//! directory that produced no complete runs) are *not* errors: they are
//! signalled by absence and logged through the [`log`] facade. The variants
//! here are the fatal, whole-operation failures of the pipeline.

use std::path::PathBuf;

/// Result alias used across the benchfold crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation failed on a path explicitly named by the operator.
    #[error("io error on {path}: {source}")]
    Io {
        /// Path the operation was performed on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An input document failed to parse as JSON. No document survives
    /// partial parsing.
    #[error("malformed JSON in {path}: {source}")]
    MalformedInput {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// An input document does not match the canonical document shape.
    #[error("invalid canonical document in {context}: {source}")]
    InvalidDocument {
        /// Human context: file path or pipeline stage.
        context: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// A document offered for merging lacks the reserved generation-log
    /// record or carries an unparseable version string.
    #[error("missing or invalid generation log in {context}")]
    MissingGenerationLog {
        /// Human context: file path or input index.
        context: String,
    },

    /// Two documents offered for merging carry different schema versions.
    /// Hard precondition: the merge produces no partial result.
    #[error("schema version mismatch: expected {expected}, found {found} in {context}")]
    VersionMismatch {
        /// Version prefix of the first input.
        expected: String,
        /// Version prefix of the mismatching input.
        found: String,
        /// Which input mismatched.
        context: String,
    },

    /// An input file named explicitly by the operator does not exist.
    #[error("missing input file: {path}")]
    MissingInput {
        /// The named path.
        path: PathBuf,
    },

    /// The document this tool itself just wrote failed to re-parse.
    /// Signals a builder/merger bug; the written file must not be trusted.
    #[error("output self-check failed for {path}: {source}")]
    SelfCheck {
        /// Path of the written file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Serialization of an in-memory document failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
