// SPDX-License-Identifier: MIT OR Apache-2.0
//! The schema-version gate.

use serde_json::Value;

use benchfold_core::doc::GENERATION_LOG_KEY;
use benchfold_core::error::{Error, Result};
use benchfold_core::version::SchemaVersion;

/// Schema version carried by a document's generation log.
///
/// # Errors
/// [`Error::MissingGenerationLog`] when the reserved key or its
/// `version info` field is absent or unparseable.
pub fn schema_version_of(doc: &Value, context: &str) -> Result<SchemaVersion> {
    let version_info = doc
        .get(GENERATION_LOG_KEY)
        .and_then(|log| log.get("version info"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingGenerationLog {
            context: context.to_string(),
        })?;
    SchemaVersion::parse(version_info)
}

/// Verify that every document shares the first document's schema version
/// prefix. Hard precondition for merging: any mismatch fails the whole
/// operation before any output exists.
///
/// `contexts` labels each document for error messages (file paths in the
/// CLI, input indices elsewhere); documents beyond the end of `contexts`
/// fall back to an index label.
///
/// # Errors
/// [`Error::VersionMismatch`] naming the offending input, or
/// [`Error::MissingGenerationLog`] for a document without a version.
pub fn check_versions(docs: &[Value], contexts: &[String]) -> Result<()> {
    let context_of = |i: usize| {
        contexts
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("input {i}"))
    };
    let Some(first) = docs.first() else {
        return Ok(());
    };
    let expected = schema_version_of(first, &context_of(0))?;
    for (i, doc) in docs.iter().enumerate().skip(1) {
        let found = schema_version_of(doc, &context_of(i))?;
        if found != expected {
            return Err(Error::VersionMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
                context: context_of(i),
            });
        }
    }
    Ok(())
}
