// SPDX-License-Identifier: MIT OR Apache-2.0
//! Schema versioning and the generation-log record.
//!
//! Every canonical document carries a reserved `"generation log"` entry:
//! a version string of the form `vMAJOR.MINOR.PATCH[-suffix]` plus the
//! generation timestamp. Merging compares only the `vMAJOR.MINOR.PATCH`
//! prefix; schema changes between versions can silently reinterpret
//! fields, so a mismatch is a hard failure.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three-part schema version prefix of a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl SchemaVersion {
    /// Parse the `vMAJOR.MINOR.PATCH` prefix of a version string,
    /// ignoring any `-suffix`.
    ///
    /// # Errors
    /// Returns [`Error::MissingGenerationLog`] when the string does not
    /// start with a well-formed `vX.Y.Z` prefix.
    pub fn parse(version_info: &str) -> Result<Self> {
        let invalid = || Error::MissingGenerationLog {
            context: format!("unparseable version string {version_info:?}"),
        };
        let rest = version_info.strip_prefix('v').ok_or_else(invalid)?;
        let prefix = rest.split('-').next().ok_or_else(invalid)?;
        let mut parts = prefix.split('.');
        let mut next = || -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(invalid)
        };
        let version = Self {
            major: next()?,
            minor: next()?,
            patch: next()?,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The reserved generation-log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationLog {
    /// Tool version string, `vX.Y.Z-g<hash>`.
    #[serde(rename = "version info")]
    pub version_info: String,
    /// Generation timestamp, `YYYYMMDD-HHMMSS`.
    pub date: String,
}

impl GenerationLog {
    /// A fresh record stamped with this tool's version and the current
    /// local time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            version_info: tool_version(),
            date: chrono::Local::now().format("%Y%m%d-%H%M%S").to_string(),
        }
    }

    /// Schema version prefix of this record.
    ///
    /// # Errors
    /// Propagates the parse error for a malformed version string.
    pub fn schema_version(&self) -> Result<SchemaVersion> {
        SchemaVersion::parse(&self.version_info)
    }
}

/// This tool's own version string, `vX.Y.Z-g<hash>`. The build hash falls
/// back to `local` when the build environment provides none.
#[must_use]
pub fn tool_version() -> String {
    let hash = option_env!("BENCHFOLD_BUILD_HASH").unwrap_or("local");
    format!("v{}-g{hash}", env!("CARGO_PKG_VERSION"))
}
