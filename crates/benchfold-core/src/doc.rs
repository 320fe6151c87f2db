// SPDX-License-Identifier: MIT OR Apache-2.0
//! The canonical nested result document.
//!
//! One document aggregates benchmark results for any number of machines:
//!
//! ```text
//! machine -> os -> testcategory -> benchmark -> thread -> test_name -> metrics
//! ```
//!
//! plus one reserved top-level key (`"generation log"`) holding the schema
//! version and generation timestamp. All mappings preserve insertion order;
//! thread keys are decimal strings and must be parsed for numeric
//! comparison.
//!
//! The document is immutable by convention once written. Absence of a key,
//! never a null or error value, signals "no data yet": incomplete runs are
//! simply omitted.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::machine::MachineInfo;
use crate::version::GenerationLog;

/// Reserved top-level key holding the generation-log record.
pub const GENERATION_LOG_KEY: &str = "generation log";

/// String used for metrics that have no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single numeric metric, or `"N/A"` when the artifact carried none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    /// A present numeric value.
    Number(f64),
    /// Placeholder text, conventionally `"N/A"`.
    Unavailable(String),
}

impl Metric {
    /// The `"N/A"` placeholder.
    #[must_use]
    pub fn missing() -> Self {
        Self::Unavailable(NOT_AVAILABLE.to_string())
    }

    /// Numeric value if present.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<f64> for Metric {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// A sequence of numeric samples, or `"N/A"` when the artifact carried none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    /// Present samples, in artifact order.
    Numbers(Vec<f64>),
    /// Placeholder text, conventionally `"N/A"`.
    Unavailable(String),
}

impl Series {
    /// The `"N/A"` placeholder.
    #[must_use]
    pub fn missing() -> Self {
        Self::Unavailable(NOT_AVAILABLE.to_string())
    }

    /// The samples if present.
    #[must_use]
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Self::Numbers(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<Vec<f64>> for Series {
    fn from(v: Vec<f64>) -> Self {
        Self::Numbers(v)
    }
}

/// One test's outcome within a thread record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Free-form description carried over from the artifact.
    pub description: String,
    /// Aggregated score reported by the benchmark.
    pub values: Metric,
    /// Individual raw samples behind `values`.
    pub raw_values: Series,
    /// Unit string of `values` (drives higher/lower-is-better inference).
    pub unit: String,
    /// Wall-clock seconds attributed to this result.
    pub time: Metric,
    /// Individual run durations behind `time`.
    pub test_run_times: Series,
    /// Dollar cost of the run: `cost_per_hour * time / 3600`, 6 decimals.
    pub cost: f64,
}

impl TestResult {
    /// Cost of a run lasting `time_seconds` on a machine billed at
    /// `cost_per_hour`, rounded to 6 decimal places. `0.0` when no numeric
    /// time is known.
    #[must_use]
    pub fn compute_cost(cost_per_hour: f64, time_seconds: Option<f64>) -> f64 {
        time_seconds.map_or(0.0, |t| {
            crate::artifact::round_dp(cost_per_hour * t / 3600.0, 6)
        })
    }
}

/// CPU-frequency snapshots and optional perf-stat counters for one thread
/// record. Sub-keys are omitted when the corresponding artifact was absent
/// or empty, never present-but-null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerfStat {
    /// `freq_N -> Hz` snapshot taken before the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_freq: Option<IndexMap<String, u64>>,
    /// `freq_N -> Hz` snapshot taken after the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_freq: Option<IndexMap<String, u64>>,
    /// `CPU<n> -> event -> count` parsed from the perf-stat dump, recorded
    /// only by the extractors that consume that artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<IndexMap<String, IndexMap<String, u64>>>,
}

impl PerfStat {
    /// True when no sub-key is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_freq.is_none() && self.end_freq.is_none() && self.events.is_none()
    }
}

/// Results for one benchmark run at one concurrency level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreadRecord {
    /// Frequency snapshots and perf counters.
    #[serde(default, skip_serializing_if = "PerfStat::is_empty")]
    pub perf_stat: PerfStat,
    /// Test-key -> result. Keys follow the `"<title> - <description>"`
    /// convention and must be unique within the record.
    #[serde(default)]
    pub test_name: IndexMap<String, TestResult>,
}

/// One benchmark's runs, keyed by thread count formatted as a decimal
/// string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Thread-count string -> thread record.
    pub thread: IndexMap<String, ThreadRecord>,
}

/// One test category's benchmarks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Benchmark name -> record.
    pub benchmark: IndexMap<String, BenchmarkRecord>,
}

/// One operating system's test categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OsRecord {
    /// Category name -> record.
    pub testcategory: IndexMap<String, CategoryRecord>,
}

/// One machine's static metadata plus its per-OS results.
///
/// The five metadata fields are always present; unresolved machines carry
/// the `CSP = "unknown"` sentinel with `cost_per_hour = 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    /// Static machine metadata.
    #[serde(flatten)]
    pub info: MachineInfo,
    /// OS name -> record.
    #[serde(default)]
    pub os: IndexMap<String, OsRecord>,
}

impl MachineRecord {
    /// A record with the given metadata and no results yet.
    #[must_use]
    pub fn new(info: MachineInfo) -> Self {
        Self {
            info,
            os: IndexMap::new(),
        }
    }
}

/// The canonical document: one generation log plus one entry per machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Schema version and generation timestamp.
    pub generation: GenerationLog,
    /// Machine identifier -> record, in insertion order.
    pub machines: IndexMap<String, MachineRecord>,
}

impl Document {
    /// An empty document stamped with the given generation log.
    #[must_use]
    pub fn new(generation: GenerationLog) -> Self {
        Self {
            generation,
            machines: IndexMap::new(),
        }
    }

    /// Serialize to a `serde_json::Value` with the reserved key first.
    ///
    /// # Errors
    /// Returns [`Error::Serialize`] if any record fails to serialize.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a typed document from a `serde_json::Value`.
    ///
    /// # Errors
    /// Returns [`Error::MissingGenerationLog`] when the reserved key is
    /// absent and [`Error::InvalidDocument`] when a machine subtree does
    /// not match the canonical shape.
    pub fn from_value(value: serde_json::Value, context: &str) -> Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(Error::MissingGenerationLog {
                context: context.to_string(),
            });
        };
        let mut generation = None;
        let mut machines = IndexMap::new();
        for (key, entry) in map {
            if key == GENERATION_LOG_KEY {
                let log: GenerationLog =
                    serde_json::from_value(entry).map_err(|source| Error::InvalidDocument {
                        context: context.to_string(),
                        source,
                    })?;
                generation = Some(log);
            } else {
                let record: MachineRecord =
                    serde_json::from_value(entry).map_err(|source| Error::InvalidDocument {
                        context: format!("{context} (machine {key})"),
                        source,
                    })?;
                machines.insert(key, record);
            }
        }
        let generation = generation.ok_or_else(|| Error::MissingGenerationLog {
            context: context.to_string(),
        })?;
        Ok(Self {
            generation,
            machines,
        })
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.machines.len() + 1))?;
        map.serialize_entry(GENERATION_LOG_KEY, &self.generation)?;
        for (name, record) in &self.machines {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(value, "document").map_err(serde::de::Error::custom)
    }
}
