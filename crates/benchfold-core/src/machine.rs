// SPDX-License-Identifier: MIT OR Apache-2.0
//! Machine-info resolution.
//!
//! Maps a machine identifier string to static metadata (cloud provider,
//! vCPU count, CPU model/ISA, hourly cost) via substring matching against
//! a small ordered lookup table. Resolution never fails: unmatched names
//! get the `"unknown"` sentinel record, and downstream code depends on all
//! five metadata fields always being present.
//!
//! Hourly costs are resolved once, at table construction, against a
//! pricing catalog (built-in defaults, optionally overlaid from a JSON
//! file named by `BENCHFOLD_PRICING`), then rounded half-up to 5 decimal
//! places.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::round_half_up;
use crate::error::{Error, Result};

/// Static metadata for one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineInfo {
    /// Cloud service provider, or `"unknown"`.
    #[serde(rename = "CSP")]
    pub csp: String,
    /// Total vCPU count of the instance.
    pub total_vcpu: u32,
    /// CPU model name.
    pub cpu_name: String,
    /// CPU instruction-set architecture.
    pub cpu_isa: String,
    /// Hourly cost in dollars; `0.0` for local or unresolved machines.
    pub cost_per_hour: f64,
}

impl MachineInfo {
    /// The sentinel record for unresolved machines.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            csp: "unknown".to_string(),
            total_vcpu: 0,
            cpu_name: "unknown".to_string(),
            cpu_isa: "unknown".to_string(),
            cost_per_hour: 0.0,
        }
    }

    /// Whether this is the unresolved sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.csp == "unknown"
    }
}

/// One pricing-catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingEntry {
    /// Provider name, e.g. `"AWS"`.
    pub provider: String,
    /// Instance type, e.g. `"m7g.16xlarge"`.
    pub instance_type: String,
    /// Optional machine-name substring this price is restricted to.
    #[serde(default)]
    pub name_filter: Option<String>,
    /// Hourly cost in dollars.
    pub cost_per_hour: f64,
}

/// Pricing catalog consulted when the machine table is constructed.
#[derive(Debug, Clone, Default)]
pub struct PricingCatalog {
    entries: Vec<PricingEntry>,
}

impl PricingCatalog {
    /// The built-in on-demand price list (us-east-1 / us-central1 /
    /// us-ashburn-1 list prices, checked manually).
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |provider: &str, instance: &str, cost: f64| PricingEntry {
            provider: provider.to_string(),
            instance_type: instance.to_string(),
            name_filter: None,
            cost_per_hour: cost,
        };
        Self {
            entries: vec![
                entry("AWS", "m7g.16xlarge", 2.6112),
                entry("AWS", "m7g.metal", 2.6112),
                entry("AWS", "m8g.16xlarge", 2.873_28),
                entry("AWS", "m7i.16xlarge", 3.2256),
                entry("AWS", "m8i.16xlarge", 3.386_88),
                entry("AWS", "m7a.16xlarge", 3.709_44),
                entry("GCP", "c4a-standard-64", 2.489_86),
                entry("GCP", "n4-standard-64", 3.023_55),
                entry("OCI", "VM.Standard.A1.Flex", 0.96),
                entry("OCI", "VM.Standard.E5.Flex", 1.792),
            ],
        }
    }

    /// Load a catalog from a JSON array of [`PricingEntry`] rows.
    ///
    /// # Errors
    /// Returns [`Error::Io`] or [`Error::MalformedInput`] for unreadable
    /// or unparseable files.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let entries: Vec<PricingEntry> =
            serde_json::from_str(&text).map_err(|source| Error::MalformedInput {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { entries })
    }

    /// Built-in catalog, overlaid with the file named by the
    /// `BENCHFOLD_PRICING` environment variable when it is set and valid.
    /// Overlay rows take precedence over built-in ones.
    #[must_use]
    pub fn load() -> Self {
        let mut catalog = Self::builtin();
        if let Ok(path) = std::env::var("BENCHFOLD_PRICING") {
            match Self::from_file(Path::new(&path)) {
                Ok(overlay) => {
                    let mut entries = overlay.entries;
                    entries.extend(catalog.entries);
                    catalog.entries = entries;
                }
                Err(e) => log::warn!("ignoring pricing overlay {path}: {e}"),
            }
        }
        catalog
    }

    /// Hourly cost for a provider + instance type, optionally restricted
    /// by a machine-name substring filter. First matching row wins.
    #[must_use]
    pub fn lookup(
        &self,
        provider: &str,
        instance_type: &str,
        name_filter: Option<&str>,
    ) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| {
                e.provider.eq_ignore_ascii_case(provider)
                    && e.instance_type.eq_ignore_ascii_case(instance_type)
                    && match (&e.name_filter, name_filter) {
                        (None, _) => true,
                        (Some(required), Some(given)) => given.contains(required.as_str()),
                        (Some(_), None) => false,
                    }
            })
            .map(|e| e.cost_per_hour)
    }
}

/// Row template for the ordered machine lookup table.
struct MachineSpec {
    tokens: &'static [&'static str],
    csp: &'static str,
    instance_type: &'static str,
    name_filter: Option<&'static str>,
    total_vcpu: u32,
    cpu_name: &'static str,
    cpu_isa: &'static str,
    default_cost: f64,
}

/// The known machine shapes. Tokens are matched case-folded as substrings
/// of the machine name; multi-token rows are tried before single-token
/// ones, first match wins.
static MACHINE_SPECS: &[MachineSpec] = &[
    MachineSpec {
        tokens: &["m7g", "metal"],
        csp: "AWS",
        instance_type: "m7g.metal",
        name_filter: Some("metal"),
        total_vcpu: 64,
        cpu_name: "AWS Graviton3",
        cpu_isa: "aarch64",
        default_cost: 2.6112,
    },
    MachineSpec {
        tokens: &["gcp", "n4"],
        csp: "GCP",
        instance_type: "n4-standard-64",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "Intel Xeon (Emerald Rapids)",
        cpu_isa: "x86_64",
        default_cost: 3.023_55,
    },
    MachineSpec {
        tokens: &["a1", "flex"],
        csp: "OCI",
        instance_type: "VM.Standard.A1.Flex",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "Ampere Altra",
        cpu_isa: "aarch64",
        default_cost: 0.96,
    },
    MachineSpec {
        tokens: &["oci", "e5"],
        csp: "OCI",
        instance_type: "VM.Standard.E5.Flex",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "AMD EPYC 9J14",
        cpu_isa: "x86_64",
        default_cost: 1.792,
    },
    MachineSpec {
        tokens: &["ampere", "altra"],
        csp: "Local",
        instance_type: "bare-metal",
        name_filter: None,
        total_vcpu: 80,
        cpu_name: "Ampere Altra Q80-30",
        cpu_isa: "aarch64",
        default_cost: 0.0,
    },
    MachineSpec {
        tokens: &["m8g"],
        csp: "AWS",
        instance_type: "m8g.16xlarge",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "AWS Graviton4",
        cpu_isa: "aarch64",
        default_cost: 2.873_28,
    },
    MachineSpec {
        tokens: &["m7g"],
        csp: "AWS",
        instance_type: "m7g.16xlarge",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "AWS Graviton3",
        cpu_isa: "aarch64",
        default_cost: 2.6112,
    },
    MachineSpec {
        tokens: &["m8i"],
        csp: "AWS",
        instance_type: "m8i.16xlarge",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "Intel Xeon 6 (Granite Rapids)",
        cpu_isa: "x86_64",
        default_cost: 3.386_88,
    },
    MachineSpec {
        tokens: &["m7i"],
        csp: "AWS",
        instance_type: "m7i.16xlarge",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "Intel Xeon (Sapphire Rapids)",
        cpu_isa: "x86_64",
        default_cost: 3.2256,
    },
    MachineSpec {
        tokens: &["m7a"],
        csp: "AWS",
        instance_type: "m7a.16xlarge",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "AMD EPYC 9R14",
        cpu_isa: "x86_64",
        default_cost: 3.709_44,
    },
    MachineSpec {
        tokens: &["c4a"],
        csp: "GCP",
        instance_type: "c4a-standard-64",
        name_filter: None,
        total_vcpu: 64,
        cpu_name: "Google Axion",
        cpu_isa: "aarch64",
        default_cost: 2.489_86,
    },
    MachineSpec {
        tokens: &["ryzen"],
        csp: "Local",
        instance_type: "bare-metal",
        name_filter: None,
        total_vcpu: 32,
        cpu_name: "AMD Ryzen 9 7950X",
        cpu_isa: "x86_64",
        default_cost: 0.0,
    },
];

/// The ordered machine lookup table.
#[derive(Debug, Clone)]
pub struct MachineTable {
    entries: Vec<(Vec<String>, MachineInfo)>,
}

impl MachineTable {
    /// Build the table, resolving each row's hourly cost against the
    /// given pricing catalog (falling back to the row's hardcoded
    /// default). Rows are sorted once by descending token count so
    /// more-specific patterns are tried first.
    #[must_use]
    pub fn with_catalog(catalog: &PricingCatalog) -> Self {
        let mut entries: Vec<(Vec<String>, MachineInfo)> = MACHINE_SPECS
            .iter()
            .map(|spec| {
                let cost = catalog
                    .lookup(spec.csp, spec.instance_type, spec.name_filter)
                    .unwrap_or(spec.default_cost);
                let info = MachineInfo {
                    csp: spec.csp.to_string(),
                    total_vcpu: spec.total_vcpu,
                    cpu_name: spec.cpu_name.to_string(),
                    cpu_isa: spec.cpu_isa.to_string(),
                    cost_per_hour: round_half_up(cost, 5),
                };
                let tokens = spec
                    .tokens
                    .iter()
                    .map(|t| t.to_lowercase())
                    .collect::<Vec<_>>();
                (tokens, info)
            })
            .collect();
        entries.sort_by_key(|(tokens, _)| std::cmp::Reverse(tokens.len()));
        Self { entries }
    }

    /// Table backed by [`PricingCatalog::load`].
    #[must_use]
    pub fn load() -> Self {
        Self::with_catalog(&PricingCatalog::load())
    }

    /// Resolve a machine name. Never fails: returns the unknown sentinel
    /// when no row matches.
    #[must_use]
    pub fn resolve(&self, machine_name: &str) -> MachineInfo {
        let folded = machine_name.to_lowercase();
        for (tokens, info) in &self.entries {
            if tokens.iter().all(|t| folded.contains(t.as_str())) {
                return info.clone();
            }
        }
        MachineInfo::unknown()
    }
}

impl Default for MachineTable {
    fn default() -> Self {
        Self::with_catalog(&PricingCatalog::builtin())
    }
}
