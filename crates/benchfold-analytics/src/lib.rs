// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Cross-machine analytics
//!
//! Four independent views over one fully-merged canonical document, each
//! requestable alone:
//!
//! - [`perf`] - per-test performance leaderboards across machines
//! - [`cost`] - cost-efficiency rankings (throughput per dollar-hour)
//! - [`scaling`] - thread-scaling curves, normalized per machine
//! - [`csp`] - cloud-provider trends against an ARM64 baseline instance
//!
//! Every view groups the same flat sample stream produced by
//! [`common::samples`]; whether a larger score is better is inferred from
//! the unit string, never configured.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Shared sample stream and scoring rules
pub mod common;
/// Cost-efficiency ranking view
pub mod cost;
/// CSP/architecture trend view
pub mod csp;
/// Performance leaderboard view
pub mod perf;
/// Thread-scaling curve view
pub mod scaling;

use benchfold_core::doc::Document;
use serde_json::{Map, Value};

/// Which views to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Views {
    /// Performance leaderboard.
    pub perf: bool,
    /// Cost-efficiency ranking.
    pub cost: bool,
    /// Thread-scaling curves.
    pub scaling: bool,
    /// CSP/architecture trends.
    pub csp: bool,
}

impl Views {
    /// All four views.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            perf: true,
            cost: true,
            scaling: true,
            csp: true,
        }
    }

    /// Whether at least one view is requested.
    #[must_use]
    pub const fn any(self) -> bool {
        self.perf || self.cost || self.scaling || self.csp
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::all()
    }
}

/// Produce the requested views over a merged document, optionally
/// restricted to one test category. The result is a JSON object with one
/// top-level key per requested view, in a fixed order.
#[must_use]
pub fn analyze(doc: &Document, views: Views, testcategory: Option<&str>) -> Value {
    let mut out = Map::new();
    if views.perf {
        out.insert(
            "performance_comparison".to_string(),
            perf::performance_comparison(doc, testcategory),
        );
    }
    if views.cost {
        out.insert(
            "cost_comparison".to_string(),
            cost::cost_comparison(doc, testcategory),
        );
    }
    if views.scaling {
        out.insert(
            "thread_scaling_comparison".to_string(),
            scaling::thread_scaling_comparison(doc, testcategory),
        );
    }
    if views.csp {
        out.insert(
            "csp_instance_comparison".to_string(),
            csp::csp_instance_comparison(doc, testcategory),
        );
    }
    Value::Object(out)
}
