// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared helpers for parsing raw per-thread artifacts.
//!
//! Every extractor, regardless of source-format family, goes through these
//! helpers: ANSI stripping before any text matching, frequency-snapshot
//! parsing, perf-stat parsing, and thread-id discovery. Artifact-level
//! problems are recoverable by contract: helpers return `None`/empty and
//! leave error surfacing to the caller's log stream.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

/// CSI and other `ESC [`-style escape sequences found in PTS logs.
fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap())
}

/// Strip ANSI escape sequences. Borrows when the input has none.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if memchr::memchr(0x1b, text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    ansi_re().replace_all(text, "")
}

/// Round to `dp` decimal places, half away from zero.
#[must_use]
pub fn round_dp(x: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (x * factor).round() / factor
}

/// Round a non-negative value to `dp` decimal places, half up.
#[must_use]
pub fn round_half_up(x: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (x * factor + 0.5).floor() / factor
}

/// Median of a sample set; `None` for an empty slice.
#[must_use]
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Parse a frequency-snapshot file.
///
/// Each line is either a bare integer (Hz) or a `label: <float>` pair whose
/// float is MHz (converted to Hz via x1000). Blank and malformed lines are
/// skipped. Result keys are `freq_0, freq_1, ...` by line order, *not* by
/// CPU id: callers must not assume `freq_N` indexes physical CPU N unless
/// the affinity list used at run time is known and aligned by position.
///
/// Returns `None` when the file is absent, unreadable, or yields no
/// entries, so the caller can omit the sub-key entirely.
#[must_use]
pub fn parse_freq_file(path: &Path) -> Option<IndexMap<String, u64>> {
    let text = fs::read_to_string(path).ok()?;
    let mut freqs = IndexMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let hz = if let Ok(hz) = line.parse::<u64>() {
            Some(hz)
        } else if let Some((_, value)) = line.split_once(':') {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .map(|mhz| (mhz * 1000.0) as u64)
        } else {
            None
        };
        match hz {
            Some(hz) => {
                let key = format!("freq_{}", freqs.len());
                freqs.insert(key, hz);
            }
            None => log::debug!("skipping malformed frequency line in {}: {line}", path.display()),
        }
    }
    if freqs.is_empty() { None } else { Some(freqs) }
}

/// Parse a perf-stat dump into `CPU<n> -> event -> count`.
///
/// Recognized lines have the shape `CPU<n> <value> <event>`, where the
/// value may carry thousands separators. Anything else is ignored.
/// Returns `None` when nothing was recognized.
#[must_use]
pub fn parse_perf_stats(path: &Path) -> Option<IndexMap<String, IndexMap<String, u64>>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(CPU\d+)\s+([\d,]+)\s+(\S+)").unwrap());

    let text = fs::read_to_string(path).ok()?;
    let text = strip_ansi(&text);
    let mut cpus: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    for line in text.lines() {
        let Some(caps) = re.captures(line.trim()) else {
            continue;
        };
        let value: u64 = match caps[2].replace(',', "").parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        cpus.entry(caps[1].to_string())
            .or_default()
            .insert(caps[3].to_string(), value);
    }
    if cpus.is_empty() { None } else { Some(cpus) }
}

/// Discover thread ids in a benchmark directory.
///
/// Enumerates `*-thread.log` and `*-thread.json` files directly in the
/// directory; the thread id is the filename prefix before the first `-`.
/// Ids are deduplicated and sorted numerically (non-numeric ids sort after
/// numeric ones, lexically).
#[must_use]
pub fn discover_threads(benchmark_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(benchmark_dir) else {
        return Vec::new();
    };
    let mut ids: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !(name.ends_with("-thread.log") || name.ends_with("-thread.json")) {
            continue;
        }
        let Some((prefix, _)) = name.split_once('-') else {
            continue;
        };
        if !prefix.is_empty() && !ids.iter().any(|id| id == prefix) {
            ids.push(prefix.to_string());
        }
    }
    ids.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_ansi_removes_color_codes() {
        let colored = "\x1b[1;32mAverage:\x1b[0m 42.5 Seconds";
        assert_eq!(strip_ansi(colored), "Average: 42.5 Seconds");
    }

    #[test]
    fn test_strip_ansi_borrows_plain_text() {
        let plain = "Average: 42.5 Seconds";
        assert!(matches!(strip_ansi(plain), Cow::Borrowed(_)));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0]), Some(3.0));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_round_half_up() {
        assert!((round_half_up(0.123_455, 5) - 0.12346).abs() < 1e-12);
        assert!((round_half_up(0.123_454, 5) - 0.12345).abs() < 1e-12);
    }

    #[test]
    fn test_parse_freq_file_mixed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("4-thread_freq_start.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "3200000000").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "cpu7: 2450.125").unwrap();
        writeln!(f, "garbage line").unwrap();
        drop(f);

        let freqs = parse_freq_file(&path).unwrap();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs["freq_0"], 3_200_000_000);
        assert_eq!(freqs["freq_1"], 2_450_125);
    }

    #[test]
    fn test_parse_freq_file_empty_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(parse_freq_file(&path).is_none());
        assert!(parse_freq_file(&dir.path().join("missing.txt")).is_none());
    }

    #[test]
    fn test_parse_perf_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("4-thread_perf_stats.txt");
        std::fs::write(
            &path,
            "CPU0 1,234,567 cycles\nCPU0 890 cache-misses\nCPU1 42 cycles\nnot a stat line\n",
        )
        .unwrap();
        let stats = parse_perf_stats(&path).unwrap();
        assert_eq!(stats["CPU0"]["cycles"], 1_234_567);
        assert_eq!(stats["CPU0"]["cache-misses"], 890);
        assert_eq!(stats["CPU1"]["cycles"], 42);
    }

    #[test]
    fn test_discover_threads_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "16-thread.json",
            "4-thread.json",
            "4-thread.log",
            "8-thread.log",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(discover_threads(dir.path()), vec!["4", "8", "16"]);
    }
}
