// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static benchmark-name dispatch table.
//!
//! The set of supported benchmarks is deliberately closed: adding one
//! means adding a module and a row here, at compile time. A static table
//! (rather than runtime discovery) removes the whole "parser not found"
//! failure class.

use std::path::Path;

use benchfold_core::doc::ThreadRecord;

use crate::benchmarks;

/// The shared extractor contract: `None` means "this thread did not
/// complete" and the thread is silently skipped by callers.
pub type ExtractFn = fn(&Path, &str, f64) -> Option<ThreadRecord>;

/// Benchmark name -> extractor, one row per supported benchmark.
pub static REGISTRY: &[(&str, ExtractFn)] = &[
    ("apache", benchmarks::apache::extract),
    ("build-gcc", benchmarks::build_gcc::extract),
    ("build-linux-kernel", benchmarks::build_linux_kernel::extract),
    ("build-llvm", benchmarks::build_llvm::extract),
    ("build-php", benchmarks::build_php::extract),
    ("compress-7zip", benchmarks::compress_7zip::extract),
    ("compress-xz", benchmarks::compress_xz::extract),
    ("compress-zstd", benchmarks::compress_zstd::extract),
    ("coremark", benchmarks::coremark::extract),
    ("ffmpeg", benchmarks::ffmpeg::extract),
    ("john-the-ripper", benchmarks::john_the_ripper::extract),
    ("memcached", benchmarks::memcached::extract),
    ("namd", benchmarks::namd::extract),
    ("nginx", benchmarks::nginx::extract),
    ("openssl", benchmarks::openssl::extract),
    ("pgbench", benchmarks::pgbench::extract),
    ("redis", benchmarks::redis::extract),
    ("sqlite", benchmarks::sqlite::extract),
    ("stream", benchmarks::stream::extract),
    ("x265", benchmarks::x265::extract),
];

/// Look up the extractor for a benchmark name.
#[must_use]
pub fn lookup(benchmark: &str) -> Option<ExtractFn> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == benchmark)
        .map(|(_, f)| *f)
}

/// Whether a directory name is a known benchmark.
#[must_use]
pub fn is_known_benchmark(name: &str) -> bool {
    lookup(name).is_some()
}

/// All supported benchmark names, in registry order.
pub fn known_benchmarks() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Dispatch one thread extraction. Unknown benchmark names (the builder
/// filters on [`is_known_benchmark`], so this is a programming error,
/// not an input error) are logged and skipped.
#[must_use]
pub fn extract_thread(
    benchmark: &str,
    benchmark_dir: &Path,
    thread_id: &str,
    cost_per_hour: f64,
) -> Option<ThreadRecord> {
    let Some(extract) = lookup(benchmark) else {
        log::warn!("no extractor registered for benchmark {benchmark:?}");
        return None;
    };
    extract(benchmark_dir, thread_id, cost_per_hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_sorted_and_unique() {
        let names: Vec<&str> = known_benchmarks().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_lookup() {
        assert!(is_known_benchmark("redis"));
        assert!(is_known_benchmark("build-linux-kernel"));
        assert!(!is_known_benchmark("not-a-benchmark"));
    }

    #[test]
    fn test_unknown_benchmark_extracts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_thread("not-a-benchmark", dir.path(), "4", 0.0).is_none());
    }
}
