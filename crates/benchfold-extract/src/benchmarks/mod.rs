// SPDX-License-Identifier: MIT OR Apache-2.0
//! One module per supported benchmark.
//!
//! Every module exposes the same `extract(dir, thread_id, cost_per_hour)`
//! contract and owns the idiosyncrasies of its benchmark's artifact:
//! which entries count, how units are spelled, what marks a run complete.
//! They deliberately do not share grammar beyond the [`crate::jsonfam`] /
//! [`crate::logfam`] helpers - each parser fails independently.

/// Apache HTTP server benchmark (JSON family)
pub mod apache;
/// GCC compile-time benchmark (log family)
pub mod build_gcc;
/// Linux kernel compile-time benchmark (log family)
pub mod build_linux_kernel;
/// LLVM compile-time benchmark (log family)
pub mod build_llvm;
/// PHP compile-time benchmark (log family)
pub mod build_php;
/// 7-Zip MIPS rating benchmark (JSON family)
pub mod compress_7zip;
/// XZ compression benchmark (log family)
pub mod compress_xz;
/// Zstandard compression benchmark (log family)
pub mod compress_zstd;
/// CoreMark benchmark (JSON family, consumes perf stats)
pub mod coremark;
/// FFmpeg encoding benchmark (JSON family)
pub mod ffmpeg;
/// John the Ripper benchmark (JSON family)
pub mod john_the_ripper;
/// Memcached benchmark (JSON family)
pub mod memcached;
/// NAMD molecular dynamics benchmark (JSON family)
pub mod namd;
/// nginx benchmark (JSON family)
pub mod nginx;
/// OpenSSL sign/verify benchmark (JSON family)
pub mod openssl;
/// pgbench PostgreSQL benchmark (JSON family)
pub mod pgbench;
/// Redis benchmark (JSON family)
pub mod redis;
/// SQLite insertion benchmark (JSON family)
pub mod sqlite;
/// STREAM memory bandwidth benchmark (JSON family, consumes perf stats)
pub mod stream;
/// x265 encoding benchmark (JSON family)
pub mod x265;
