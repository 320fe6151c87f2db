// SPDX-License-Identifier: MIT OR Apache-2.0
//! benchfold CLI binary - benchmark result normalization and analytics

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use benchfold_analytics::Views;
use benchfold_build::{build_machine_dir, build_tree};
use benchfold_core::doc::Document;
use benchfold_core::error::Error;
use benchfold_core::machine::MachineTable;
use benchfold_merge::{ConflictPolicy, merge_documents};

/// Output name reserved for single builds; merge refuses it so a merge
/// can never silently clobber a build.
const DEFAULT_OUTPUT: &str = "result.json";

/// Glob used when merge is invoked with no inputs.
const MERGE_INPUT_GLOB: &str = "*_result.json";

#[derive(Parser)]
#[command(name = "benchfold")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for benchfold CLI
#[derive(Subcommand)]
enum Commands {
    /// Build a result document from benchmark run directories
    Build {
        /// Search roots to scan for benchmark directories
        #[arg(value_name = "ROOT", required = true)]
        roots: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Treat each root as a fixed machine/os/category/benchmark tree
        #[arg(long)]
        legacy_machine_dir: bool,
    },
    /// Merge result documents with matching schema versions
    Merge {
        /// Input documents (default: *_result.json in the current directory)
        #[arg(value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Output file (must not be named result.json)
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// On conflicting leaves, take the incoming value instead of the
        /// first-seen one
        #[arg(long)]
        prefer_incoming: bool,
    },
    /// Produce analytics views over a merged document
    Analyze {
        /// Merged result document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Performance leaderboard view
        #[arg(long)]
        perf: bool,

        /// Cost-efficiency ranking view
        #[arg(long)]
        cost: bool,

        /// Thread-scaling curve view
        #[arg(long)]
        th: bool,

        /// CSP/architecture trend view
        #[arg(long)]
        csp: bool,

        /// Restrict all views to one test category
        #[arg(long, value_name = "CATEGORY")]
        testcategory: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Build { .. } => handle_build(&args),
        Commands::Merge { .. } => handle_merge(&args),
        Commands::Analyze { .. } => handle_analyze(&args),
    }
}

fn handle_build(args: &Args) {
    if let Commands::Build {
        roots,
        output,
        legacy_machine_dir,
    } = &args.command
        && let Err(e) = run_build(roots, output, *legacy_machine_dir)
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_build(
    roots: &[PathBuf],
    output: &Path,
    legacy: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = MachineTable::load();
    let doc = if legacy {
        let mut docs = Vec::with_capacity(roots.len());
        let mut contexts = Vec::with_capacity(roots.len());
        for root in roots {
            docs.push(build_machine_dir(root, &table)?.to_value()?);
            contexts.push(root.display().to_string());
        }
        let merged = merge_documents(docs, &contexts, ConflictPolicy::KeepExisting)?;
        Document::from_value(merged, "built document")?
    } else {
        build_tree(roots, &table)?
    };
    write_document(output, &doc.to_value()?)?;
    Ok(())
}

fn handle_merge(args: &Args) {
    if let Commands::Merge {
        inputs,
        output,
        prefer_incoming,
    } = &args.command
        && let Err(e) = run_merge(inputs, output, *prefer_incoming)
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_merge(
    inputs: &[PathBuf],
    output: &Path,
    prefer_incoming: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.file_name().is_some_and(|n| n == DEFAULT_OUTPUT) {
        return Err(format!(
            "merge refuses to write {DEFAULT_OUTPUT}; name the output explicitly"
        )
        .into());
    }
    let inputs = if inputs.is_empty() {
        default_merge_inputs()?
    } else {
        inputs.to_vec()
    };
    if inputs.is_empty() {
        return Err(format!("no inputs given and no {MERGE_INPUT_GLOB} files found").into());
    }

    let mut docs = Vec::with_capacity(inputs.len());
    let mut contexts = Vec::with_capacity(inputs.len());
    for path in &inputs {
        if !path.is_file() {
            return Err(Box::new(Error::MissingInput { path: path.clone() }));
        }
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let doc: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| Error::MalformedInput {
                path: path.clone(),
                source,
            })?;
        docs.push(doc);
        contexts.push(path.display().to_string());
    }
    let policy = if prefer_incoming {
        ConflictPolicy::PreferIncoming
    } else {
        ConflictPolicy::KeepExisting
    };
    let merged = merge_documents(docs, &contexts, policy)?;
    write_document(output, &merged)?;
    Ok(())
}

/// `*_result.json` in the current directory, sorted for a stable merge
/// order.
fn default_merge_inputs() -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut inputs: Vec<PathBuf> = glob::glob(MERGE_INPUT_GLOB)?.collect::<Result<_, _>>()?;
    inputs.sort();
    log::info!("merging {} default inputs", inputs.len());
    Ok(inputs)
}

fn handle_analyze(args: &Args) {
    if let Commands::Analyze {
        input,
        perf,
        cost,
        th,
        csp,
        testcategory,
        output,
    } = &args.command
        && let Err(e) = run_analyze(
            input,
            Views {
                perf: *perf,
                cost: *cost,
                scaling: *th,
                csp: *csp,
            },
            testcategory.as_deref(),
            output.as_deref(),
        )
    {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_analyze(
    input: &Path,
    views: Views,
    testcategory: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let views = if views.any() { views } else { Views::all() };
    let text = fs::read_to_string(input).map_err(|source| Error::io(input, source))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| Error::MalformedInput {
            path: input.to_path_buf(),
            source,
        })?;
    let doc = Document::from_value(value, &input.display().to_string())?;
    let report = benchfold_analytics::analyze(&doc, views, testcategory);
    match output {
        Some(path) => write_document(path, &report)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Write pretty JSON (2-space indent, UTF-8, non-ASCII preserved), then
/// re-parse the written bytes. A file this tool wrote and cannot read
/// back signals a builder or merger bug, and the caller must not trust
/// the output even though it exists.
fn write_document(path: &Path, value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, &text).map_err(|source| Error::io(path, source))?;

    let written = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
    if let Err(source) = serde_json::from_str::<serde_json::Value>(&written) {
        return Err(Box::new(Error::SelfCheck {
            path: path.to_path_buf(),
            source,
        }));
    }
    log::info!("wrote {}", path.display());
    Ok(())
}
