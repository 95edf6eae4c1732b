use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use depscope::core::{DependencyAnalyzer, FileScanner, MemoryCache, ScanOptions};
use depscope::formatters::{JsonReportFormatter, SummaryFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "depscope",
    version = "0.1.0",
    author = "depscope developers",
    about = "Pattern-based codebase dependency graph and structural insights"
)]
struct Cli {
    /// Input directory to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "DEPSCOPE.md")]
    output: PathBuf,

    /// Output format: markdown, json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Maximum number of files to analyze
    #[arg(long, value_name = "N", default_value_t = 50)]
    max_files: usize,

    /// Files larger than this many bytes are skipped
    #[arg(long, value_name = "BYTES", default_value_t = 100_000)]
    max_file_size: u64,

    /// Directory levels below the input that are visited
    #[arg(long, value_name = "N", default_value_t = 4)]
    max_depth: usize,

    /// Extra directory name to skip (repeatable)
    #[arg(long = "skip-dir", value_name = "NAME")]
    skip_dirs: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        format,
        max_files,
        max_file_size,
        max_depth,
        skip_dirs,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let mut options = ScanOptions {
        max_files,
        max_file_size,
        max_depth,
        ..ScanOptions::default()
    };
    options.skip_dirs.extend(
        skip_dirs
            .into_iter()
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty()),
    );

    println!("DEPSCOPE - Codebase Dependency Analysis");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Format: {}", format.as_str());

    let scanner = FileScanner::with_options(options).with_cache(Arc::new(MemoryCache::new()));
    let files = scanner.scan_directory(&input)?;
    println!("Found {} files to analyze", files.len());

    let analysis_start = Instant::now();
    let analyzer = DependencyAnalyzer::new();
    let (report, graph) = analyzer.analyze_with_graph(&files);
    println!(
        "Analysis completed in {:.2}s",
        analysis_start.elapsed().as_secs_f64()
    );

    let mut generated_output = output.clone();
    match format {
        OutputFormat::Markdown => {
            SummaryFormatter::new().format_to_file(&report, Some(&graph), &output)?;
        }
        OutputFormat::Json => {
            generated_output = output.with_extension("json");
            JsonReportFormatter::new().format_to_file(&report, &generated_output)?;
        }
    }

    println!("Analysis complete. Generated {}", generated_output.display());
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
