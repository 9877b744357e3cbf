use crate::adapters::decoder::{ApktoolDecoder, DEFAULT_API_LEVEL};
use crate::adapters::writer::{FileGraphWriter, GraphFormat, render_dot, write_csv, write_json};
use crate::app::config::FilterConfig;
use crate::app::dto::AnalysisSummary;
use crate::app::engine::{AnalyzerOptions, DependencyAnalyzer};
use crate::domain::graph::DependencyGraph;
use crate::domain::ports::{ArchiveDecoder, GraphWriter};
use anyhow::{Context as _, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Root of the disassembled smali tree
    pub root: PathBuf,

    /// Filter configuration (JSON with package-name, show-inners, ignored-classes)
    #[arg(long)]
    pub filters: Option<PathBuf>,

    /// Restrict analysis to this package, e.g. com.example.app
    #[arg(long)]
    pub package: Option<String>,

    /// Exclude classes whose dotted name fully matches this regex (repeatable)
    #[arg(long = "ignore", value_name = "REGEX")]
    pub ignore: Vec<String>,

    /// Keep nested classes in the reported graph
    #[arg(long)]
    pub inner: bool,

    /// Simple-name fragment marking generated classes (repeatable, replaces the defaults)
    #[arg(long = "generated-marker", value_name = "MARKER")]
    pub generated_markers: Vec<String>,

    /// Process files in parallel
    #[arg(long)]
    pub parallel: bool,

    #[arg(long, value_enum, default_value_t = GraphFormat::Csv)]
    pub format: GraphFormat,

    /// Include edge weights in the output
    #[arg(long)]
    pub weights: bool,

    /// Write the graph to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// File configuration with command-line overrides applied.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = match &self.filters {
            Some(path) => FilterConfig::load(path)?,
            None => FilterConfig::default(),
        };
        if let Some(package) = &self.package {
            config.package_name = Some(package.clone());
        }
        config.ignored_classes.extend(self.ignore.iter().cloned());
        config.show_inners |= self.inner;
        if !self.generated_markers.is_empty() {
            config.generated_markers = Some(self.generated_markers.clone());
        }
        Ok(config)
    }

    pub fn options(&self) -> Result<AnalyzerOptions> {
        let mut options = self.filter_config()?.to_options()?;
        options.parallel = self.parallel;
        Ok(options)
    }
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// APK or JAR to disassemble
    pub archive: PathBuf,

    /// Output directory for the smali tree
    pub out_dir: PathBuf,

    #[arg(long, default_value_t = DEFAULT_API_LEVEL)]
    pub api_level: u32,

    /// apktool executable
    #[arg(long, default_value = "apktool")]
    pub apktool: PathBuf,
}

/// Runs the analysis and emits the graph. Returns `false` when the graph
/// could not be written.
pub fn analyze(args: &AnalyzeArgs) -> Result<bool> {
    let options = args.options()?;
    let analysis = DependencyAnalyzer::new(&args.root, options).run()?;
    let graph = analysis.dependencies();

    match &args.output {
        Some(path) => {
            let writer = FileGraphWriter::new(path, args.format).with_weights(args.weights);
            if !writer.export(&graph) {
                return Ok(false);
            }
            print_summary(&analysis.summary(), Some(writer.destination()));
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = write_graph(&graph, args.format, args.weights, &mut out) {
                tracing::error!("Failed to write graph to stdout: {e:#}");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn write_graph<W: Write>(
    graph: &DependencyGraph,
    format: GraphFormat,
    with_weights: bool,
    out: &mut W,
) -> Result<()> {
    match format {
        GraphFormat::Csv => write_csv(graph, with_weights, out)?,
        GraphFormat::Json => write_json(graph, out)?,
        GraphFormat::Dot => out.write_all(render_dot(graph, with_weights).as_bytes())?,
    }
    out.flush().context("Failed to flush output")
}

pub fn print_summary(summary: &AnalysisSummary, destination: Option<String>) {
    println!("Dependency graph for {}", summary.root);
    println!("{}", "=".repeat(60));
    println!("  Classes: {}", summary.vertex_count);
    println!("  Edges: {}", summary.edge_count);
    println!("  Total references: {}", summary.total_weight);
    println!("  Inner classes: {}", if summary.processing_inner { "kept" } else { "collapsed" });
    println!("  {}", summary.stats);
    if let Some(destination) = destination {
        println!("  Written to: {destination}");
    }
}

pub fn decode(args: &DecodeArgs) -> Result<()> {
    let decoder = ApktoolDecoder::new(&args.apktool);
    decoder.decode(&args.archive, &args.out_dir, args.api_level)?;
    println!("Decoded {} into {}", args.archive.display(), args.out_dir.display());
    Ok(())
}

/// Markers active for a configuration, for `--verbose` diagnostics.
pub fn describe_markers(config: &FilterConfig) -> String {
    config.generated_detector().markers().join(", ")
}
