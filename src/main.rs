use anyhow::Result;
use clap::{Parser, Subcommand};
use smali_depgraph::cli::{self, AnalyzeArgs, DecodeArgs};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(about = "Class dependency graphs from disassembled Android bytecode", long_about = None)]
struct Cli {
    /// Log at debug level unless DEPGRAPH_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph of a smali tree
    Analyze(AnalyzeArgs),
    /// Disassemble an APK with apktool
    Decode(DecodeArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("DEPGRAPH_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Analyze(args) => {
            if cli.verbose {
                tracing::debug!(
                    markers = %cli::describe_markers(&args.filter_config()?),
                    "Generated class markers"
                );
            }
            cli::analyze(&args)
        }
        Commands::Decode(args) => cli::decode(&args).map(|()| true),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
