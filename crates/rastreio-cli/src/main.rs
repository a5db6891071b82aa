mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rastreio",
    version,
    about = "Extract vehicle positions from tracking report PDFs"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single report (PDF or pre-extracted text) and print its positions
    Parse {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Run pdftotext without -layout
        #[arg(long)]
        no_layout: bool,
    },
    /// Extract every report in a directory into CSV files plus a Markdown report
    Batch {
        /// Directory containing the reports (default: sourcePdf)
        input_dir: Option<PathBuf>,

        /// JSON config file; flags override its values
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory for the per-report CSV extracts
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Path of the aggregated Markdown report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Run pdftotext without -layout
        #[arg(long)]
        no_layout: bool,
    },
    /// Dump the position of every word of a PDF (or a directory of PDFs) to CSV
    Layout {
        /// PDF file or directory of PDFs
        input: PathBuf,

        /// Directory for the `<name>.csv` files
        #[arg(long, value_name = "DIR", default_value = "output")]
        out_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            no_layout,
        } => commands::parse::run(input_file, &output, !no_layout),
        Commands::Batch {
            input_dir,
            config,
            out_dir,
            report,
            jobs,
            no_layout,
        } => commands::batch::run(commands::batch::BatchArgs {
            input_dir,
            config,
            out_dir,
            report,
            jobs,
            no_layout,
        }),
        Commands::Layout { input, out_dir } => commands::layout::run(input, out_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
