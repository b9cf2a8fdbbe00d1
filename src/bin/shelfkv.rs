//! ShelfKV Binary
//!
//! Runs a command file against a fresh library and writes the report.

use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use shelfkv::protocol::TextReporter;
use shelfkv::session::{process_file, Session};
use shelfkv::{Config, Library};
use tracing_subscriber::{fmt, EnvFilter};

/// ShelfKV
#[derive(Parser, Debug)]
#[command(name = "shelfkv")]
#[command(about = "Book catalogue with red-black tree index and reservation waitlists")]
#[command(version)]
struct Args {
    /// Command file to execute
    input: PathBuf,

    /// Report file (defaults to <input stem>_output_file.txt next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the report to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Maximum pending reservations per book
    #[arg(short = 'c', long, default_value = "20")]
    waitlist_capacity: usize,

    /// Stop at the first malformed command instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() {
    // Logs go to stderr so a stdout report stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelfkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("ShelfKV v{}", shelfkv::VERSION);

    let config = Config::builder()
        .waitlist_capacity(args.waitlist_capacity)
        .strict(args.strict)
        .build();

    let result = if args.stdout {
        run_to_stdout(config, &args.input)
    } else {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| config.output_path_for(&args.input));
        process_file(config, &args.input, &output)
    };

    match result {
        Ok(stats) => tracing::info!(
            "Done: {} executed, {} skipped{}",
            stats.executed,
            stats.skipped,
            if stats.terminated { ", terminated by Quit" } else { "" }
        ),
        Err(e) => {
            tracing::error!("Failed to process {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    }
}

fn run_to_stdout(
    config: Config,
    input: &std::path::Path,
) -> shelfkv::Result<shelfkv::session::SessionStats> {
    let reader = BufReader::new(std::fs::File::open(input)?);
    let library = Library::new(config)?;
    let mut session = Session::new(library, TextReporter::new(io::stdout().lock()));
    session.run(reader)
}
