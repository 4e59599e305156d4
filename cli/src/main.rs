use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use huff_core::constants::{DEFAULT_READER_BYTES, DEFAULT_WRITER_WORDS};
use huff_core::prelude::*;

/// Canonical Huffman file compressor.
#[derive(Parser, Debug)]
#[command(author, version, about = "Canonical Huffman file compressor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file.
    Compress(IoArgs),
    /// Decompress a file produced by `compress`.
    Decompress(IoArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// File to read.
    #[arg(short, long)]
    input: PathBuf,

    /// File to create; removed again if the operation fails.
    #[arg(short, long)]
    output: PathBuf,

    /// Log every phase at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Print the telemetry snapshot as JSON.
    #[arg(long)]
    json: bool,

    /// Bit writer capacity in 64-bit words.
    #[arg(long, default_value_t = DEFAULT_WRITER_WORDS)]
    buffer_words: usize,

    /// Read buffer size in bytes.
    #[arg(long, default_value_t = DEFAULT_READER_BYTES)]
    read_buffer: usize,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HUFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(op: Operation, args: &IoArgs) -> anyhow::Result<TelemetrySnapshot> {
    let codec = Compressor::new(CodecConfig::new(args.buffer_words, args.read_buffer))
        .context("invalid buffer configuration")?;

    let mut input = open_input(InputSource::File(args.input.clone()))
        .with_context(|| format!("failed to open input {}", args.input.display()))?;
    let mut output = open_output(OutputSink::File(args.output.clone()))
        .with_context(|| format!("failed to create output {}", args.output.display()))?;

    let result = match op {
        Operation::Compress => codec.compress(&mut input, &mut output),
        Operation::Decompress => codec.decompress(&mut input, &mut output),
    };
    drop(output);

    result.map_err(|e| {
        discard(&args.output);
        anyhow::Error::new(e).context(format!("failed to {} {}", op, args.input.display()))
    })
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        error!(path = %path.display(), error = %e, "failed to remove partial output");
    }
}

fn report(snapshot: &TelemetrySnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", snapshot.summary());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (op, args) = match &cli.command {
        Command::Compress(args) => (Operation::Compress, args),
        Command::Decompress(args) => (Operation::Decompress, args),
    };
    init_logging(args.verbose);

    match run(op, args).and_then(|snapshot| report(&snapshot, args.json)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
