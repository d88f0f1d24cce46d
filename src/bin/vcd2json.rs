use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vcdwave::{ConvertOptions, Converter, DEFAULT_CHUNK_SIZE, OutputSink, SamplerOptions};

/// Converts a VCD trace into a WaveJSON timing diagram.
///
/// The first signal is the clock; every other signal is sampled on its falling edge.
#[derive(Parser, Debug)]
#[command(name = "vcd2json", version, about, long_about = None)]
struct Args {
    /// VCD trace to read.
    #[arg(value_name = "VCDFILE")]
    vcd_file: PathBuf,

    /// WaveJSON file to create. Standard output is used when omitted.
    #[arg(short, long, value_name = "JSONFILE")]
    output: Option<PathBuf>,

    /// Slash-separated signal path; repeat to select several. Defaults to every signal.
    #[arg(short = 's', long = "signal", value_name = "PATH")]
    signals: Vec<String>,

    /// Number of clock cycles per row group.
    #[arg(short, long = "chunk", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk: usize,

    /// Sampling start time (0 = from the beginning).
    #[arg(long = "start", default_value_t = 0)]
    start_time: u64,

    /// Sampling end time (0 = until the end of the trace).
    #[arg(long = "end", default_value_t = 0)]
    end_time: u64,

    /// Display format of a multi-bit signal: one of b, d, u, x, X.
    #[arg(short, long = "format", value_name = "PATH=FMT", value_parser = parse_format)]
    formats: Vec<(String, char)>,

    /// Print the conversion properties and exit.
    #[arg(long)]
    list: bool,

    /// Enable debug-level diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(arg: &str) -> Result<(String, char), String> {
    let (path, code) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=FMT, got `{arg}`"))?;
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok((path.to_string(), ch)),
        _ => Err(format!("format must be a single character, got `{code}`")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let options = ConvertOptions {
        paths: args.signals,
        sampler: SamplerOptions {
            chunk_size: args.chunk,
            start_time: args.start_time,
            end_time: args.end_time,
        },
        formats: args.formats,
    };

    let mut converter = Converter::open(&args.vcd_file, &options)
        .with_context(|| format!("failed to prepare `{}`", args.vcd_file.display()))?;
    if let Some(path) = &args.output {
        converter.set_output_label(path.display().to_string());
    }

    if args.list {
        println!("{converter}");
        return Ok(());
    }
    if let Some(path) = &args.output {
        println!("{converter}");
        println!();
        println!("Create WaveJSON file \"{}\".", path.display());
    }

    let sink = OutputSink::create(args.output.as_deref())?;
    converter.run(sink).context("conversion failed")?;
    Ok(())
}
