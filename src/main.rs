// Thin CLI over the library: build the labeled feature table from a data
// directory and export it as chunked CSV files. All processing lives in
// the library; this binary only parses arguments and wires the sinks.

use anyhow::Context;
use clap::Parser;
use gesture_features::{
    ChunkedCsvWriter, DEFAULT_ROWS_PER_CHUNK, DatasetBuilder, DatasetConfig, LogSink, NullSink,
    PipelineConfig, ProgressSink,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate grayscale gesture features as chunked CSV files")]
struct Args {
    /// Root directory containing rock/, paper/ and scissors/ image folders.
    #[arg(short, long)]
    data_dir: PathBuf,

    /// Base name (optionally with a directory) for the exported CSV chunks.
    #[arg(short, long, default_value = "imgdata")]
    output: String,

    /// Rows per exported CSV chunk.
    #[arg(long, default_value_t = DEFAULT_ROWS_PER_CHUNK)]
    rows_per_chunk: usize,

    /// Width of the raw source frames in pixels.
    #[arg(long, default_value_t = 640)]
    source_width: u32,

    /// Height of the raw source frames in pixels.
    #[arg(long, default_value_t = 480)]
    source_height: u32,

    /// Report per-image and per-chunk progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let mut sink: Box<dyn ProgressSink> = if args.verbose {
        Box::new(LogSink)
    } else {
        Box::new(NullSink)
    };

    let config = DatasetConfig::from_root(
        &args.data_dir,
        args.source_width,
        args.source_height,
        PipelineConfig::default(),
    );

    let started = Instant::now();
    let table = DatasetBuilder::new(config)
        .build(sink.as_mut())
        .context("building the dataset table")?;

    let files = ChunkedCsvWriter::new(args.rows_per_chunk)
        .write(&table, &args.output, sink.as_mut())
        .context("exporting CSV chunks")?;

    log::info!(
        "wrote {} rows across {} chunk files in {:.2?}",
        table.rows(),
        files.len(),
        started.elapsed()
    );
    Ok(())
}
