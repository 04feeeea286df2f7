// THEORY:
// This file is the main entry point for the `gesture_features` library
// crate. It follows the standard Rust convention of using `lib.rs` to
// define the public API exposed to external consumers (like the CLI
// binary or a classifier training harness).
//
// The primary goal is to export the `FeaturePipeline`, `DatasetBuilder`
// and `ChunkedCsvWriter` with their configuration structs as the clean,
// high-level interface for the whole extraction system. The low-level
// stages (`core_modules`) remain available for callers that need a single
// transformation, but the expected entry point is the pipeline.

pub mod core_modules;
pub mod dataset;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod progress;

pub use dataset::{DatasetBuilder, DatasetConfig, DatasetTable, Gesture};
pub use error::{PipelineError, Result};
pub use export::{ChunkedCsvWriter, DEFAULT_ROWS_PER_CHUNK};
pub use pipeline::{DEFAULT_BACKGROUND_HUE, FeaturePipeline, PipelineConfig};
pub use progress::{LogSink, NullSink, ProgressSink};
