// THEORY:
// Every failure mode of the batch tool funnels through this single error enum.
// The policy is data-integrity-over-availability: a corrupt image, a missing
// directory or a failed chunk write aborts the whole run rather than skipping
// the offending item, because a partially processed or mislabeled dataset is
// worse than no dataset. Each variant carries enough context (path, stage) to
// diagnose the failure from the CLI output alone; there is no retry or
// recovery logic anywhere in the crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pixel data handed to the pipeline is malformed (wrong buffer
    /// length for the declared shape, or non-finite channel values).
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// An expected source directory or file is absent, unreadable, or empty.
    #[error("missing source {path}: {reason}")]
    MissingSource { path: PathBuf, reason: String },

    /// A geometric operation was applied to a frame smaller than it requires.
    #[error(
        "size mismatch: frame is {width}x{height} but the operation requires at least {required_width}x{required_height}"
    )]
    SizeMismatch {
        width: u32,
        height: u32,
        required_width: u32,
        required_height: u32,
    },

    /// An image file could not be decoded into pixel data.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A chunk file could not be written during export.
    #[error("failed to write chunk {path}: {source}")]
    ChunkWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
