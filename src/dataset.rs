// THEORY:
// The `DatasetBuilder` is the orchestrator of the batch run. It owns no
// image-processing logic itself; it walks the labeled source directories in
// a fixed order and drives the `FeaturePipeline` once per file, collecting
// the results into a single in-memory table.
//
// Key architectural principles:
// 1.  **Deterministic Enumeration**: Gestures are processed in their fixed
//     declared order and files within a gesture are sorted
//     case-insensitively. Two runs over the same directories visit the
//     same files in the same order, so row N of the table always means the
//     same image.
// 2.  **Two-Phase Allocation**: The builder first counts every input across
//     all gestures, then allocates the full table once, then fills it
//     sequentially. No reallocation during the fill, and an empty or
//     missing directory fails the run before any image is decoded.
// 3.  **Abort on First Failure**: A file that cannot be decoded or whose
//     shape disagrees with the configured feature length aborts the whole
//     batch. Skipping it would silently unbalance the dataset.
// 4.  **Observer, Not Logger**: Per-image progress goes to an injected
//     `ProgressSink`; the builder itself never prints.

use crate::core_modules::frame::Frame;
use crate::error::{PipelineError, Result};
use crate::pipeline::{FeaturePipeline, PipelineConfig};
use crate::progress::ProgressSink;
use std::path::{Path, PathBuf};

/// The fixed set of gesture classes, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    /// All gestures in their fixed enumeration order.
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    /// The integer label stored in the dataset table.
    pub fn label(self) -> u8 {
        match self {
            Gesture::Rock => 1,
            Gesture::Paper => 2,
            Gesture::Scissors => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissors => "scissors",
        }
    }
}

/// Global configuration for a batch run: where each gesture's images live,
/// the expected source frame shape, and the extraction parameters.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Source directory of PNG files for each gesture, in processing order.
    pub sources: Vec<(Gesture, PathBuf)>,
    /// Width of the raw source frames in pixels.
    pub source_width: u32,
    /// Height of the raw source frames in pixels.
    pub source_height: u32,
    /// Extraction parameters shared by every image in the batch.
    pub pipeline: PipelineConfig,
}

impl DatasetConfig {
    /// Conventional layout: one subdirectory per gesture under `root`,
    /// named after the gesture.
    pub fn from_root(root: &Path, source_width: u32, source_height: u32, pipeline: PipelineConfig) -> Self {
        let sources = Gesture::ALL
            .iter()
            .map(|&gesture| (gesture, root.join(gesture.name())))
            .collect();
        Self {
            sources,
            source_width,
            source_height,
            pipeline,
        }
    }
}

/// The assembled dataset: one label and one feature vector per image, in
/// processing order. Features are stored flat, row-major, so the table is
/// allocated exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetTable {
    /// Length of every feature vector in the table.
    pub feature_len: usize,
    /// One class label per row.
    pub labels: Vec<u8>,
    /// All feature vectors back to back; row r occupies
    /// `[r * feature_len, (r + 1) * feature_len)`.
    pub features: Vec<f64>,
}

impl DatasetTable {
    /// Number of rows in the table.
    pub fn rows(&self) -> usize {
        self.labels.len()
    }

    /// The label and feature slice of row `index`.
    pub fn row(&self, index: usize) -> (u8, &[f64]) {
        let start = index * self.feature_len;
        (self.labels[index], &self.features[start..start + self.feature_len])
    }
}

/// Walks the labeled image directories and assembles the dataset table.
pub struct DatasetBuilder {
    config: DatasetConfig,
}

impl DatasetBuilder {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Runs the full batch: enumerate, allocate, fill.
    pub fn build(&self, progress: &mut dyn ProgressSink) -> Result<DatasetTable> {
        let pipeline = FeaturePipeline::new(self.config.pipeline);
        let feature_len =
            pipeline.feature_len(self.config.source_width, self.config.source_height);

        // Phase 1: enumerate every input up front.
        let mut file_lists: Vec<(Gesture, Vec<PathBuf>)> =
            Vec::with_capacity(self.config.sources.len());
        for (gesture, dir) in &self.config.sources {
            file_lists.push((*gesture, enumerate_images(dir)?));
        }
        let total: usize = file_lists.iter().map(|(_, files)| files.len()).sum();

        // Phase 2: allocate the full table once.
        let mut labels = vec![0u8; total];
        let mut features = vec![0.0f64; total * feature_len];

        // Phase 3: fill sequentially.
        let mut counter = 0usize;
        for (gesture, files) in &file_lists {
            for path in files {
                progress.notify(&format!("Processing image {}", path.display()));

                let frame = Frame::open(path)?;
                let vector = pipeline.extract(&frame)?;
                if vector.len() != feature_len {
                    return Err(PipelineError::InvalidInput(format!(
                        "{} produced {} features but the configured shape requires {}",
                        path.display(),
                        vector.len(),
                        feature_len
                    )));
                }

                features[counter * feature_len..(counter + 1) * feature_len]
                    .copy_from_slice(&vector);
                labels[counter] = gesture.label();
                counter += 1;
            }
        }

        progress.notify(&format!("Completed processing {counter} images"));

        Ok(DatasetTable {
            feature_len,
            labels,
            features,
        })
    }
}

/// Lists the PNG files of one gesture directory, sorted case-insensitively.
/// A missing directory or one without any PNG files fails the run.
fn enumerate_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PipelineError::MissingSource {
            path: dir.to_path_buf(),
            reason: "directory does not exist or is not readable".to_string(),
        });
    }

    let pattern = dir.join("*.png");
    let entries = glob::glob(&pattern.to_string_lossy()).map_err(|e| {
        PipelineError::MissingSource {
            path: dir.to_path_buf(),
            reason: format!("invalid glob pattern: {e}"),
        }
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::MissingSource {
            path: dir.to_path_buf(),
            reason: format!("unreadable directory entry: {e}"),
        })?;
        files.push(path);
    }

    if files.is_empty() {
        return Err(PipelineError::MissingSource {
            path: dir.to_path_buf(),
            reason: "no .png files found".to_string(),
        });
    }

    files.sort_by_key(|path| path.to_string_lossy().to_lowercase());
    Ok(files)
}
