// THEORY:
// The `ChunkedCsvWriter` persists the dataset table as a series of
// bounded-size CSV files so very wide feature tables stay manageable for
// storage and transfer. Chunking is a pure partition of the table: files
// are written in ascending index order, every chunk except the last holds
// exactly `rows_per_chunk` rows, and concatenating all chunks in order
// reconstructs the table with no row duplicated, skipped or reordered.
//
// The first column carries the table-wide row index, continuing across
// chunk boundaries, so any chunk can be traced back to its position in the
// full table. A write failure aborts the remaining chunks; chunks already
// on disk are left in place and cleanup on retry is the caller's job.

use crate::dataset::DatasetTable;
use crate::error::{PipelineError, Result};
use crate::progress::ProgressSink;
use std::path::PathBuf;

/// Default number of rows per exported chunk file.
pub const DEFAULT_ROWS_PER_CHUNK: usize = 100;

/// Writes a dataset table to disk as `{basename}.{index}.csv` chunks.
pub struct ChunkedCsvWriter {
    rows_per_chunk: usize,
}

impl ChunkedCsvWriter {
    pub fn new(rows_per_chunk: usize) -> Self {
        assert!(rows_per_chunk > 0, "rows_per_chunk must be positive");
        Self { rows_per_chunk }
    }

    /// Exports the table, returning the chunk file paths in index order.
    pub fn write(
        &self,
        table: &DatasetTable,
        basename: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<PathBuf>> {
        let rows = table.rows();
        let chunks = rows.div_ceil(self.rows_per_chunk);
        progress.notify(&format!("Number of .csv files: {chunks}"));

        let mut header: Vec<String> = Vec::with_capacity(table.feature_len + 2);
        header.push(String::new());
        header.push("label".to_string());
        for i in 0..table.feature_len {
            header.push(format!("f{i}"));
        }

        let mut written = Vec::with_capacity(chunks);
        for chunk_index in 0..chunks {
            let start = chunk_index * self.rows_per_chunk;
            let end = rows.min(start + self.rows_per_chunk);
            let path = PathBuf::from(format!("{basename}.{chunk_index}.csv"));

            progress.notify(&format!(
                "Saving rows {} to {} to {}",
                start,
                end - 1,
                path.display()
            ));

            self.write_chunk(table, start, end, &header, &path)?;
            written.push(path);
        }

        Ok(written)
    }

    fn write_chunk(
        &self,
        table: &DatasetTable,
        start: usize,
        end: usize,
        header: &[String],
        path: &PathBuf,
    ) -> Result<()> {
        let chunk_error = |source| PipelineError::ChunkWrite {
            path: path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(path).map_err(chunk_error)?;
        writer.write_record(header).map_err(chunk_error)?;

        let mut record: Vec<String> = Vec::with_capacity(header.len());
        for row in start..end {
            let (label, features) = table.row(row);
            record.clear();
            record.push(row.to_string());
            record.push(label.to_string());
            record.extend(features.iter().map(|v| v.to_string()));
            writer.write_record(&record).map_err(chunk_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NullSink, RecordingSink};
    use std::fs;
    use std::path::Path;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gesture_features_export_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_table(rows: usize, feature_len: usize) -> DatasetTable {
        DatasetTable {
            feature_len,
            labels: (0..rows).map(|r| (r % 3 + 1) as u8).collect(),
            features: (0..rows * feature_len).map(|v| v as f64 * 0.25).collect(),
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn chunk_count_and_sizes_follow_ceiling_division() {
        let dir = scratch_dir("sizes");
        let table = sample_table(6, 2);
        let basename = dir.join("imgdata").to_string_lossy().to_string();

        let files = ChunkedCsvWriter::new(4)
            .write(&table, &basename, &mut NullSink)
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("imgdata.0.csv"));
        assert!(files[1].ends_with("imgdata.1.csv"));
        // Header row plus 4 and 2 data rows.
        assert_eq!(read_rows(&files[0]).len(), 5);
        assert_eq!(read_rows(&files[1]).len(), 3);
    }

    #[test]
    fn concatenated_chunks_reproduce_the_table() {
        let dir = scratch_dir("roundtrip");
        let table = sample_table(7, 3);
        let basename = dir.join("imgdata").to_string_lossy().to_string();

        let files = ChunkedCsvWriter::new(3)
            .write(&table, &basename, &mut NullSink)
            .unwrap();
        assert_eq!(files.len(), 3);

        let mut all_rows = Vec::new();
        for file in &files {
            let rows = read_rows(file);
            assert_eq!(
                rows[0][..2],
                ["".to_string(), "label".to_string()]
            );
            assert_eq!(rows[0][2], "f0");
            all_rows.extend(rows.into_iter().skip(1));
        }

        assert_eq!(all_rows.len(), table.rows());
        for (index, row) in all_rows.iter().enumerate() {
            // The row-index column is table-wide, continuing across chunks.
            assert_eq!(row[0], index.to_string());
            let (label, features) = table.row(index);
            assert_eq!(row[1], label.to_string());
            for (cell, value) in row[2..].iter().zip(features) {
                assert_eq!(cell.parse::<f64>().unwrap(), *value);
            }
        }
    }

    #[test]
    fn exact_division_produces_no_trailing_empty_chunk() {
        let dir = scratch_dir("remainder");
        let table = sample_table(100, 1);
        let basename = dir.join("imgdata").to_string_lossy().to_string();

        // Exactly divisible: no extra empty chunk.
        let files = ChunkedCsvWriter::new(50)
            .write(&table, &basename, &mut NullSink)
            .unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(read_rows(&files[1]).len(), 51);
    }

    #[test]
    fn reports_row_ranges_per_chunk() {
        let dir = scratch_dir("progress");
        let table = sample_table(5, 1);
        let basename = dir.join("imgdata").to_string_lossy().to_string();

        let mut sink = RecordingSink(Vec::new());
        ChunkedCsvWriter::new(4)
            .write(&table, &basename, &mut sink)
            .unwrap();

        assert_eq!(sink.0[0], "Number of .csv files: 2");
        assert!(sink.0[1].starts_with("Saving rows 0 to 3 to "));
        assert!(sink.0[2].starts_with("Saving rows 4 to 4 to "));
    }

    #[test]
    fn rewriting_is_byte_identical() {
        let dir = scratch_dir("determinism");
        let table = sample_table(6, 2);
        let first = dir.join("a").to_string_lossy().to_string();
        let second = dir.join("b").to_string_lossy().to_string();

        let writer = ChunkedCsvWriter::new(4);
        let first_files = writer.write(&table, &first, &mut NullSink).unwrap();
        let second_files = writer.write(&table, &second, &mut NullSink).unwrap();

        for (a, b) in first_files.iter().zip(&second_files) {
            assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
        }
    }
}
