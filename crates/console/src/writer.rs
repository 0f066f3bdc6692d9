//! Append-only sample writer for crash-safe session recording.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use markscope_common::error::{MarkscopeError, MarkscopeResult};
use markscope_stream_model::{Sample, SampleStreamHeader};

/// Samples between forced flushes. At 30 fps with every key point
/// logged this is roughly one second of data at risk on a crash.
const FLUSH_EVERY: u64 = 1000;

/// Writes samples to a JSONL file in append-only mode.
pub struct SampleWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    samples_written: u64,
}

impl SampleWriter {
    /// Create a new sample writer, writing the header as the first line.
    pub fn create(path: PathBuf, header: &SampleStreamHeader) -> MarkscopeResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // The header rides in a `# ` comment so sample parsers can skip it.
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| MarkscopeError::stream(format!("Failed to write header: {e}")))?;

        tracing::debug!(path = %path.display(), "recording started");
        Ok(Self {
            writer,
            path,
            samples_written: 0,
        })
    }

    /// Write a single sample as a JSONL line.
    pub fn write_sample(&mut self, sample: &Sample) -> MarkscopeResult<()> {
        let json = serde_json::to_string(sample)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| MarkscopeError::stream(format!("Failed to write sample: {e}")))?;
        self.samples_written += 1;

        if self.samples_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> MarkscopeResult<()> {
        self.writer
            .flush()
            .map_err(|e| MarkscopeError::stream(format!("Failed to flush samples: {e}")))?;
        Ok(())
    }

    /// Number of samples written.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for SampleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markscope_stream_model::{parse_header, parse_samples, Category, Coordinate, LandmarkKey};

    #[test]
    fn test_sample_writer_roundtrip() {
        let dir = std::env::temp_dir().join("markscope_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("session.jsonl");
        let header = SampleStreamHeader {
            schema_version: SampleStreamHeader::SCHEMA_VERSION.to_string(),
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
            device: "linux/x86_64".to_string(),
            throttle_ms: 1000,
        };

        let key = LandmarkKey::new(Category::Pose, "left_wrist", 15);
        {
            let mut writer = SampleWriter::create(path.clone(), &header).unwrap();
            writer
                .write_sample(&Sample::new(0, key.clone(), Coordinate::new(0.5, 0.5, 0.0)))
                .unwrap();
            writer
                .write_sample(&Sample::new(
                    100_000_000,
                    key.clone(),
                    Coordinate::with_visibility(0.52, 0.48, 0.0, 0.97),
                ))
                .unwrap();
            assert_eq!(writer.samples_written(), 2);
        }

        // Read back and verify
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // 1 header + 2 samples
        assert!(lines[0].starts_with("# "));

        let parsed_header = parse_header(&content).unwrap().unwrap();
        assert_eq!(parsed_header, header);

        let samples = parse_samples(&content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].key, key);
        assert_eq!(samples[1].coords.visibility, Some(0.97));

        std::fs::remove_dir_all(&dir).ok();
    }
}
