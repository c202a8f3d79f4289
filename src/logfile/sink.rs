//! The append-only CSV destination for one session.
//!
//! One sink per session: created at start with a timestamp-derived name,
//! header written first, every row flushed before the tick completes. A
//! crash loses at most the in-flight row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;

use super::row::header_line;

pub struct CsvSink {
    // None once closed; appends are rejected from then on.
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    file_name: String,
}

impl CsvSink {
    /// Creates `battery_log_<YYYYMMDD_HHmmss>.csv` under `dir`, writes the
    /// header line and flushes it.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let file_name = format!("battery_log_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(&file_name);
        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", header_line())
            .and_then(|_| writer.flush())
            .with_context(|| format!("failed to write log header to {}", path.display()))?;

        Ok(Self {
            writer: Some(writer),
            path,
            file_name,
        })
    }

    /// Appends one data row and flushes it before returning.
    pub fn append(&mut self, row: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow!("log sink {} is closed", self.file_name))?;
        writeln!(writer, "{row}")
            .and_then(|_| writer.flush())
            .with_context(|| format!("failed to append row to {}", self.path.display()))
    }

    /// Flushes and releases the file. Safe to call more than once; appends
    /// after the first close are rejected.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .with_context(|| format!("failed to flush {} on close", self.path.display()))?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_on_create() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = CsvSink::create(tmp.path()).unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, format!("{}\n", header_line()));
        assert!(sink.file_name().starts_with("battery_log_"));
        assert!(sink.file_name().ends_with(".csv"));
    }

    #[test]
    fn appends_rows_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(tmp.path()).unwrap();
        sink.append("row-1").unwrap();
        sink.append("row-2").unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "row-1");
        assert_eq!(lines[2], "row-2");
    }

    #[test]
    fn rejects_append_after_close() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(tmp.path()).unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(sink.append("too-late").is_err());
        // A second close is a no-op, not an error.
        sink.close().unwrap();
    }

    #[test]
    fn creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("logs").join("batlog");
        let sink = CsvSink::create(&nested).unwrap();
        assert!(sink.path().exists());
    }

    #[test]
    fn create_fails_when_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        assert!(CsvSink::create(&blocker).is_err());
    }
}
