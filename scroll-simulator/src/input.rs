//! Input data handling for scroll simulation
//!
//! Reads scroll traces from CSV files with the header
//! `action,position,value`. Every `*.csv` file in the input directory is a
//! trace; files are replayed in name order.

use crate::models::{TraceEvent, TraceRecord};
use std::io;
use std::path::{Path, PathBuf};

/// Error types for trace parsing
#[derive(Debug, thiserror::Error)]
pub enum TraceParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid trace file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("{}, line {line}: {message}", file.display())]
    Invalid {
        file: PathBuf,
        line: u64,
        message: String,
    },
}

/// Reader for scroll trace files
pub struct TraceReader {
    input_dir: PathBuf,
}

impl TraceReader {
    /// Create a new reader for the given input directory
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
        }
    }

    /// Get all trace files in the input directory, sorted by name
    pub fn get_trace_files(&self) -> Result<Vec<PathBuf>, TraceParseError> {
        let pattern = self.input_dir.join("*.csv");
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable trace path");
                    None
                }
            })
            .collect();

        // Sort files by name for consistent ordering
        files.sort();
        Ok(files)
    }

    /// Parse a single trace file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TraceEvent>, TraceParseError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let mut events = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map_or(0, |p| p.line());
            let record: TraceRecord = row.deserialize(Some(&headers))?;
            let event = TraceEvent::try_from(record).map_err(|message| {
                TraceParseError::Invalid {
                    file: path.to_path_buf(),
                    line,
                    message,
                }
            })?;
            events.push(event);
        }

        tracing::debug!(file = %path.display(), events = events.len(), "parsed trace file");
        Ok(events)
    }

    /// Parse all trace files in the input directory, in order
    pub fn parse_all_files(&self) -> Result<(Vec<TraceEvent>, usize), TraceParseError> {
        let files = self.get_trace_files()?;
        let mut all_events = Vec::new();

        for file in &files {
            all_events.extend(self.parse_file(file)?);
        }

        Ok((all_events, files.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper function to create a temp directory for tests
    fn create_temp_dir(test_name: &str) -> PathBuf {
        let temp_dir = std::env::temp_dir().join(format!("scroll_input_test_{test_name}"));
        let _ = fs::remove_dir_all(&temp_dir); // Clean up any previous runs
        fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        temp_dir
    }

    #[test]
    fn test_parse_trace_file() {
        let dir = create_temp_dir("parse");
        let path = dir.join("trace.csv");
        fs::write(
            &path,
            "action,position,value\n\
             resize,,375\n\
             display,1,\n\
             # rotate back and forth\n\
             edit, 1, 61\n\
             refresh,1,\n\
             reload,,\n",
        )
        .unwrap();

        let events = TraceReader::new(&dir).parse_file(&path).unwrap();
        assert_eq!(
            events,
            vec![
                TraceEvent::Resize { width: 375.0 },
                TraceEvent::Display { item: 1 },
                TraceEvent::Edit { item: 1, length: 61 },
                TraceEvent::Refresh { item: 1 },
                TraceEvent::Reload,
            ]
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_action_reports_line() {
        let dir = create_temp_dir("invalid");
        let path = dir.join("trace.csv");
        fs::write(&path, "action,position,value\ndisplay,0,\nzoom,0,2\n").unwrap();

        let err = TraceReader::new(&dir).parse_file(&path).unwrap_err();
        match err {
            TraceParseError::Invalid { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("zoom"));
            }
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_trace_files_sorted_and_filtered() {
        let dir = create_temp_dir("discover");
        fs::write(dir.join("b.csv"), "action,position,value\nreload,,\n").unwrap();
        fs::write(dir.join("a.csv"), "action,position,value\ndisplay,3,\n").unwrap();
        fs::write(dir.join("notes.txt"), "not a trace").unwrap();

        let reader = TraceReader::new(&dir);
        let files = reader.get_trace_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let (events, count) = reader.parse_all_files().unwrap();
        assert_eq!(count, 2);
        assert_eq!(events, vec![TraceEvent::Display { item: 3 }, TraceEvent::Reload]);
        let _ = fs::remove_dir_all(&dir);
    }
}
