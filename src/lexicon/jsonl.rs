//! lexicon::jsonl
//!
//! Line-oriented JSON reading and writing.
//!
//! # Format
//!
//! One JSON object per line. Blank lines are skipped on read. Parse errors
//! carry the file path and 1-based line number so a bad row in a
//! million-line lexicon is findable.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from JSONL I/O.
#[derive(Debug, Error)]
pub enum JsonlError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid JSON: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Iterator over deserialized JSONL rows.
///
/// Yields `Result` per row; callers decide whether a bad row aborts the
/// read or is counted and skipped.
pub struct JsonlReader<T> {
    path: PathBuf,
    lines: std::io::Lines<BufReader<File>>,
    line_no: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Open a JSONL file for reading.
    pub fn open(path: &Path) -> Result<Self, JsonlError> {
        let file = File::open(path).map_err(|source| JsonlError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
            _marker: std::marker::PhantomData,
        })
    }
}

impl<T: DeserializeOwned> Iterator for JsonlReader<T> {
    type Item = Result<T, JsonlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(JsonlError::Read {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(trimmed).map_err(|e| JsonlError::Parse {
                path: self.path.clone(),
                line: self.line_no,
                message: e.to_string(),
            }));
        }
    }
}

/// Read an entire JSONL file, failing on the first bad row.
pub fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, JsonlError> {
    JsonlReader::open(path)?.collect()
}

/// Buffered JSONL writer.
///
/// Creates parent directories on open. Rows are written compact, one per
/// line; Arabic text stays unescaped (serde_json writes UTF-8 natively).
pub struct JsonlWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    rows: usize,
}

impl JsonlWriter {
    /// Create (truncate) a JSONL file for writing.
    pub fn create(path: &Path) -> Result<Self, JsonlError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| JsonlError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| JsonlError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(file),
            rows: 0,
        })
    }

    /// Append one row.
    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<(), JsonlError> {
        let json = serde_json::to_string(row).map_err(|e| JsonlError::Parse {
            path: self.path.clone(),
            line: self.rows + 1,
            message: e.to_string(),
        })?;
        writeln!(self.inner, "{}", json).map_err(|source| JsonlError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close the file.
    pub fn finish(mut self) -> Result<usize, JsonlError> {
        self.inner.flush().map_err(|source| JsonlError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.rows)
    }
}

/// Write all rows to a JSONL file, returning the row count.
pub fn write_all<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, JsonlError> {
    let mut writer = JsonlWriter::create(path)?;
    for row in rows {
        writer.write(row)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::record::LexiconRecord;
    use tempfile::TempDir;

    #[test]
    fn round_trip_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(
            &path,
            "{\"lemma\":\"كتاب\"}\n\n   \n{\"lemma\":\"قلم\",\"root\":\"قلم\"}\n",
        )
        .unwrap();

        let rows: Vec<LexiconRecord> = read_all(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lemma, "كتاب");
        assert_eq!(rows[1].root.as_deref(), Some("قلم"));
    }

    #[test]
    fn parse_error_carries_line_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(&path, "{\"lemma\":\"ok\"}\nnot json\n").unwrap();

        let err = read_all::<LexiconRecord>(&path).unwrap_err();
        match err {
            JsonlError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn writer_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.jsonl");
        let rows = vec![LexiconRecord::new("كتاب")];
        let written = write_all(&path, &rows).unwrap();
        assert_eq!(written, 1);

        let body = fs::read_to_string(&path).unwrap();
        assert_eq!(body, "{\"lemma\":\"كتاب\"}\n");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = read_all::<LexiconRecord>(Path::new("/no/such/file.jsonl")).unwrap_err();
        assert!(matches!(err, JsonlError::Open { .. }));
    }
}
