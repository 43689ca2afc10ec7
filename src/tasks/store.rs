//! Task persistence.
//!
//! Tasks are stored one per line as `checked||type||text`. The file is
//! rewritten in full on every save.

use super::task::{Importance, TaskRecord};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Field separator in the persisted file.
pub const DELIMITER: &str = "||";

/// Default file name, placed in the user's home directory.
pub const DEFAULT_FILE_NAME: &str = "todo_sidebar_tasks.txt";

/// Storage error types.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No home directory available for the task file")]
    NoHomeDir,
}

/// Load/save contract used by the controller.
pub trait TaskStore {
    /// Read every record, in display order.
    fn load(&self) -> Result<Vec<TaskRecord>, StoreError>;

    /// Replace the stored list with `records`.
    fn save(&mut self, records: &[TaskRecord]) -> Result<(), StoreError>;
}

/// Encode one record as a line, without the trailing newline.
pub fn encode_record(record: &TaskRecord) -> String {
    let checked = if record.checked { "1" } else { "0" };
    format!(
        "{checked}{DELIMITER}{}{DELIMITER}{}",
        record.importance.as_str(),
        record.text
    )
}

/// Decode one line. Returns `None` for blank lines and lines with fewer
/// than three fields; the third field is the rest of the line.
pub fn decode_line(line: &str) -> Option<TaskRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.splitn(3, DELIMITER);
    let checked = parts.next()?;
    let importance = parts.next()?;
    let text = parts.next()?;

    Some(TaskRecord {
        checked: checked == "1",
        importance: Importance::from_token(importance),
        text: text.to_string(),
    })
}

/// Decode a whole file body, skipping malformed lines.
pub fn decode_all(contents: &str) -> Vec<TaskRecord> {
    contents.lines().filter_map(decode_or_warn).collect()
}

fn decode_or_warn(line: &str) -> Option<TaskRecord> {
    let record = decode_line(line);
    if record.is_none() && !line.trim().is_empty() {
        tracing::warn!(line = %line, "skipping malformed task line");
    }
    record
}

/// Decode raw file bytes line by line. A line that is not valid UTF-8 is
/// skipped like any other malformed line.
pub fn decode_bytes(bytes: &[u8]) -> Vec<TaskRecord> {
    bytes
        .split(|&b| b == b'\n')
        .filter_map(|line| match std::str::from_utf8(line) {
            Ok(line) => decode_or_warn(line),
            Err(e) => {
                tracing::warn!(error = %e, "skipping task line that is not valid UTF-8");
                None
            }
        })
        .collect()
}

/// Encode a whole file body, one newline-terminated record per task.
pub fn encode_all(records: &[TaskRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_record(record));
        out.push('\n');
    }
    out
}

/// Plain-text task file.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/todo_sidebar_tasks.txt`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_FILE_NAME))
            .ok_or(StoreError::NoHomeDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> Result<Vec<TaskRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no task file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records = decode_bytes(&bytes);
        tracing::info!(path = %self.path.display(), count = records.len(), "loaded tasks");
        Ok(records)
    }

    fn save(&mut self, records: &[TaskRecord]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(encode_all(records).as_bytes())
            .map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "saved tasks");
        Ok(())
    }
}

/// Store that keeps records in memory. Useful for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryTaskStore {
    pub records: Vec<TaskRecord>,

    /// Number of successful saves
    pub saves: usize,

    /// When set, every save fails
    pub fail_saves: bool,
}

impl MemoryTaskStore {
    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }
}

impl TaskStore for MemoryTaskStore {
    fn load(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[TaskRecord]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(ErrorKind::Other, "saves disabled"),
            });
        }
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(checked: bool, importance: Importance, text: &str) -> TaskRecord {
        TaskRecord {
            checked,
            importance,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_encode_record() {
        assert_eq!(
            encode_record(&record(true, Importance::Important, "call mum")),
            "1||important||call mum"
        );
        assert_eq!(
            encode_record(&record(false, Importance::Normal, "water plants")),
            "0||normal||water plants"
        );
    }

    #[test]
    fn test_decode_keeps_delimiter_in_text() {
        assert_eq!(
            decode_line("0||normal||a || b||c"),
            Some(record(false, Importance::Normal, "a || b||c"))
        );
    }

    #[test]
    fn test_decode_skips_short_lines() {
        assert_eq!(decode_line("1||important"), None);
        assert_eq!(decode_line("just text"), None);
        assert_eq!(decode_line("   "), None);
    }

    #[test]
    fn test_decode_lenient_flags() {
        assert_eq!(
            decode_line("yes||urgent||x\r"),
            Some(record(false, Importance::Normal, "x"))
        );
    }

    #[test]
    fn test_decode_all_ignores_malformed_line() {
        let body = "1||important||keep me\n0||normal\n";
        assert_eq!(
            decode_all(body),
            vec![record(true, Importance::Important, "keep me")]
        );
    }

    #[test]
    fn test_file_store_skips_invalid_utf8_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(
            &path,
            b"0||normal||keep one\n0||normal||bad \xff byte\n1||important||keep two\n",
        )
        .unwrap();

        let store = FileTaskStore::new(&path);
        assert_eq!(
            store.load().unwrap(),
            vec![
                record(false, Importance::Normal, "keep one"),
                record(true, Importance::Important, "keep two"),
            ]
        );
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::new(dir.path().join("missing.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_rewrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut store = FileTaskStore::new(&path);

        store
            .save(&[
                record(false, Importance::Normal, "one"),
                record(true, Importance::Important, "two"),
            ])
            .unwrap();
        store
            .save(&[record(false, Importance::Normal, "three")])
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "0||normal||three\n");
    }

    #[test]
    fn test_file_store_save_load_save_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.txt");
        let mut store = FileTaskStore::new(&path);
        let original = vec![
            record(true, Importance::Important, "renew passport"),
            record(false, Importance::Normal, "book dentist"),
            record(false, Importance::Important, "売り込み"),
        ];

        store.save(&original).unwrap();
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        assert_eq!(store.load().unwrap(), original);
    }

    #[test]
    fn test_memory_store_failure() {
        let mut store = MemoryTaskStore {
            fail_saves: true,
            ..MemoryTaskStore::default()
        };
        assert!(matches!(store.save(&[]), Err(StoreError::Write { .. })));
        assert_eq!(store.saves, 0);
    }
}
