use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::ScoreError;

/// Persistent best-score storage.
pub trait ScoreStore {
    /// Returns the stored best score, `0` if nothing was ever recorded.
    fn load(&mut self) -> Result<u32, ScoreError>;

    /// Replaces the stored best score.
    fn save(&mut self, value: u32) -> Result<(), ScoreError>;
}

/// Keeps the best score as plain decimal text in a single file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// When the stored record was last written, if the file exists.
    pub fn recorded_at(&self) -> Option<DateTime<Local>> {
        let modified = fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()?;
        Some(DateTime::<Local>::from(modified))
    }

    fn io_error(&self, source: std::io::Error) -> ScoreError {
        ScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> Result<u32, ScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // First run: bootstrap the file with a zero record.
                self.save(0)?;
                return Ok(0);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        contents.trim().parse().map_err(|_| ScoreError::Parse {
            path: self.path.clone(),
            contents,
        })
    }

    fn save(&mut self, value: u32) -> Result<(), ScoreError> {
        fs::write(&self.path, value.to_string()).map_err(|e| self.io_error(e))
    }
}

/// In-memory store, used when no file should be touched.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: u32,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value, saves: 0 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<u32, ScoreError> {
        Ok(self.value)
    }

    fn save(&mut self, value: u32) -> Result<(), ScoreError> {
        self.value = value;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_creates_zero_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        let mut store = FileScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
        assert!(store.recorded_at().is_some());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        let mut store = FileScoreStore::new(&path);
        store.save(120).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "120");
        assert_eq!(FileScoreStore::new(&path).load().unwrap(), 120);
    }

    #[test]
    fn test_load_tolerates_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "45\n").unwrap();
        assert_eq!(FileScoreStore::new(&path).load().unwrap(), 45);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "lots").unwrap();
        let result = FileScoreStore::new(&path).load();
        assert!(matches!(result, Err(ScoreError::Parse { .. })));
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("highscore.txt");
        let result = FileScoreStore::new(&path).load();
        assert!(matches!(result, Err(ScoreError::Io { .. })));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryScoreStore::new(5);
        assert_eq!(store.load().unwrap(), 5);
        store.save(9).unwrap();
        assert_eq!(store.value(), 9);
        assert_eq!(store.saves(), 1);
    }
}
