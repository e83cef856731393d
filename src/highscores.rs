//! High score persistence
//!
//! A single best score behind the `HighScoreStore` port. The browser keeps it
//! in LocalStorage as a plain decimal string; the native build keeps it in a
//! small file. Tests use `MemoryStore`.

use thiserror::Error;

/// LocalStorage key for the best score
pub const STORAGE_KEY: &str = "dinovox_highscore";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored high score is corrupt: {0:?}")]
    Corrupt(String),
    #[error("storage call failed: {0}")]
    Js(String),
}

/// Durable storage for the best score
pub trait HighScoreStore {
    /// Stored best score; 0 if nothing has been stored yet
    fn load(&self) -> Result<u64, StorageError>;
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Parse a stored score. Whole numbers are expected, but a float that
/// some other writer left behind is floored rather than rejected.
pub fn parse_score(raw: &str) -> Result<u64, StorageError> {
    let trimmed = raw.trim();
    if let Ok(score) = trimmed.parse::<u64>() {
        return Ok(score);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.floor() as u64),
        _ => Err(StorageError::Corrupt(raw.to_string())),
    }
}

/// In-process store; counts writes so callers can assert on them
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u64>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            score: Some(score),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn stored(&self) -> Option<u64> {
        self.score
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StorageError> {
        Ok(self.score.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> Result<u64, StorageError> {
        (**self).load()
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        (**self).save(score)
    }
}

/// File-backed store for the native build
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u64, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_score(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// LocalStorage-backed store for the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Js(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, StorageError> {
        let raw = Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| StorageError::Js(format!("{:?}", e)))?;
        match raw {
            Some(raw) => parse_score(&raw),
            None => Ok(0),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(STORAGE_KEY, &score.to_string())
            .map_err(|e| StorageError::Js(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("120").unwrap(), 120);
        assert_eq!(parse_score(" 42\n").unwrap(), 42);
        assert_eq!(parse_score("17.9").unwrap(), 17);
        assert!(matches!(parse_score("abc"), Err(StorageError::Corrupt(_))));
        assert!(matches!(parse_score("-3"), Err(StorageError::Corrupt(_))));
        assert!(matches!(parse_score(""), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(30).unwrap();
        assert_eq!(store.load().unwrap(), 30);
        assert_eq!(store.writes(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file {
        use super::*;
        use tempfile::TempDir;

        #[test]
        fn test_missing_file_is_zero() {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let store = FileStore::new(dir.path().join("best"));
            assert_eq!(store.load().unwrap(), 0);
        }

        #[test]
        fn test_round_trip_creates_parent() {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let mut store = FileStore::new(dir.path().join("nested").join("best"));
            store.save(250).unwrap();
            assert_eq!(FileStore::new(store.path()).load().unwrap(), 250);
        }

        #[test]
        fn test_corrupt_file_reports_corrupt() {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let path = dir.path().join("best");
            std::fs::write(&path, "not a number").unwrap();
            assert!(matches!(FileStore::new(&path).load(), Err(StorageError::Corrupt(_))));
        }
    }
}
