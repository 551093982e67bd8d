use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::store::{StoreError, WordStore};
use crate::trainer::word::Word;

/// Local stand-in for the HTTP backend: the word list lives in a JSON array
/// on disk and is addressed by position, exactly like the server does it.
pub struct FileWordStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from concurrent worker threads.
    lock: Mutex<()>,
}

impl FileWordStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<Vec<Word>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, words: &[Word]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(words)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<Word>) -> Result<(), StoreError>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut words = self.read()?;
        f(&mut words)?;
        self.write(&words)
    }
}

fn invalid_index() -> StoreError {
    StoreError::Rejected {
        status: 404,
        reason: "Invalid index".to_string(),
    }
}

impl WordStore for FileWordStore {
    fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read()
    }

    fn delete_word(&self, index: usize) -> Result<(), StoreError> {
        self.modify(|words| {
            if index >= words.len() {
                return Err(invalid_index());
            }
            words.remove(index);
            Ok(())
        })
    }

    fn add_word(&self, word: &Word) -> Result<(), StoreError> {
        self.modify(|words| {
            words.push(word.clone());
            Ok(())
        })
    }

    fn update_word(&self, index: usize, word: &Word) -> Result<(), StoreError> {
        self.modify(|words| match words.get_mut(index) {
            Some(slot) => {
                *slot = word.clone();
                Ok(())
            }
            None => Err(invalid_index()),
        })
    }

    fn download(&self) -> Result<Vec<u8>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(fs::read(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(words: &[Word]) -> (TempDir, FileWordStore) {
        let dir = TempDir::new().unwrap();
        let store = FileWordStore::new(dir.path().join("words.json"));
        store.write(words).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileWordStore::new(dir.path().join("nope.json"));
        assert!(store.list_words().unwrap().is_empty());
    }

    #[test]
    fn test_delete_by_position() {
        let (_dir, store) = store_with(&[Word::new("a", ""), Word::new("b", ""), Word::new("c", "")]);
        store.delete_word(1).unwrap();
        let words = store.list_words().unwrap();
        assert_eq!(words, vec![Word::new("a", ""), Word::new("c", "")]);
    }

    #[test]
    fn test_delete_out_of_range_is_rejected() {
        let (_dir, store) = store_with(&[Word::new("a", "")]);
        let err = store.delete_word(5).unwrap_err();
        assert_eq!(err.rejection_reason(), Some("Invalid index"));
        assert_eq!(store.list_words().unwrap().len(), 1);
    }

    #[test]
    fn test_add_and_update() {
        let (_dir, store) = store_with(&[]);
        store.add_word(&Word::new("gato", "El gato duerme.")).unwrap();
        store.update_word(0, &Word::new("gata", "La gata duerme.")).unwrap();
        assert_eq!(store.list_words().unwrap(), vec![Word::new("gata", "La gata duerme.")]);
        assert!(store.update_word(3, &Word::new("x", "")).is_err());
    }

    #[test]
    fn test_download_returns_file_bytes() {
        let (_dir, store) = store_with(&[Word::new("a", "b")]);
        let bytes = store.download().unwrap();
        let words: Vec<Word> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(words, vec![Word::new("a", "b")]);
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, "not json").unwrap();
        let store = FileWordStore::new(path);
        assert!(matches!(store.list_words(), Err(StoreError::Decode(_))));
    }
}
