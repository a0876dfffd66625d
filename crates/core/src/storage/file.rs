use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Error, Result};

/// Stores each key as its own file under a directory.
///
/// Writes go to a uniquely named temp file in the same directory and are
/// renamed into place, so a reader never sees a half-written value and
/// concurrent writers never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Validation(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value)?;
        tmp.persist(&path).map_err(|e| Error::from(e.error))?;
        Ok(())
    }
}
