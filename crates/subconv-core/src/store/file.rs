//! Directory-backed store: one `<key>.json` file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Result, SubconvError};

/// Suffix for the temp file written before the atomic rename.
const TEMP_SUFFIX: &str = ".tmp";

/// Store that keeps each key in its own JSON file under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Default location: `~/.local/share/subconv/`.
    pub fn default_dir() -> anyhow::Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("subconv")?;
        Ok(xdg_dirs.get_data_home().join("subconv"))
    }

    /// Open the store in the default XDG data directory, creating it if needed.
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = Self::default_dir()?;
        Ok(Self::open_at(dir)?)
    }

    /// Open (or create) a store rooted at `dir`.
    pub fn open_at(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| SubconvError::io("create store dir", &dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let ok = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !ok {
            return Err(SubconvError::io(
                "invalid store key",
                self.dir.join(key),
                io::Error::new(io::ErrorKind::InvalidInput, "keys are [A-Za-z0-9_-]+"),
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SubconvError::io("read", path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(TEMP_SUFFIX);
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, value).map_err(|e| SubconvError::io("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| SubconvError::io("rename", &path, e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SubconvError::io("remove", path, e)),
        }
    }
}
