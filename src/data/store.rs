use std::path::{Path, PathBuf};

use anyhow::Result;

use super::loader::LoadCache;
use super::model::{RawTable, Table};
use super::writer::write_file;

/// Optional on-disk copy of the collection at a fixed path.
///
/// Read only on request, overwritten wholesale on save.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Raw rows of the stored file, or `None` if there is no file yet.
    pub fn load(&self, cache: &mut LoadCache) -> Result<Option<RawTable>> {
        if !self.exists() {
            log::info!("no local file at {}", self.path.display());
            return Ok(None);
        }
        cache.load(&self.path).map(Some)
    }

    /// Replace the stored file with `table`, creating its directory if needed.
    pub fn save(&self, table: &Table) -> Result<()> {
        write_file(&self.path, table)?;
        log::info!("saved {} pins to {}", table.len(), self.path.display());
        Ok(())
    }
}
