//! Reading and atomically rewriting the located config file.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::locate::ConfigLocation;
use crate::{setting, Error};

/// A located `wp-config.php`, read fresh on every access.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    location: ConfigLocation,
}

impl ConfigDocument {
    pub fn new(location: ConfigLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &ConfigLocation {
        &self.location
    }

    /// Raw file content. No encoding is assumed.
    pub async fn read(&self) -> Result<Vec<u8>, Error> {
        let path = self.location.path();
        tokio::fs::read(path)
            .await
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Replaces the file's content via a temp file renamed into place.
    ///
    /// The temp file is created next to the target so the rename stays on
    /// one filesystem, and it takes over the target's permissions.
    pub async fn write(&self, content: Vec<u8>) -> Result<(), Error> {
        let path = self.location.path().to_path_buf();
        let dir = self.location.directory().to_path_buf();

        let target = path.clone();
        let result = tokio::task::spawn_blocking(move || {
            write_atomic(&target, &dir, &content)
        })
        .await
        .unwrap_or_else(|join| Err(io::Error::other(join)));

        result.map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "config file written");
        Ok(())
    }

    /// Current value of setting `id`.
    pub async fn get(&self, id: &str) -> Result<Option<String>, Error> {
        setting::lookup(id)?;
        let content = self.read().await?;
        setting::get(&content, id)
    }

    /// Current value of setting `id`; a missing or wrongly shaped definition
    /// is an error.
    pub async fn require(&self, id: &str) -> Result<String, Error> {
        setting::lookup(id)?;
        let content = self.read().await?;
        setting::require(&content, id)
    }

    /// Reads, rewrites setting `id` to `value`, and writes back.
    ///
    /// Nothing is written when the value is already in place.
    pub async fn set(&self, id: &str, value: &str) -> Result<(), Error> {
        setting::lookup(id)?;
        let content = self.read().await?;
        let updated = setting::set(&content, id, value)?;
        if updated == content {
            tracing::debug!(setting = id, "value unchanged, skipping write");
            return Ok(());
        }
        self.write(updated).await
    }
}

fn write_atomic(path: &Path, dir: &Path, content: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
