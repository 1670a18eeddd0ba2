// Filesystem-backed key-value store.
// One JSON file per key, written atomically via a temp file and rename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Result, SiteError};

use super::paths;
use super::store::KvStore;

/// Per-process sequence giving every write its own temp file.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Store that keeps each key in its own file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform cache directory.
    pub fn new() -> Result<Self> {
        let dir = paths::cache_dir()
            .ok_or_else(|| SiteError::Config("no cache directory available".to_string()))?;
        Ok(Self { dir })
    }

    /// Store rooted at a specific directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(paths::key_path(&self.dir, key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = paths::key_path(&self.dir, key);
        let temp_path = path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let written = write_then_rename(&temp_path, &path, value.as_bytes()).await;
        if written.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        written
    }
}

/// Write `bytes` to `temp_path` and move it over `path` in one rename,
/// so readers see either the old file or the new one.
async fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await?;
    Ok(())
}
