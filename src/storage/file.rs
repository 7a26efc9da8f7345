//! File-backed key-value store (`key = value` lines).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::Result;
use crate::util::config::{lookup, upsert};

/// Header written when the store creates the file.
const FILE_HEADER: &str = "# Leafscan preferences\n# Managed by leafscan; comments and unknown lines are preserved.\n";

/// Preferences persisted in a plain text file under the config directory.
///
/// Blocking filesystem work runs on tokio's blocking pool. Writes are serialized
/// through an async mutex so concurrent `set` calls cannot lose each other's updates.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Location of the preferences file.
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Store backed by the file at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What: Read the whole file, treating a missing file as empty.
///
/// # Errors
/// - Any I/O error other than `NotFound`.
fn read_content(path: &Path) -> std::io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// What: Rewrite one entry in the file.
///
/// Details:
/// - Creates the parent directory and seeds new or empty files with [`FILE_HEADER`].
/// - Writes to a sibling temp file and renames it over the original.
fn write_entry(path: &Path, key: &str, value: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut content = read_content(path)?;
    if content.trim().is_empty() {
        content = FILE_HEADER.to_string();
    }
    let updated = upsert(&content, key, value);
    let tmp = path.with_extension("conf.tmp");
    fs::write(&tmp, updated)?;
    fs::rename(&tmp, path)
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path.clone();
        let key = key.to_string();
        let value = tokio::task::spawn_blocking(move || {
            read_content(&path).map(|content| lookup(&content, &key).map(str::to_string))
        })
        .await??;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        let key = key.to_string();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || write_entry(&path, &key, &value)).await??;
        tracing::trace!(path = %self.path.display(), "preferences file updated");
        Ok(())
    }
}
