//! Durable identity → display label mapping.
//!
//! Reads share a `RwLock` and never wait on each other. Writes are serialized
//! by a separate mutex inside the process and by an exclusive lock on
//! `<path>.lock` across processes. Each write re-reads the file, merges in the
//! new label, writes `<path>.tmp`, syncs it, renames it into place, and syncs
//! the directory. Only then is the in-memory map updated, so a failed write
//! leaves both the file and the in-memory map unchanged.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};

use crate::error::PipelineError;

pub struct LabelStore {
    path: Option<PathBuf>,
    labels: RwLock<HashMap<String, String>>,
    write_lock: Mutex<()>,
}

impl LabelStore {
    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            labels: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Open a file-backed store. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LabelLoad`] if the file exists but cannot be
    /// read, or [`PipelineError::LabelDecode`] if it is not a JSON object of
    /// strings.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        let labels = read_labels(&path).await?;

        tracing::info!(path = %path.display(), count = labels.len(), "label store opened");

        Ok(Self {
            path: Some(path),
            labels: RwLock::new(labels),
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn get(&self, identity: &str) -> Option<String> {
        self.labels.read().await.get(identity).cloned()
    }

    /// The stored label, or `default` when the identity never set one.
    pub async fn get_or(&self, identity: &str, default: &str) -> String {
        self.get(identity)
            .await
            .unwrap_or_else(|| default.to_string())
    }

    /// Overwrite the label for `identity`, persisting before returning.
    ///
    /// Labels written to the same file by another process since this store
    /// was opened are merged in rather than overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LabelPersist`] if the file could not be locked
    /// or written, or [`PipelineError::LabelLoad`] / [`PipelineError::LabelDecode`]
    /// if the current file cannot be re-read. The in-memory map is left
    /// unchanged in every error case.
    pub async fn set(&self, identity: &str, label: &str) -> Result<(), PipelineError> {
        let _guard = self.write_lock.lock().await;

        let Some(path) = &self.path else {
            self.labels
                .write()
                .await
                .insert(identity.to_string(), label.to_string());
            return Ok(());
        };

        let _file_lock = lock_exclusive(path).await?;

        let mut snapshot = self.entries().await;
        snapshot.extend(read_labels(path).await?);
        snapshot.insert(identity.to_string(), label.to_string());
        persist(path, &snapshot).await?;

        *self.labels.write().await = snapshot.into_iter().collect();
        Ok(())
    }

    /// All labels ordered by identity.
    pub async fn entries(&self) -> BTreeMap<String, String> {
        self.labels
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.labels.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.labels.read().await.is_empty()
    }
}

/// Current file contents; a missing or blank file is an empty map.
async fn read_labels(path: &Path) -> Result<HashMap<String, String>, PipelineError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(PipelineError::LabelLoad {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn persist_err(path: &Path) -> impl Fn(std::io::Error) -> PipelineError + '_ {
    move |source| PipelineError::LabelPersist {
        path: path.display().to_string(),
        source,
    }
}

/// Block until this process holds the exclusive lock on `<path>.lock`.
/// The lock is released when the returned handle is dropped.
async fn lock_exclusive(path: &Path) -> Result<File, PipelineError> {
    let io_err = persist_err(path);

    tokio::fs::create_dir_all(parent_dir(path))
        .await
        .map_err(&io_err)?;

    let lock_path = with_suffix(path, ".lock");
    tokio::task::spawn_blocking(move || {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.lock()?;
        Ok::<File, std::io::Error>(file)
    })
    .await
    .map_err(std::io::Error::other)
    .and_then(|locked| locked)
    .map_err(io_err)
}

async fn persist(path: &Path, labels: &BTreeMap<String, String>) -> Result<(), PipelineError> {
    let io_err = persist_err(path);

    let body = serde_json::to_vec_pretty(labels)?;
    let tmp = with_suffix(path, ".tmp");

    let mut file = tokio::fs::File::create(&tmp).await.map_err(&io_err)?;
    file.write_all(&body).await.map_err(&io_err)?;
    file.sync_all().await.map_err(&io_err)?;
    drop(file);

    tokio::fs::rename(&tmp, path).await.map_err(&io_err)?;

    // The rename itself is only durable once the directory entry is flushed.
    #[cfg(unix)]
    tokio::fs::File::open(parent_dir(path))
        .await
        .map_err(&io_err)?
        .sync_all()
        .await
        .map_err(&io_err)?;

    Ok(())
}
