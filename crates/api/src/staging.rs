//! Filesystem staging for uploaded CSV files.
//!
//! Uploads live under `<root>/<environment_id>/<file_id>.csv`. The file id
//! is always a UUID, so a caller-supplied id can never escape its
//! environment's directory, and a file staged for one environment is not
//! visible from another.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use stackdesk_core::error::CoreError;
use stackdesk_core::tabular::{parse_csv, FileId, TabularStore};
use stackdesk_core::types::DbId;

const ENTITY: &str = "ImportFile";

/// Root of the staging area. Hands out one [`FsTabularStore`] per
/// environment.
#[derive(Debug, Clone)]
pub struct UploadStaging {
    root: PathBuf,
}

impl UploadStaging {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store holding uploads for `environment_id`.
    pub fn for_environment(&self, environment_id: DbId) -> FsTabularStore {
        FsTabularStore::new(self.root.join(environment_id.to_string()))
    }

    /// Create the root directory if needed.
    pub async fn ensure_root(&self) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create staging dir: {e}")))
    }

    /// Delete staged files last modified more than `max_age` ago, returning
    /// how many were removed. A missing root counts as empty.
    pub async fn purge_older_than(&self, max_age: Duration) -> Result<usize, CoreError> {
        let io = |e: std::io::Error| CoreError::Internal(format!("Failed to purge staging: {e}"));
        let now = SystemTime::now();

        let mut environments = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(io(e)),
        };

        let mut removed = 0;
        while let Some(environment) = environments.next_entry().await.map_err(io)? {
            if !environment.file_type().await.map_err(io)?.is_dir() {
                continue;
            }
            let mut files = tokio::fs::read_dir(environment.path()).await.map_err(io)?;
            while let Some(file) = files.next_entry().await.map_err(io)? {
                let modified = file.metadata().await.and_then(|m| m.modified()).map_err(io)?;
                let age = now.duration_since(modified).unwrap_or_default();
                if age >= max_age {
                    tokio::fs::remove_file(file.path()).await.map_err(io)?;
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}

/// How often the background task sweeps the staging area.
const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Purge stale uploads now and then every [`PURGE_INTERVAL`] until aborted.
pub fn spawn_purge_task(staging: UploadStaging, ttl: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match staging.purge_older_than(ttl).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged stale import uploads"),
                Err(e) => tracing::warn!(error = %e, "Staging purge failed"),
            }
        }
    })
}

/// [`TabularStore`] backed by a local directory.
#[derive(Debug, Clone)]
pub struct FsTabularStore {
    dir: PathBuf,
}

impl FsTabularStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: FileId) -> PathBuf {
        self.dir.join(format!("{id}.csv"))
    }
}

fn missing(id: FileId) -> CoreError {
    CoreError::Missing {
        entity: ENTITY,
        key: id.to_string(),
    }
}

#[async_trait]
impl TabularStore for FsTabularStore {
    async fn save(&self, bytes: &[u8]) -> Result<FileId, CoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create staging dir: {e}")))?;

        let id = FileId::generate();
        tokio::fs::write(self.path_for(id), bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to stage upload {id}: {e}")))?;

        tracing::debug!(file_id = %id, bytes = bytes.len(), "Staged import file");
        Ok(id)
    }

    async fn read(&self, id: FileId) -> Result<Vec<Vec<String>>, CoreError> {
        let bytes = match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(missing(id)),
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "Failed to read staged upload {id}: {e}"
                )))
            }
        };
        parse_csv(&bytes)
    }

    async fn delete(&self, id: FileId) -> Result<(), CoreError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(missing(id)),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to delete staged upload {id}: {e}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    fn staging() -> (TempDir, UploadStaging) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let staging = UploadStaging::new(dir.path());
        (dir, staging)
    }

    #[tokio::test]
    async fn save_then_read_returns_rows() {
        let (_dir, staging) = staging();
        let store = staging.for_environment(1);
        let id = store.save(b"client,project\nAcme,Portal\n").await.unwrap();

        let rows = store.read(id).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Acme".to_string(), "Portal".to_string()]);
    }

    #[tokio::test]
    async fn files_live_inside_the_staging_root() {
        let (dir, staging) = staging();
        let id = staging.for_environment(3).save(b"a\n").await.unwrap();

        let path = dir.path().join("3").join(format!("{id}.csv"));
        assert!(path.exists());

        let root = dir.path().to_path_buf();
        drop(dir);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let (_dir, staging) = staging();
        let store = staging.for_environment(1);
        let id = store.save(b"a\n").await.unwrap();

        store.delete(id).await.unwrap();

        assert_matches!(store.read(id).await, Err(CoreError::Missing { .. }));
        assert_matches!(store.delete(id).await, Err(CoreError::Missing { .. }));
    }

    #[tokio::test]
    async fn unknown_id_is_missing() {
        let (_dir, staging) = staging();
        assert_matches!(
            staging.for_environment(1).read(FileId::generate()).await,
            Err(CoreError::Missing { entity: "ImportFile", .. })
        );
    }

    #[tokio::test]
    async fn uploads_are_scoped_to_their_environment() {
        let (_dir, staging) = staging();
        let id = staging.for_environment(1).save(b"a\n").await.unwrap();

        let other = staging.for_environment(2);
        assert_matches!(other.read(id).await, Err(CoreError::Missing { .. }));
        assert_matches!(other.delete(id).await, Err(CoreError::Missing { .. }));
        assert!(staging.for_environment(1).read(id).await.is_ok());
    }

    #[tokio::test]
    async fn purge_removes_stale_files_only() {
        let (_dir, staging) = staging();
        let store = staging.for_environment(1);
        let id = store.save(b"a\n").await.unwrap();

        assert_eq!(staging.purge_older_than(Duration::from_secs(3600)).await.unwrap(), 0);
        assert!(store.read(id).await.is_ok());

        assert_eq!(staging.purge_older_than(Duration::ZERO).await.unwrap(), 1);
        assert_matches!(store.read(id).await, Err(CoreError::Missing { .. }));
    }

    #[tokio::test]
    async fn purge_of_missing_root_is_a_no_op() {
        let (dir, _) = staging();
        let staging = UploadStaging::new(dir.path().join("never-created"));
        assert_eq!(staging.purge_older_than(Duration::ZERO).await.unwrap(), 0);
    }
}
