//! Local artifact storage for generated videos.
//!
//! [`ArtifactStore`] persists inline video payloads under a web-servable
//! public directory and hands back the stable public path the serving layer
//! exposes. Remote provider references never pass through here; the
//! pipeline returns them to callers unchanged, with no local copy.
//!
//! Filenames derive from a fresh UUID per write, so concurrent invocations
//! sharing one store never collide and never overwrite each other.

use std::path::PathBuf;

use reelgen_core::naming;

/// Default public root directory, relative to the working directory.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Errors from the artifact store.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    /// Creating the destination directory failed.
    #[error("Failed to create artifact directory {dir}: {source}")]
    CreateDir {
        dir: String,
        source: std::io::Error,
    },

    /// Writing the artifact file failed.
    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// A persisted inline payload.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    /// Stable public path, e.g. `/videos/generated/<uuid>.mp4`.
    pub public_path: String,
    /// Filesystem path that was written.
    pub file_path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: usize,
}

/// Filesystem-backed store for generated video artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    public_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given public directory.
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Directory generated artifacts are written into.
    pub fn generated_dir(&self) -> PathBuf {
        self.public_dir.join(naming::GENERATED_VIDEO_DIR)
    }

    /// Persist an inline video payload and return its public path.
    ///
    /// The destination directory is created recursively if absent. The file
    /// is fully written before this returns, so a returned public path
    /// always points at a complete artifact.
    pub async fn save_video(&self, bytes: &[u8]) -> Result<StoredArtifact, ArtifactStoreError> {
        let dir = self.generated_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| ArtifactStoreError::CreateDir {
                dir: dir.display().to_string(),
                source,
            })?;

        let filename = naming::generated_video_filename();
        let file_path = dir.join(&filename);
        tokio::fs::write(&file_path, bytes)
            .await
            .map_err(|source| ArtifactStoreError::Write {
                path: file_path.display().to_string(),
                source,
            })?;

        tracing::info!(
            path = %file_path.display(),
            bytes = bytes.len(),
            "Stored generated video",
        );

        Ok(StoredArtifact {
            public_path: naming::public_video_path(&filename),
            file_path,
            bytes_written: bytes.len(),
        })
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_exact_bytes() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path());

        let payload = vec![7u8; 1024];
        let stored = store.save_video(&payload).await.unwrap();

        assert_eq!(stored.bytes_written, 1024);
        let on_disk = std::fs::read(&stored.file_path).unwrap();
        assert_eq!(on_disk, payload);
    }

    #[tokio::test]
    async fn save_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        // Point the store at a root that does not exist yet.
        let store = ArtifactStore::new(root.path().join("deep").join("public"));

        let stored = store.save_video(b"mp4 bytes").await.unwrap();
        assert!(stored.file_path.exists());
    }

    #[tokio::test]
    async fn public_path_matches_file_on_disk() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path());

        let stored = store.save_video(b"x").await.unwrap();

        assert!(stored.public_path.starts_with(naming::PUBLIC_VIDEO_PREFIX));
        let filename = stored.public_path.rsplit('/').next().unwrap();
        assert_eq!(
            stored.file_path.file_name().unwrap().to_str().unwrap(),
            filename
        );
    }

    #[tokio::test]
    async fn identical_payloads_never_collide() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path());

        let first = store.save_video(b"same bytes").await.unwrap();
        let second = store.save_video(b"same bytes").await.unwrap();

        assert_ne!(first.file_path, second.file_path);
        assert_ne!(first.public_path, second.public_path);
        assert!(first.file_path.exists());
        assert!(second.file_path.exists());
    }
}
