//! Uploaded-file storage
//!
//! One file per material under the upload directory, named `{id}{ext}`.
//! The extension is lowercased at save time so deletion can sweep the
//! known extension set without tracking which one was used.

use std::path::PathBuf;
use uuid::Uuid;

use crate::error::Result;
use crate::types::SUPPORTED_EXTENSIONS;

/// Filesystem store for uploaded source files
pub struct FileStore {
    upload_dir: PathBuf,
}

impl FileStore {
    /// Create the store, making the upload directory if needed
    pub fn new(upload_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self { upload_dir })
    }

    /// Path for a material file; `extension` includes the leading dot
    pub fn path_for(&self, id: &Uuid, extension: &str) -> PathBuf {
        self.upload_dir
            .join(format!("{}{}", id, extension.to_lowercase()))
    }

    /// Save uploaded bytes, returning the saved path
    pub async fn save(&self, id: &Uuid, extension: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(id, extension);
        tokio::fs::write(&path, data).await?;
        tracing::debug!("Saved upload to {}", path.display());
        Ok(path)
    }

    /// Remove the file saved under one specific extension
    pub async fn remove(&self, id: &Uuid, extension: &str) -> Result<()> {
        let path = self.path_for(id, extension);
        if path.exists() {
            tokio::fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Remove a material's file whichever supported extension it was
    /// saved under; missing files are skipped, so repeated sweeps are
    /// harmless
    pub async fn sweep(&self, id: &Uuid) -> usize {
        let mut removed = 0;
        for ext in SUPPORTED_EXTENSIONS {
            let path = self.path_for(id, ext);
            if path.exists() {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => removed += 1,
                    Err(e) => {
                        tracing::warn!("Failed to remove {}: {}", path.display(), e);
                    }
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let id = Uuid::new_v4();

        let path = store.save(&id, ".PDF", b"%PDF-1.4").await.unwrap();
        // Extension is normalized to lowercase
        assert!(path.to_string_lossy().ends_with(".pdf"));
        assert!(path.exists());

        assert_eq!(store.sweep(&id).await, 1);
        assert!(!path.exists());
        // Second sweep finds nothing
        assert_eq!(store.sweep(&id).await, 0);
    }

    #[tokio::test]
    async fn test_sweep_unknown_id_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.sweep(&Uuid::new_v4()).await, 0);
    }
}
