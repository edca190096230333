// src/core/fs_ops.rs
//! Async file system helpers shared by the exporter, config and stores

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write a file, creating its parent directory first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        debug!("Written file: {}", path.display());
        Ok(())
    }

    pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .await
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
            debug!("Removed file: {}", path.display());
        }
        Ok(())
    }

    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");

        FsOps::write_file_safe(&path, "hello").await.unwrap();
        assert_eq!(FsOps::read_file_safe(&path).await.unwrap(), "hello");

        FsOps::remove_file_if_exists(&path).await.unwrap();
        assert!(!path.exists());
        FsOps::remove_file_if_exists(&path).await.unwrap();
    }

    #[test]
    fn test_normalize_path() {
        let base = Path::new("/srv");
        assert_eq!(FsOps::normalize_path(base, Path::new("data")), PathBuf::from("/srv/data"));
        assert_eq!(FsOps::normalize_path(base, Path::new("/abs")), PathBuf::from("/abs"));
    }
}
