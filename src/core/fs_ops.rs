// src/core/fs_ops.rs
//! File system helpers shared by configuration and export

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
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

    /// Write file, creating its parent directory first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    /// Keep export file names to a safe character set
    pub fn sanitize_file_name(name: &str) -> String {
        let cleaned: String = name
            .trim()
            .chars()
            .map(|c| match c {
                c if c.is_alphanumeric() => c,
                '.' | '-' | '_' => c,
                _ => '_',
            })
            .collect();

        if cleaned.trim_matches(['.', '_']).is_empty() {
            "resume.pdf".to_string()
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(FsOps::sanitize_file_name("resume.pdf"), "resume.pdf");
        assert_eq!(FsOps::sanitize_file_name("Jane Doe/CV.pdf"), "Jane_Doe_CV.pdf");
        assert_eq!(FsOps::sanitize_file_name("  "), "resume.pdf");
        assert_eq!(FsOps::sanitize_file_name("../"), "resume.pdf");
    }

    #[test]
    fn test_normalize_path() {
        let base = Path::new("/srv/app");
        assert_eq!(
            FsOps::normalize_path(base, Path::new("out")),
            PathBuf::from("/srv/app/out")
        );
        assert_eq!(
            FsOps::normalize_path(base, Path::new("/tmp/out")),
            PathBuf::from("/tmp/out")
        );
    }

    #[tokio::test]
    async fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b.txt");
        FsOps::write_file_safe(&path, "hello").await.unwrap();
        assert_eq!(FsOps::read_file_safe(&path).await.unwrap(), "hello");
    }
}
