//! Per-run scratch directory for the FFmpeg engine
//!
//! Each run gets its own directory, so concurrent runs never see each
//! other's `input.*` and `output.*` files. The directory and everything in
//! it is removed when the workspace is dropped, on success or failure.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const DIR_PREFIX: &str = "voice-export-";

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh directory under the system temp dir
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(DIR_PREFIX).tempdir()?;
        tracing::trace!(path = %dir.path().display(), "created scratch workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub async fn write(&self, name: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }

    pub async fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.path().join(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read() {
        let ws = Workspace::new().unwrap();
        let path = ws.write("input.webm", b"abc").await.unwrap();
        assert_eq!(path, ws.path().join("input.webm"));
        assert_eq!(ws.read("input.webm").await.unwrap(), b"abc");
    }

    #[tokio::test]
    async fn missing_output_is_an_error() {
        let ws = Workspace::new().unwrap();
        let err = ws.read("output.m4a").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn directory_is_removed_on_drop() {
        let ws = Workspace::new().unwrap();
        ws.write("input.webm", b"abc").await.unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.exists());

        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn workspaces_are_isolated() {
        let a = Workspace::new().unwrap();
        let b = Workspace::new().unwrap();
        assert_ne!(a.path(), b.path());
    }
}
