//! Process-wide FFmpeg engine
//!
//! The engine is resolved and verified once per process, the first time any
//! adapter needs it, and is never unloaded. Concurrent first callers share a
//! single in-flight load. A failed load is not cached, so a later call can
//! retry (for example after FFmpeg has been installed).

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Engine-level errors, mapped into port errors by the adapters
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("FFmpeg not found at '{0}'. Install FFmpeg or set ffmpeg_path in the config")]
    NotFound(String),

    #[error("FFmpeg failed to start: {0}")]
    LoadFailed(String),

    #[error("Failed to spawn FFmpeg: {0}")]
    SpawnFailed(String),

    #[error("FFmpeg exited with error: {0}")]
    RunFailed(String),
}

/// A verified FFmpeg binary
#[derive(Debug)]
pub struct FfmpegEngine {
    binary: PathBuf,
    version: String,
}

impl FfmpegEngine {
    /// Resolve and verify the binary by running `ffmpeg -version`
    pub async fn load(binary: &Path) -> Result<Self, EngineError> {
        tracing::debug!(binary = %binary.display(), "loading ffmpeg engine");

        let output = Command::new(binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EngineError::NotFound(binary.display().to_string())
                } else {
                    EngineError::LoadFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(EngineError::LoadFailed(format!(
                "'{} -version' exited with {}",
                binary.display(),
                output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("ffmpeg (unknown version)")
            .trim()
            .to_string();

        tracing::info!(%version, "ffmpeg engine ready");

        Ok(Self {
            binary: binary.to_path_buf(),
            version,
        })
    }

    /// First line of `ffmpeg -version`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build the full argument list for a run
    fn run_args(args: &[String]) -> Vec<String> {
        let mut full = vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(), // Overwrite output
        ];
        full.extend(args.iter().cloned());
        full
    }

    /// Run FFmpeg with `workdir` as its working directory.
    ///
    /// The child is killed if the returned future is dropped.
    pub async fn run(&self, workdir: &Path, args: &[String]) -> Result<(), EngineError> {
        let full_args = Self::run_args(args);
        tracing::debug!(args = ?full_args, "running ffmpeg");

        let output = Command::new(&self.binary)
            .args(&full_args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| EngineError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| output.status.to_string());
            return Err(EngineError::RunFailed(reason));
        }

        Ok(())
    }
}

/// Lazily initialized, shareable engine slot with single-flight loading
pub struct LazyEngine<E> {
    cell: OnceCell<Arc<E>>,
    load_attempts: AtomicUsize,
}

impl<E> LazyEngine<E> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Return the engine, running `load` if no engine is cached yet.
    ///
    /// Callers arriving while a load is in flight wait for it instead of
    /// starting their own.
    pub async fn get_or_load<F, Fut, Err>(&self, load: F) -> Result<Arc<E>, Err>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<E, Err>>,
    {
        self.cell
            .get_or_try_init(|| async move {
                self.load_attempts.fetch_add(1, Ordering::SeqCst);
                load().await.map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of times a load has been started (successful or not)
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }
}

impl<E> Default for LazyEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

static FFMPEG_ENGINE: LazyEngine<FfmpegEngine> = LazyEngine::new();

/// The process-wide FFmpeg engine slot
pub fn shared_engine() -> &'static LazyEngine<FfmpegEngine> {
    &FFMPEG_ENGINE
}

/// An FFmpeg binary path bound to an engine slot.
///
/// The first successful load wins for the lifetime of the slot; later
/// handles with a different path reuse the engine already loaded.
#[derive(Clone)]
pub struct EngineHandle {
    binary: PathBuf,
    slot: &'static LazyEngine<FfmpegEngine>,
}

impl EngineHandle {
    /// Bind `binary` to the process-wide slot
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::with_slot(binary, shared_engine())
    }

    pub fn with_slot(binary: impl Into<PathBuf>, slot: &'static LazyEngine<FfmpegEngine>) -> Self {
        Self {
            binary: binary.into(),
            slot,
        }
    }

    /// Get the engine, loading it on first use
    pub async fn engine(&self) -> Result<Arc<FfmpegEngine>, EngineError> {
        self.slot
            .get_or_load(|| FfmpegEngine::load(&self.binary))
            .await
    }
}
