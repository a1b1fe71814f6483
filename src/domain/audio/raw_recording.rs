//! Raw recording value object

use std::sync::Arc;

use chrono::{DateTime, Local};

use super::AudioMimeType;

/// Compressed audio exactly as captured, plus its declared container type.
///
/// The bytes are shared behind an `Arc` so the pipeline can hand them to a
/// blocking decoder or the transcoding engine without copying or mutating
/// the caller's buffer.
#[derive(Debug, Clone)]
pub struct RawRecording {
    data: Arc<[u8]>,
    mime_type: AudioMimeType,
}

impl RawRecording {
    /// Create a recording from owned bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self {
            data: data.into(),
            mime_type,
        }
    }

    /// Create a recording from a byte slice
    pub fn from_bytes(data: &[u8], mime_type: AudioMimeType) -> Self {
        Self {
            data: Arc::from(data),
            mime_type,
        }
    }

    /// Get the raw compressed bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a cheap shared handle to the bytes
    pub fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Get the declared MIME type
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes())
    }
}

/// Default display name for a recording captured at `at`
pub fn recording_name(at: DateTime<Local>) -> String {
    format!("Recording {}", at.format("%Y-%m-%d %H:%M:%S"))
}

/// Format a byte count as B / KB / MB
pub fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
