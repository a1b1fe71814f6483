//! Encoded output value object

use super::raw_recording::human_readable_size;
use super::AudioMimeType;

/// Finished output of a conversion: encoded bytes and their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl EncodedBlob {
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes())
    }

    /// File name for saving this blob; the extension always follows the MIME type
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.mime_type.extension())
    }
}
