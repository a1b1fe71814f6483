//! Audio domain module

mod encoded_blob;
mod format;
mod mime;
mod pcm;
mod raw_recording;

pub use encoded_blob::EncodedBlob;
pub use format::{ContainerFormat, TargetFormat};
pub use mime::AudioMimeType;
pub use pcm::{quantize, quantize_sample, Int16Samples, PcmBuffer};
pub use raw_recording::{human_readable_size, recording_name, RawRecording};
