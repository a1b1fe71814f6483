//! WAV encoder producing canonical mono 16-bit PCM files
//!
//! Layout: `RIFF` header, 16-byte `fmt ` chunk (PCM, 1 channel, 16 bits),
//! then a `data` chunk holding little-endian samples.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::{EncodeError, WavEncoder};
use crate::domain::audio::{AudioMimeType, EncodedBlob, Int16Samples};

/// Bits per sample written to the container
pub const BITS_PER_SAMPLE: u16 = 16;

/// Number of channels (mono)
const CHANNELS: u16 = 1;

/// Size of the RIFF/WAVE header plus `fmt ` and `data` chunk headers
const HEADER_LEN: usize = 44;

/// Encode mono i16 samples into an in-memory WAV file
pub fn encode_to_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    if samples.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(EncodeError::EncoderInit(
            "sample rate must be greater than zero".to_string(),
        ));
    }

    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_LEN + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| EncodeError::EncoderInit(e.to_string()))?;

        let mut sample_writer = writer.get_i16_writer(samples.len() as u32);
        for &sample in samples {
            sample_writer.write_sample(sample);
        }
        sample_writer
            .flush()
            .map_err(|e| EncodeError::WriteFailed(e.to_string()))?;

        writer
            .finalize()
            .map_err(|e| EncodeError::WriteFailed(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// hound-backed WAV encoder adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct HoundWavEncoder;

impl HoundWavEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl WavEncoder for HoundWavEncoder {
    fn encode_samples(
        &self,
        samples: &Int16Samples,
        sample_rate: u32,
    ) -> Result<EncodedBlob, EncodeError> {
        let data = encode_to_wav(samples.as_slice(), sample_rate)?;
        tracing::debug!(samples = samples.len(), sample_rate, bytes = data.len(), "encoded wav");
        Ok(EncodedBlob::new(data, AudioMimeType::Wav))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::PcmBuffer;

    fn u16_at(data: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([data[offset], data[offset + 1]])
    }

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    /// Find a top-level chunk, returning (body offset, body length)
    fn find_chunk(data: &[u8], id: &[u8; 4]) -> Option<(usize, usize)> {
        let mut offset = 12;
        while offset + 8 <= data.len() {
            let len = u32_at(data, offset + 4) as usize;
            if &data[offset..offset + 4] == id {
                return Some((offset + 8, len));
            }
            offset += 8 + len + (len & 1);
        }
        None
    }

    #[test]
    fn header_declares_mono_16_bit() {
        let data = encode_to_wav(&[0, 1, -1, i16::MAX, i16::MIN], 22050).unwrap();

        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        assert_eq!(u32_at(&data, 4) as usize, data.len() - 8);

        let (fmt, fmt_len) = find_chunk(&data, b"fmt ").unwrap();
        assert!(fmt_len >= 16);
        assert_eq!(u16_at(&data, fmt), 1); // PCM
        assert_eq!(u16_at(&data, fmt + 2), 1); // channels
        assert_eq!(u32_at(&data, fmt + 4), 22050); // sample rate
        assert_eq!(u32_at(&data, fmt + 8), 22050 * 2); // byte rate
        assert_eq!(u16_at(&data, fmt + 12), 2); // block align
        assert_eq!(u16_at(&data, fmt + 14), 16); // bits per sample
    }

    #[test]
    fn data_chunk_is_two_bytes_per_sample() {
        let samples = vec![1234i16; 1000];
        let data = encode_to_wav(&samples, 16000).unwrap();

        let (body, len) = find_chunk(&data, b"data").unwrap();
        assert_eq!(len, 2 * samples.len());
        assert_eq!(&data[body..body + 2], &1234i16.to_le_bytes());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(encode_to_wav(&[], 44100), Err(EncodeError::EmptyInput)));
    }

    #[test]
    fn adapter_tags_wav_mime() {
        let blob = HoundWavEncoder::new()
            .encode_samples(&Int16Samples::new(vec![0; 10]), 8000)
            .unwrap();
        assert_eq!(blob.mime_type(), AudioMimeType::Wav);
        assert_eq!(blob.file_name("take"), "take.wav");
    }

    #[test]
    fn encode_pcm_uses_first_channel() {
        let pcm = PcmBuffer::new(8000, vec![vec![1.0, -1.0], vec![0.25, 0.25]]).unwrap();
        let blob = HoundWavEncoder::new().encode_pcm(&pcm).unwrap();

        let data = blob.data();
        let (body, len) = find_chunk(data, b"data").unwrap();
        assert_eq!(len, 4);
        assert_eq!(&data[body..body + 4], &[0xFF, 0x7F, 0x00, 0x80]);
    }

    #[test]
    fn hound_reads_back_samples() {
        let samples = vec![-3i16, 0, 7, 32767, -32768];
        let data = encode_to_wav(&samples, 48000).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(data)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 48000);
        let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(decoded, samples);
    }
}
