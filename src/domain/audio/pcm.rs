//! Canonical PCM representation and 16-bit quantization
//!
//! The pipeline only ever encodes channel 0. Extra channels survive decoding
//! but are ignored when quantizing, so every PCM-path output is mono.

use crate::domain::error::InvalidPcmError;

/// Scale applied to float samples before clamping to the i16 range
const I16_SCALE: f32 = 32768.0;

/// Decoded audio: a sample rate plus one f32 sample sequence per channel
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl PcmBuffer {
    /// Create a buffer, validating that the rate is positive, there is at
    /// least one channel, and all channels have the same length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, InvalidPcmError> {
        if sample_rate == 0 {
            return Err(InvalidPcmError::ZeroSampleRate);
        }

        let expected = match channels.first() {
            Some(first) => first.len(),
            None => return Err(InvalidPcmError::NoChannels),
        };

        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != expected)
        {
            return Err(InvalidPcmError::ChannelLengthMismatch {
                channel: index,
                expected,
                actual: channel.len(),
            });
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Convenience constructor for a single channel
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self, InvalidPcmError> {
        Self::new(sample_rate, vec![samples])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Get one channel's samples
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Quantize channel 0 to 16-bit samples
    pub fn to_mono_i16(&self) -> Int16Samples {
        quantize(&self.channels[0])
    }
}

/// Signed 16-bit samples for a single channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Int16Samples(Vec<i16>);

impl Int16Samples {
    pub fn new(samples: Vec<i16>) -> Self {
        Self(samples)
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<i16> {
        self.0
    }
}

impl From<Vec<i16>> for Int16Samples {
    fn from(samples: Vec<i16>) -> Self {
        Self(samples)
    }
}

/// Quantize a float sample to i16: `clamp(round(s * 32768), -32768, 32767)`.
///
/// Both polarities use the same 32768 scale, so +1.0 saturates to 32767
/// while -1.0 maps exactly to -32768. NaN maps to 0.
pub fn quantize_sample(sample: f32) -> i16 {
    (sample * I16_SCALE).round().clamp(-32768.0, 32767.0) as i16
}

/// Quantize a whole channel
pub fn quantize(channel: &[f32]) -> Int16Samples {
    Int16Samples(channel.iter().map(|&s| quantize_sample(s)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_positive_saturates() {
        assert_eq!(quantize_sample(1.0), 32767);
    }

    #[test]
    fn full_scale_negative_is_exact() {
        assert_eq!(quantize_sample(-1.0), -32768);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(quantize_sample(3.5), 32767);
        assert_eq!(quantize_sample(-7.0), -32768);
    }

    #[test]
    fn rounds_to_nearest() {
        // 0.5 / 32768 scales to exactly 0.5 and rounds away from zero
        assert_eq!(quantize_sample(0.5 / 32768.0), 1);
        assert_eq!(quantize_sample(0.4 / 32768.0), 0);
        assert_eq!(quantize_sample(-1.6 / 32768.0), -2);
        assert_eq!(quantize_sample(0.25), 8192);
    }

    #[test]
    fn nan_quantizes_to_zero() {
        assert_eq!(quantize_sample(f32::NAN), 0);
    }

    #[test]
    fn quantize_preserves_length_and_range() {
        let channel: Vec<f32> = (0..10_000).map(|i| ((i as f32) * 0.37).sin() * 1.3).collect();
        let samples = quantize(&channel);
        assert_eq!(samples.len(), channel.len());
        assert!(samples.as_slice().iter().all(|&s| (-32768..=32767).contains(&(s as i32))));
    }

    #[test]
    fn pcm_buffer_rejects_zero_rate() {
        assert_eq!(
            PcmBuffer::mono(0, vec![0.0]),
            Err(InvalidPcmError::ZeroSampleRate)
        );
    }

    #[test]
    fn pcm_buffer_rejects_no_channels() {
        assert_eq!(
            PcmBuffer::new(44100, Vec::new()),
            Err(InvalidPcmError::NoChannels)
        );
    }

    #[test]
    fn pcm_buffer_rejects_uneven_channels() {
        let result = PcmBuffer::new(44100, vec![vec![0.0; 4], vec![0.0; 3]]);
        assert_eq!(
            result,
            Err(InvalidPcmError::ChannelLengthMismatch {
                channel: 1,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn to_mono_i16_reads_only_first_channel() {
        let pcm = PcmBuffer::new(8000, vec![vec![1.0, -1.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(pcm.to_mono_i16().as_slice(), &[32767, -32768]);
        assert_eq!(pcm.channel_count(), 2);
        assert_eq!(pcm.frames(), 2);
    }

    #[test]
    fn duration_from_frames() {
        let pcm = PcmBuffer::mono(16000, vec![0.0; 8000]).unwrap();
        assert!((pcm.duration_secs() - 0.5).abs() < f64::EPSILON);
    }
}
